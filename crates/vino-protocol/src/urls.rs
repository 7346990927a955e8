//! Backend URL composition.
//!
//! Paths follow the backend routing:
//! - `/api/vino/{id}/info/`
//! - `/api/vino/{id}/[{format}/{ppa}/]` for data
//! - a single terminal suffix: `shapes/` or `section/{plane}/{at}/`

use vino_common::{Format, Plane, RequestedState, VinoId};

const API_BASE: &str = "/api/vino";

/// Terminal suffix of a data URL. At most one may be active per fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum UrlSuffix {
    /// Plain data fetch.
    None,
    /// Outline overlay for 2-D bar-grid/kd-tree datasets.
    Shapes,
    /// Cross-section at fixed coordinates on the off-plane axes.
    Section { plane: Plane, at: Vec<f64> },
}

/// URL of the per-dataset metadata document.
pub fn info_url(id: VinoId) -> String {
    format!("{}/{}/info/", API_BASE, id)
}

/// Conversion path segment for a requested format, if any.
///
/// `bars` converts through the bar-grid endpoint; `regulargrid` optionally
/// carries the distance-weight marker. Other formats are served natively and
/// emit no conversion span.
fn format_segment(format: Format, distance: bool) -> Option<&'static str> {
    match format {
        Format::Bars => Some("bargrid"),
        Format::RegularGrid if distance => Some("regulargrid[distance]"),
        Format::RegularGrid => Some("regulargrid"),
        Format::Polygon | Format::KdTree => None,
    }
}

/// Compose a data URL for a committed state and a terminal suffix.
pub fn data_url(state: &RequestedState, suffix: &UrlSuffix) -> String {
    let mut url = format!("{}/{}/", API_BASE, state.id);

    if let Some(segment) = state
        .format
        .and_then(|f| format_segment(f, state.distance))
    {
        url.push_str(segment);
        url.push('/');
        url.push_str(&state.ppa.to_string());
        url.push('/');
    }

    match suffix {
        UrlSuffix::None => {}
        UrlSuffix::Shapes => url.push_str("shapes/"),
        UrlSuffix::Section { plane, at } => {
            let coords: Vec<String> = at.iter().map(|v| v.to_string()).collect();
            url.push_str(&format!("section/{}/{}/", plane, coords.join(",")));
        }
    }

    url
}

#[cfg(test)]
mod tests {
    use super::*;
    use vino_common::Ppa;

    fn state(id: u32, format: Option<Format>, ppa: Ppa) -> RequestedState {
        RequestedState::new(VinoId(id), format, ppa)
    }

    #[test]
    fn test_info_url() {
        assert_eq!(info_url(VinoId(12)), "/api/vino/12/info/");
    }

    #[test]
    fn test_native_format_has_no_conversion_span() {
        let s = state(3, None, Ppa::Scalar(50));
        assert_eq!(data_url(&s, &UrlSuffix::None), "/api/vino/3/");
    }

    #[test]
    fn test_bars_maps_to_bargrid() {
        let s = state(5, Some(Format::Bars), Ppa::Scalar(1000));
        assert_eq!(data_url(&s, &UrlSuffix::None), "/api/vino/5/bargrid/1000/");
    }

    #[test]
    fn test_regulargrid_with_distance_marker() {
        let mut s = state(7, Some(Format::RegularGrid), Ppa::Scalar(30));
        s.distance = true;
        assert_eq!(
            data_url(&s, &UrlSuffix::None),
            "/api/vino/7/regulargrid[distance]/30/"
        );
    }

    #[test]
    fn test_regulargrid_without_distance() {
        let s = state(7, Some(Format::RegularGrid), Ppa::Scalar(30));
        assert_eq!(
            data_url(&s, &UrlSuffix::None),
            "/api/vino/7/regulargrid/30/"
        );
    }

    #[test]
    fn test_shapes_suffix() {
        let s = state(9, Some(Format::Bars), Ppa::Scalar(1000));
        assert_eq!(
            data_url(&s, &UrlSuffix::Shapes),
            "/api/vino/9/bargrid/1000/shapes/"
        );
    }

    #[test]
    fn test_section_suffix() {
        let s = state(5, Some(Format::Bars), Ppa::PerAxis(vec![10, 10, 10, 10]));
        let suffix = UrlSuffix::Section {
            plane: Plane(0, 1),
            at: vec![2.0, 3.0],
        };
        assert_eq!(
            data_url(&s, &suffix),
            "/api/vino/5/bargrid/10,10,10,10/section/0,1/2,3/"
        );
    }

    #[test]
    fn test_section_with_fractional_coordinates() {
        let s = state(5, None, Ppa::Scalar(50));
        let suffix = UrlSuffix::Section {
            plane: Plane(1, 2),
            at: vec![0.5],
        };
        assert_eq!(data_url(&s, &suffix), "/api/vino/5/section/1,2/0.5/");
    }

    #[test]
    fn test_kdtree_served_natively() {
        let s = state(4, Some(Format::KdTree), Ppa::Scalar(50));
        assert_eq!(data_url(&s, &UrlSuffix::None), "/api/vino/4/");
    }
}
