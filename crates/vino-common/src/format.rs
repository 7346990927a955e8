//! Dataset storage formats.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::VinoError;

/// Storage format of a dataset, as reported by the backend.
///
/// A requested state carries `Option<Format>`: `None` means "native format",
/// i.e. the data is fetched as stored with no conversion span in the URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Bars,
    Polygon,
    RegularGrid,
    KdTree,
}

impl Format {
    /// Wire name used in URLs and JSON payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Bars => "bars",
            Format::Polygon => "polygon",
            Format::RegularGrid => "regulargrid",
            Format::KdTree => "kdtree",
        }
    }

    /// True for formats whose 2-D datasets carry an outline-shapes overlay.
    pub fn has_shapes(&self) -> bool {
        matches!(self, Format::Bars | Format::KdTree)
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Format {
    type Err = VinoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bars" => Ok(Format::Bars),
            "polygon" => Ok(Format::Polygon),
            "regulargrid" => Ok(Format::RegularGrid),
            "kdtree" => Ok(Format::KdTree),
            other => Err(VinoError::UnknownFormat(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names_round_trip() {
        for format in [
            Format::Bars,
            Format::Polygon,
            Format::RegularGrid,
            Format::KdTree,
        ] {
            assert_eq!(format.as_str().parse::<Format>().unwrap(), format);
        }
    }

    #[test]
    fn test_unknown_format_rejected() {
        assert!("voronoi".parse::<Format>().is_err());
    }

    #[test]
    fn test_json_uses_lowercase_names() {
        let json = serde_json::to_string(&Format::RegularGrid).unwrap();
        assert_eq!(json, "\"regulargrid\"");
        let back: Format = serde_json::from_str("\"kdtree\"").unwrap();
        assert_eq!(back, Format::KdTree);
    }

    #[test]
    fn test_shapes_availability() {
        assert!(Format::Bars.has_shapes());
        assert!(Format::KdTree.has_shapes());
        assert!(!Format::Polygon.has_shapes());
        assert!(!Format::RegularGrid.has_shapes());
    }
}
