//! Hash-fragment deep links: `#kernel/{id}/ppa/{value}/`.
//!
//! Parsed once on page load to preselect a dataset, written back on every
//! accepted commit.

use vino_common::{Ppa, VinoError, VinoId, VinoResult};

/// A parsed deep link.
#[derive(Debug, Clone, PartialEq)]
pub struct DeepLink {
    pub id: VinoId,
    pub ppa: Option<Ppa>,
}

impl DeepLink {
    /// Render as a hash fragment, leading `#` included.
    pub fn fragment(&self) -> String {
        match &self.ppa {
            Some(ppa) => format!("#kernel/{}/ppa/{}/", self.id, ppa),
            None => format!("#kernel/{}/", self.id),
        }
    }
}

/// Parse a location hash. An empty or absent fragment is not an error;
/// anything present must follow the `kernel/{id}[/ppa/{value}]` shape.
pub fn parse_fragment(fragment: &str) -> VinoResult<Option<DeepLink>> {
    let trimmed = fragment.trim_start_matches('#').trim_matches('/');
    if trimmed.is_empty() {
        return Ok(None);
    }

    let segments: Vec<&str> = trimmed.split('/').collect();
    let bad = || VinoError::InvalidDeepLink(fragment.to_string());

    let link = match segments.as_slice() {
        ["kernel", id] => DeepLink {
            id: parse_id(id).ok_or_else(bad)?,
            ppa: None,
        },
        ["kernel", id, "ppa", value] => DeepLink {
            id: parse_id(id).ok_or_else(bad)?,
            ppa: Some(value.parse()?),
        },
        _ => return Err(bad()),
    };
    Ok(Some(link))
}

fn parse_id(text: &str) -> Option<VinoId> {
    text.parse::<u32>().ok().map(VinoId)
}
