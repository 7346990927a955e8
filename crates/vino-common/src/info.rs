//! Dataset metadata as served by `/api/vino/{id}/info/`.

use serde::{Deserialize, Serialize};

use crate::format::Format;
use crate::ppa::Ppa;
use crate::state::VinoId;

/// One variable of a dataset, also used to describe a display axis.
///
/// `order` indexes into the dataset's native variable list; `axis` is the
/// display label ("x"/"y"/"z") assigned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisDescriptor {
    pub order: usize,
    pub name: String,
    #[serde(default)]
    pub axis: Option<String>,
    #[serde(default)]
    pub desc: Option<String>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub range: Option<(f64, f64)>,
}

impl AxisDescriptor {
    /// Cartesian axis title: `name (desc)`.
    pub fn plain_label(&self) -> String {
        match &self.desc {
            Some(desc) => format!("{} ({})", self.name, desc),
            None => self.name.clone(),
        }
    }

    /// Scene axis title: `[axis] name`.
    pub fn tagged_label(&self) -> String {
        match &self.axis {
            Some(axis) => format!("[{}] {}", axis, self.name),
            None => self.name.clone(),
        }
    }
}

/// Variables share the descriptor shape with axes.
pub type VariableDescriptor = AxisDescriptor;

/// Regular-grid geometry, present when the served representation is gridded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridInfo {
    pub ppa: Ppa,
    /// Cell size per axis.
    pub unit: Vec<f64>,
    /// `[mins, maxs]`, one value per axis in each row.
    #[serde(default)]
    pub bounds: Vec<Vec<f64>>,
    #[serde(default)]
    pub origin: Option<Vec<f64>>,
    #[serde(default)]
    pub opposite: Option<Vec<f64>>,
}

impl GridInfo {
    /// Lower bound per axis, when the backend sent bounds.
    pub fn mins(&self) -> Option<&[f64]> {
        self.bounds.first().map(|row| row.as_slice())
    }
}

/// Format and size of the stored dataset a served representation was
/// converted from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OriginalInfo {
    pub format: Format,
    pub size: u64,
}

/// Metadata for one dataset, fetched once per id and cached for the page
/// session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetInfo {
    pub id: VinoId,
    pub dim: usize,
    pub format: Format,
    #[serde(default)]
    pub vp: Option<u32>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub axes: Vec<AxisDescriptor>,
    #[serde(default)]
    pub variables: Vec<VariableDescriptor>,
    #[serde(default)]
    pub grid: Option<GridInfo>,
    #[serde(default)]
    pub original: Option<OriginalInfo>,
}
