//! Response chunk decoding and classification.
//!
//! Every data endpoint answers with one JSON chunk: column arrays under
//! `values` or `shapes`, an optional `distances` weight field, and an echo of
//! the dataset's identifying properties. The chunk's kind is decided once at
//! the decode boundary and carried as a tagged variant from there on.

use serde::Deserialize;

use vino_common::{
    AxisDescriptor, DatasetInfo, Format, GridInfo, OriginalInfo, VariableDescriptor, VinoError,
    VinoId, VinoResult,
};

/// A geometry column. `None` entries are gap separators between disjoint
/// segments of an outline trace.
pub type Column = Vec<Option<f64>>;

/// Distance-weight values attached to a regular-grid or section chunk.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Distances {
    pub values: Vec<f64>,
    #[serde(default)]
    pub range: Option<(f64, f64)>,
}

/// One decoded backend response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DataChunk {
    /// Point coordinates, one column per displayed axis.
    #[serde(default)]
    pub values: Option<Vec<Vec<f64>>>,
    /// Outline geometry `[xs, ys]` with null gap separators.
    #[serde(default)]
    pub shapes: Option<Vec<Column>>,
    #[serde(default)]
    pub distances: Option<Distances>,
    /// Backend-reported failure. Present instead of any payload.
    #[serde(default)]
    pub error: Option<String>,

    // Echoed identifying properties, merged last-write-wins across the
    // chunks of one plot request.
    #[serde(default)]
    pub id: Option<VinoId>,
    #[serde(default)]
    pub vp: Option<u32>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub dim: Option<usize>,
    #[serde(default)]
    pub format: Option<Format>,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub axes: Option<Vec<AxisDescriptor>>,
    #[serde(default)]
    pub variables: Option<Vec<VariableDescriptor>>,
    #[serde(default)]
    pub original: Option<OriginalInfo>,
    #[serde(default)]
    pub grid: Option<GridInfo>,
}

/// Classified payload of a chunk.
#[derive(Debug, Clone, PartialEq)]
pub enum ChunkKind {
    /// Outline overlay geometry.
    Shapes { x: Column, y: Column },
    /// Scatter points, optionally with a third axis.
    Points {
        x: Vec<f64>,
        y: Vec<f64>,
        z: Option<Vec<f64>>,
    },
    /// Polygon ring, drawn as a closed dashed line with markers.
    Polygon { x: Vec<f64>, y: Vec<f64> },
}

impl ChunkKind {
    /// Classify a decoded chunk.
    ///
    /// `shapes` wins over `values`; a `values` chunk whose echoed format is
    /// `polygon` is a ring. A chunk with neither payload, with a backend
    /// error, or with ragged columns is rejected.
    pub fn classify(chunk: &DataChunk) -> VinoResult<ChunkKind> {
        if let Some(message) = &chunk.error {
            return Err(VinoError::BackendError(message.clone()));
        }

        if let Some(shapes) = &chunk.shapes {
            let [x, y] = two_columns(shapes, "shapes")?;
            if x.len() != y.len() {
                return Err(ragged("shapes"));
            }
            return Ok(ChunkKind::Shapes {
                x: x.clone(),
                y: y.clone(),
            });
        }

        if let Some(values) = &chunk.values {
            if values.len() < 2 {
                return Err(VinoError::MalformedChunk(format!(
                    "values needs at least 2 columns, got {}",
                    values.len()
                )));
            }
            let x = values[0].clone();
            let y = values[1].clone();
            let z = values.get(2).cloned();
            if x.len() != y.len() || z.as_ref().is_some_and(|z| z.len() != x.len()) {
                return Err(ragged("values"));
            }
            return Ok(match chunk.format {
                Some(Format::Polygon) => ChunkKind::Polygon { x, y },
                _ => ChunkKind::Points { x, y, z },
            });
        }

        Err(VinoError::MalformedChunk(
            "chunk carries neither values nor shapes".to_string(),
        ))
    }
}

fn two_columns<'a>(columns: &'a [Column], what: &str) -> VinoResult<[&'a Column; 2]> {
    match columns {
        [x, y, ..] => Ok([x, y]),
        _ => Err(VinoError::MalformedChunk(format!(
            "{} needs 2 columns, got {}",
            what,
            columns.len()
        ))),
    }
}

fn ragged(what: &str) -> VinoError {
    VinoError::MalformedChunk(format!("{} columns differ in length", what))
}

/// Identifying properties accumulated over the chunks of one plot request,
/// later chunks overwriting earlier ones per property.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergedInfo {
    pub id: Option<VinoId>,
    pub vp: Option<u32>,
    pub title: Option<String>,
    pub dim: Option<usize>,
    pub format: Option<Format>,
    pub size: Option<u64>,
    pub axes: Option<Vec<AxisDescriptor>>,
    pub variables: Option<Vec<VariableDescriptor>>,
    pub original: Option<OriginalInfo>,
    pub grid: Option<GridInfo>,
}

macro_rules! absorb_fields {
    ($self:ident, $chunk:ident, $($field:ident),+) => {
        $(
            if let Some(value) = &$chunk.$field {
                $self.$field = Some(value.clone());
            }
        )+
    };
}

impl MergedInfo {
    /// Fold one chunk's echoed properties in, overwriting earlier values.
    pub fn absorb(&mut self, chunk: &DataChunk) {
        absorb_fields!(
            self, chunk, id, vp, title, dim, format, size, axes, variables, original, grid
        );
    }

    /// Seed the merge from an already-fetched metadata document.
    pub fn from_dataset(info: &DatasetInfo) -> Self {
        Self {
            id: Some(info.id),
            vp: info.vp,
            title: info.title.clone(),
            dim: Some(info.dim),
            format: Some(info.format),
            size: info.size,
            axes: Some(info.axes.clone()),
            variables: Some(info.variables.clone()),
            original: info.original.clone(),
            grid: info.grid.clone(),
        }
    }
}
