//! Plot layout derivation.
//!
//! 2-D data gets Cartesian axes with pan drag mode and a 1:1 aspect; 3-D and
//! sectioned higher-dimensional data gets a scene with per-axis titles.

use serde::Serialize;
use serde_json::{json, Map, Value};

use vino_common::AxisDescriptor;
use vino_protocol::MergedInfo;

use crate::renderer::RelayoutPatch;

/// Axis of a Cartesian layout.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartesianAxis {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scaleanchor: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scaleratio: Option<f64>,
}

/// Axis of a 3-D scene.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneAxis {
    pub title: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Margin {
    pub t: u32,
    pub r: u32,
    pub b: u32,
    pub l: u32,
}

/// Layout of one render, derived from merged chunk info.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Layout {
    Cartesian {
        dragmode: &'static str,
        hovermode: &'static str,
        margin: Margin,
        xaxis: CartesianAxis,
        yaxis: CartesianAxis,
    },
    Scene {
        hovermode: &'static str,
        margin: Margin,
        scene: SceneLayout,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneLayout {
    pub xaxis: SceneAxis,
    pub yaxis: SceneAxis,
    pub zaxis: SceneAxis,
}

impl Layout {
    /// True for the 2-D Cartesian variant.
    pub fn is_cartesian(&self) -> bool {
        matches!(self, Layout::Cartesian { .. })
    }
}

/// Derive a layout from merged info. Anything that is not explicitly 3-D or
/// higher renders as Cartesian.
pub fn layout_for(info: &MergedInfo) -> Layout {
    let axes = info.axes.as_deref().unwrap_or(&[]);

    if info.dim.unwrap_or(2) >= 3 {
        Layout::Scene {
            hovermode: "closest",
            margin: Margin {
                t: 0,
                r: 0,
                b: 0,
                l: 0,
            },
            scene: SceneLayout {
                xaxis: SceneAxis {
                    title: tagged_title(axes, 0, "x"),
                },
                yaxis: SceneAxis {
                    title: tagged_title(axes, 1, "y"),
                },
                zaxis: SceneAxis {
                    title: tagged_title(axes, 2, "z"),
                },
            },
        }
    } else {
        Layout::Cartesian {
            dragmode: "pan",
            hovermode: "closest",
            margin: Margin {
                t: 50,
                r: 50,
                b: 80,
                l: 80,
            },
            xaxis: CartesianAxis {
                title: plain_title(axes, 0, "x"),
                scaleanchor: None,
                scaleratio: None,
            },
            yaxis: CartesianAxis {
                title: plain_title(axes, 1, "y"),
                scaleanchor: Some("x"),
                scaleratio: Some(1.0),
            },
        }
    }
}

fn plain_title(axes: &[AxisDescriptor], index: usize, fallback: &str) -> String {
    axes.get(index)
        .map(|a| a.plain_label())
        .unwrap_or_else(|| fallback.to_string())
}

fn tagged_title(axes: &[AxisDescriptor], index: usize, fallback: &str) -> String {
    axes.get(index)
        .map(|a| a.tagged_label())
        .unwrap_or_else(|| fallback.to_string())
}

/// Relayout patch aligning axis ticks to grid cells, for gridded 2-D renders.
/// Returns nothing when the info carries no grid geometry.
pub fn grid_tick_patch(info: &MergedInfo) -> Option<RelayoutPatch> {
    let grid = info.grid.as_ref()?;
    let mins = grid.mins()?;
    if mins.len() < 2 || grid.unit.len() < 2 {
        return None;
    }

    let mut patch = Map::new();
    for (axis, index) in [("xaxis", 0), ("yaxis", 1)] {
        patch.insert(format!("{}.tick0", axis), json!(mins[index]));
        patch.insert(format!("{}.dtick", axis), json!(grid.unit[index]));
        patch.insert(format!("{}.showticklabels", axis), Value::Bool(false));
    }
    Some(patch)
}

/// Relayout patch reapplying the dataset's axis ranges, used after section
/// renders so the viewport covers the full plane instead of the slice.
pub fn axis_range_patch(info: &MergedInfo) -> Option<RelayoutPatch> {
    let axes = info.axes.as_deref()?;
    let (x, y) = match axes {
        [x, y, ..] => (x.range?, y.range?),
        _ => return None,
    };

    let mut patch = Map::new();
    patch.insert("xaxis.range".to_string(), json!([x.0, x.1]));
    patch.insert("yaxis.range".to_string(), json!([y.0, y.1]));
    Some(patch)
}
