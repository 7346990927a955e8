//! Rendering-ready trace records.
//!
//! A trace is produced fresh per render from one classified chunk and never
//! persisted. The serialized form follows the renderer's scatter vocabulary.

use serde::Serialize;

use vino_protocol::chunk::{ChunkKind, Column, Distances};

/// Color of the outline-shapes overlay.
pub const OVERLAY_COLOR: &str = "#80d0d0";

/// Semantic kind of a trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TraceKind {
    Points,
    Shapes,
    Polygon,
}

/// Draw mode, in the renderer's vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TraceMode {
    #[serde(rename = "markers")]
    Markers,
    #[serde(rename = "lines")]
    Lines,
    #[serde(rename = "lines+markers")]
    LinesMarkers,
}

/// Marker style for point traces.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Vec<f64>>,
    pub colorscale: &'static str,
    pub reversescale: bool,
}

impl Marker {
    fn new(color: Option<Vec<f64>>) -> Self {
        Self {
            size: 2,
            color,
            colorscale: "Viridis",
            reversescale: true,
        }
    }
}

/// Line style for outline and polygon traces.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineStyle {
    pub width: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dash: Option<&'static str>,
}

/// One renderable trace.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trace {
    pub kind: TraceKind,
    pub mode: TraceMode,
    pub x: Column,
    pub y: Column,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<Marker>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<LineStyle>,
    /// When false the renderer skips hover labels for this trace.
    pub hover: bool,
    /// When false, null entries split the line into disjoint segments.
    pub connect_gaps: bool,
}

impl Trace {
    /// Build a trace from a classified chunk.
    ///
    /// Point color priority: third axis, then distance values, then the
    /// y column.
    pub fn from_chunk(kind: ChunkKind, distances: Option<&Distances>) -> Trace {
        match kind {
            ChunkKind::Shapes { x, y } => Trace {
                kind: TraceKind::Shapes,
                mode: TraceMode::Lines,
                x,
                y,
                z: None,
                marker: None,
                line: Some(LineStyle {
                    width: 1.0,
                    color: Some(OVERLAY_COLOR.to_string()),
                    dash: None,
                }),
                hover: false,
                connect_gaps: false,
            },
            ChunkKind::Points { x, y, z } => {
                let color = z
                    .clone()
                    .or_else(|| distances.map(|d| d.values.clone()))
                    .unwrap_or_else(|| y.clone());
                Trace {
                    kind: TraceKind::Points,
                    mode: TraceMode::Markers,
                    x: solid(x),
                    y: solid(y),
                    z,
                    marker: Some(Marker::new(Some(color))),
                    line: None,
                    hover: true,
                    connect_gaps: false,
                }
            }
            ChunkKind::Polygon { mut x, mut y } => {
                close_ring(&mut x, &mut y);
                let color = y.clone();
                Trace {
                    kind: TraceKind::Polygon,
                    mode: TraceMode::LinesMarkers,
                    x: solid(x),
                    y: solid(y),
                    z: None,
                    marker: Some(Marker::new(Some(color))),
                    line: Some(LineStyle {
                        width: 1.0,
                        color: None,
                        dash: Some("dash"),
                    }),
                    hover: true,
                    connect_gaps: false,
                }
            }
        }
    }

    /// True when the trace needs a 3-D scene.
    pub fn is_spatial(&self) -> bool {
        self.z.is_some()
    }
}

fn solid(column: Vec<f64>) -> Column {
    column.into_iter().map(Some).collect()
}

/// Append the opening vertex when a ring is left open.
fn close_ring(x: &mut Vec<f64>, y: &mut Vec<f64>) {
    if let (Some(&x0), Some(&y0)) = (x.first(), y.first()) {
        if x.last() != Some(&x0) || y.last() != Some(&y0) {
            x.push(x0);
            y.push(y0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shapes_trace_style() {
        let trace = Trace::from_chunk(
            ChunkKind::Shapes {
                x: vec![Some(0.0), Some(1.0), None],
                y: vec![Some(0.0), Some(1.0), None],
            },
            None,
        );
        assert_eq!(trace.kind, TraceKind::Shapes);
        assert_eq!(trace.mode, TraceMode::Lines);
        assert!(!trace.hover);
        assert!(!trace.connect_gaps);
        assert_eq!(trace.line.unwrap().color.as_deref(), Some(OVERLAY_COLOR));
        assert!(trace.marker.is_none());
    }

    #[test]
    fn test_points_colored_by_z_first() {
        let trace = Trace::from_chunk(
            ChunkKind::Points {
                x: vec![1.0],
                y: vec![2.0],
                z: Some(vec![3.0]),
            },
            Some(&Distances {
                values: vec![9.0],
                range: None,
            }),
        );
        assert_eq!(trace.marker.unwrap().color.unwrap(), vec![3.0]);
    }

    #[test]
    fn test_points_colored_by_distance_when_flat() {
        let trace = Trace::from_chunk(
            ChunkKind::Points {
                x: vec![1.0],
                y: vec![2.0],
                z: None,
            },
            Some(&Distances {
                values: vec![9.0],
                range: None,
            }),
        );
        assert_eq!(trace.marker.unwrap().color.unwrap(), vec![9.0]);
    }

    #[test]
    fn test_points_fall_back_to_y_color() {
        let trace = Trace::from_chunk(
            ChunkKind::Points {
                x: vec![1.0, 2.0],
                y: vec![3.0, 4.0],
                z: None,
            },
            None,
        );
        assert_eq!(trace.marker.unwrap().color.unwrap(), vec![3.0, 4.0]);
    }

    #[test]
    fn test_polygon_ring_closes() {
        let trace = Trace::from_chunk(
            ChunkKind::Polygon {
                x: vec![0.0, 1.0, 1.0],
                y: vec![0.0, 0.0, 1.0],
            },
            None,
        );
        assert_eq!(trace.mode, TraceMode::LinesMarkers);
        assert_eq!(trace.x.len(), 4);
        assert_eq!(trace.x.last().unwrap(), &Some(0.0));
        assert_eq!(trace.y.last().unwrap(), &Some(0.0));
        assert_eq!(trace.line.unwrap().dash, Some("dash"));
    }

    #[test]
    fn test_closed_ring_left_alone() {
        let trace = Trace::from_chunk(
            ChunkKind::Polygon {
                x: vec![0.0, 1.0, 0.0],
                y: vec![0.0, 1.0, 0.0],
            },
            None,
        );
        assert_eq!(trace.x.len(), 3);
    }

    #[test]
    fn test_mode_serialization() {
        assert_eq!(
            serde_json::to_string(&TraceMode::LinesMarkers).unwrap(),
            "\"lines+markers\""
        );
    }
}
