//! Saved viewport state, replayed through partial relayout updates.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map};

use crate::renderer::RelayoutPatch;

/// 3-D scene camera.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub eye: [f64; 3],
    #[serde(default)]
    pub center: Option<[f64; 3]>,
    #[serde(default)]
    pub up: Option<[f64; 3]>,
}

/// Pan/zoom/camera state captured from a previous render.
///
/// Replaying a viewport is a `relayout` call, never a full redraw.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    #[serde(default)]
    pub x_range: Option<(f64, f64)>,
    #[serde(default)]
    pub y_range: Option<(f64, f64)>,
    #[serde(default)]
    pub camera: Option<Camera>,
}

impl Viewport {
    pub fn is_empty(&self) -> bool {
        self.x_range.is_none() && self.y_range.is_none() && self.camera.is_none()
    }

    /// Relayout patch restoring this viewport, or nothing when empty.
    pub fn to_patch(&self) -> Option<RelayoutPatch> {
        if self.is_empty() {
            return None;
        }

        let mut patch = Map::new();
        if let Some((min, max)) = self.x_range {
            patch.insert("xaxis.range".to_string(), json!([min, max]));
        }
        if let Some((min, max)) = self.y_range {
            patch.insert("yaxis.range".to_string(), json!([min, max]));
        }
        if let Some(camera) = &self.camera {
            patch.insert("scene.camera".to_string(), json!(camera));
        }
        Some(patch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_viewport_has_no_patch() {
        assert!(Viewport::default().to_patch().is_none());
    }

    #[test]
    fn test_pan_zoom_patch() {
        let viewport = Viewport {
            x_range: Some((0.0, 2.0)),
            y_range: Some((-1.0, 1.0)),
            camera: None,
        };
        let patch = viewport.to_patch().unwrap();
        assert_eq!(patch["xaxis.range"], json!([0.0, 2.0]));
        assert_eq!(patch["yaxis.range"], json!([-1.0, 1.0]));
        assert!(!patch.contains_key("scene.camera"));
    }

    #[test]
    fn test_camera_patch() {
        let viewport = Viewport {
            x_range: None,
            y_range: None,
            camera: Some(Camera {
                eye: [1.0, 1.0, 1.0],
                center: None,
                up: None,
            }),
        };
        let patch = viewport.to_patch().unwrap();
        assert!(patch.contains_key("scene.camera"));
    }
}
