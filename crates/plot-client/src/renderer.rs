//! The renderer seam.
//!
//! The charting engine is a consumed black box: it accepts a trace list, a
//! layout, and a config for a full redraw, and a partial patch for
//! viewport-only updates.

use serde::Serialize;
use serde_json::{Map, Value};

use vino_common::VinoResult;

use crate::layout::Layout;
use crate::trace::Trace;

/// Partial layout update, keyed by dotted layout paths
/// (`xaxis.range`, `scene.camera`, ...).
pub type RelayoutPatch = Map<String, Value>;

/// Renderer configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlotConfig {
    pub responsive: bool,
    pub scroll_zoom: bool,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            responsive: true,
            scroll_zoom: true,
        }
    }
}

/// Black-box charting engine.
pub trait Renderer: Send {
    /// Replace the chart contents in place.
    fn react(&mut self, traces: &[Trace], layout: &Layout, config: &PlotConfig) -> VinoResult<()>;

    /// Apply a viewport-only partial update without a full redraw.
    fn relayout(&mut self, patch: &RelayoutPatch) -> VinoResult<()>;

    /// Drop the current chart.
    fn purge(&mut self);
}

/// Loading state surface (spinner, disabled form fields).
pub trait LoadingIndicator: Send + Sync {
    fn set_loading(&self, loading: bool);
}

/// Indicator that ignores every transition.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopIndicator;

impl LoadingIndicator for NoopIndicator {
    fn set_loading(&self, _loading: bool) {}
}
