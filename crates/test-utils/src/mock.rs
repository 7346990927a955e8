//! Mock implementations of the plot-client seams.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use plot_client::layout::Layout;
use plot_client::reconciler::FormControls;
use plot_client::renderer::{LoadingIndicator, PlotConfig, RelayoutPatch, Renderer};
use plot_client::source::DataSource;
use plot_client::trace::Trace;
use vino_common::{DatasetInfo, Format, Plane, Ppa, VinoError, VinoId, VinoResult};
use vino_protocol::DataChunk;

/// Scripted response for one path.
#[derive(Debug, Clone)]
enum MockResponse {
    Json(String),
    Fail(String),
}

/// Data source answering from scripted per-path responses, recording every
/// chunk fetch.
#[derive(Default)]
pub struct MockDataSource {
    infos: HashMap<VinoId, DatasetInfo>,
    responses: HashMap<String, MockResponse>,
    calls: Mutex<Vec<String>>,
    info_calls: Mutex<Vec<VinoId>>,
}

impl MockDataSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_info(mut self, info: DatasetInfo) -> Self {
        self.infos.insert(info.id, info);
        self
    }

    /// Script a JSON chunk for a path.
    pub fn with_chunk(mut self, path: &str, json: &str) -> Self {
        self.responses
            .insert(path.to_string(), MockResponse::Json(json.to_string()));
        self
    }

    /// Script a fetch failure for a path.
    pub fn with_failure(mut self, path: &str, message: &str) -> Self {
        self.responses
            .insert(path.to_string(), MockResponse::Fail(message.to_string()));
        self
    }

    /// Chunk paths fetched so far, in completion order.
    pub fn chunk_calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Info fetches so far.
    pub fn info_calls(&self) -> Vec<VinoId> {
        self.info_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl DataSource for MockDataSource {
    async fn fetch_info(&self, id: VinoId) -> VinoResult<DatasetInfo> {
        self.info_calls.lock().unwrap().push(id);
        self.infos
            .get(&id)
            .cloned()
            .ok_or_else(|| VinoError::FetchError(format!("no such dataset: {}", id)))
    }

    async fn fetch_chunk(&self, path: &str) -> VinoResult<DataChunk> {
        self.calls.lock().unwrap().push(path.to_string());
        match self.responses.get(path) {
            Some(MockResponse::Json(json)) => serde_json::from_str(json)
                .map_err(|e| VinoError::DecodeError(format!("mock chunk: {}", e))),
            Some(MockResponse::Fail(message)) => {
                Err(VinoError::FetchError(message.clone()))
            }
            None => Err(VinoError::FetchError(format!("unscripted path: {}", path))),
        }
    }
}

/// One full-redraw invocation captured by [`RecordingRenderer`].
#[derive(Debug, Clone)]
pub struct RenderCall {
    pub traces: Vec<Trace>,
    pub layout: Layout,
    pub config: PlotConfig,
}

/// Renderer that records every call instead of drawing.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub reacts: Vec<RenderCall>,
    pub relayouts: Vec<RelayoutPatch>,
    pub purges: usize,
}

impl Renderer for RecordingRenderer {
    fn react(&mut self, traces: &[Trace], layout: &Layout, config: &PlotConfig) -> VinoResult<()> {
        self.reacts.push(RenderCall {
            traces: traces.to_vec(),
            layout: layout.clone(),
            config: *config,
        });
        Ok(())
    }

    fn relayout(&mut self, patch: &RelayoutPatch) -> VinoResult<()> {
        self.relayouts.push(patch.clone());
        Ok(())
    }

    fn purge(&mut self) {
        self.purges += 1;
    }
}

/// Loading indicator counting transitions.
#[derive(Debug, Default)]
pub struct CountingIndicator {
    loading: AtomicBool,
    on: AtomicUsize,
    off: AtomicUsize,
}

impl CountingIndicator {
    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    pub fn times_on(&self) -> usize {
        self.on.load(Ordering::SeqCst)
    }

    pub fn times_off(&self) -> usize {
        self.off.load(Ordering::SeqCst)
    }
}

impl LoadingIndicator for CountingIndicator {
    fn set_loading(&self, loading: bool) {
        self.loading.store(loading, Ordering::SeqCst);
        if loading {
            self.on.fetch_add(1, Ordering::SeqCst);
        } else {
            self.off.fetch_add(1, Ordering::SeqCst);
        }
    }
}

/// In-memory form controls with every flag observable.
#[derive(Debug, Clone)]
pub struct MockForm {
    pub dataset: Option<VinoId>,
    pub format: Option<Format>,
    pub ppa: String,
    pub section: bool,
    pub section_available: bool,
    pub section_locked: bool,
    pub distance: bool,
    pub shapes: bool,
    pub shapes_available: bool,
    pub format_locked: bool,
    pub plane: Plane,
    pub slice_values: Vec<f64>,
    pub slice_bounds: Vec<(usize, u32)>,
    pub slice_rebuilds: usize,
    pub ppa_invalid: bool,
}

impl Default for MockForm {
    fn default() -> Self {
        Self {
            dataset: None,
            format: None,
            ppa: String::new(),
            section: false,
            section_available: false,
            section_locked: false,
            distance: false,
            shapes: false,
            shapes_available: false,
            format_locked: false,
            plane: Plane(0, 1),
            slice_values: Vec::new(),
            slice_bounds: Vec::new(),
            slice_rebuilds: 0,
            ppa_invalid: false,
        }
    }
}

impl MockForm {
    /// Form with a dataset preselected, as after page load.
    pub fn selecting(id: u32) -> Self {
        Self {
            dataset: Some(VinoId(id)),
            ..Self::default()
        }
    }
}

impl FormControls for MockForm {
    fn dataset_id(&self) -> Option<VinoId> {
        self.dataset
    }

    fn format(&self) -> Option<Format> {
        self.format
    }

    fn ppa_text(&self) -> String {
        self.ppa.clone()
    }

    fn section(&self) -> bool {
        self.section
    }

    fn distance(&self) -> bool {
        self.distance
    }

    fn shapes(&self) -> bool {
        self.shapes
    }

    fn plane(&self) -> Plane {
        self.plane
    }

    fn slice_positions(&self) -> Vec<f64> {
        self.slice_values.clone()
    }

    fn set_format(&mut self, format: Option<Format>) {
        self.format = format;
    }

    fn set_ppa(&mut self, ppa: &Ppa) {
        self.ppa = ppa.to_string();
    }

    fn set_section(&mut self, on: bool) {
        self.section = on;
    }

    fn set_section_locked(&mut self, locked: bool) {
        self.section_locked = locked;
    }

    fn set_section_available(&mut self, available: bool) {
        self.section_available = available;
    }

    fn set_shapes_available(&mut self, available: bool) {
        // Disabling the checkbox does not uncheck it.
        self.shapes_available = available;
    }

    fn set_format_locked(&mut self, locked: bool) {
        self.format_locked = locked;
    }

    fn rebuild_slice_controls(&mut self, bounds: &[(usize, u32)]) {
        self.slice_bounds = bounds.to_vec();
        self.slice_values = vec![0.0; bounds.len()];
        self.slice_rebuilds += 1;
    }

    fn set_ppa_invalid(&mut self, invalid: bool) {
        self.ppa_invalid = invalid;
    }
}
