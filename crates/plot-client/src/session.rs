//! The plot session: one request, one render.
//!
//! A session is constructed per plot request, collects fetch paths and
//! post-render callbacks, and is consumed by [`PlotSession::show`]. Fetches
//! run concurrently and join all-or-fail; the renderer is invoked exactly
//! once on success and not at all on failure. The loading indicator is
//! released on every exit path.

use std::sync::Arc;

use futures::future::try_join_all;
use tracing::{debug, info, warn};

use vino_common::VinoResult;
use vino_protocol::{ChunkKind, MergedInfo};

use crate::events::{EventBus, PlotEvent};
use crate::layout::layout_for;
use crate::reconciler::PlotPlan;
use crate::renderer::{LoadingIndicator, PlotConfig, RelayoutPatch, Renderer};
use crate::source::DataSource;
use crate::trace::Trace;

type PostRender<R> = Box<dyn FnOnce(&MergedInfo, &mut R) -> VinoResult<()> + Send>;

/// One plot request in flight. Never reused: a new session is created per
/// `show` cycle, so no state bleeds across requests.
pub struct PlotSession<S, R> {
    source: Arc<S>,
    indicator: Arc<dyn LoadingIndicator>,
    events: EventBus,
    config: PlotConfig,
    paths: Vec<String>,
    postprocess: Vec<PostRender<R>>,
    info: MergedInfo,
}

impl<S: DataSource, R: Renderer> PlotSession<S, R> {
    pub fn new(source: Arc<S>, indicator: Arc<dyn LoadingIndicator>, events: EventBus) -> Self {
        Self {
            source,
            indicator,
            events,
            config: PlotConfig::default(),
            paths: Vec::new(),
            postprocess: Vec::new(),
            info: MergedInfo::default(),
        }
    }

    /// Session pre-loaded with a reconciled plan's fetch paths.
    pub fn for_plan(
        source: Arc<S>,
        indicator: Arc<dyn LoadingIndicator>,
        events: EventBus,
        plan: &PlotPlan,
    ) -> Self {
        let mut session = Self::new(source, indicator, events);
        for url in &plan.urls {
            session.trace(url.clone());
        }
        session
    }

    pub fn with_config(mut self, config: PlotConfig) -> Self {
        self.config = config;
        self
    }

    /// Seed the merged info before any chunk arrives, e.g. from the cached
    /// metadata document. Chunk echoes still overwrite seeded values.
    pub fn seed_info(&mut self, info: MergedInfo) -> &mut Self {
        self.info = info;
        self
    }

    /// Enqueue one fetch. Results are consumed in enqueue order.
    pub fn trace(&mut self, path: impl Into<String>) -> &mut Self {
        self.paths.push(path.into());
        self
    }

    /// Register a post-render callback; callbacks run in registration order
    /// after the renderer has been invoked.
    pub fn after(
        &mut self,
        callback: impl FnOnce(&MergedInfo, &mut R) -> VinoResult<()> + Send + 'static,
    ) -> &mut Self {
        self.postprocess.push(Box::new(callback));
        self
    }

    /// Register a viewport-only update derived from the merged info, applied
    /// after the render.
    pub fn relayout_with(
        &mut self,
        patch: impl FnOnce(&MergedInfo) -> Option<RelayoutPatch> + Send + 'static,
    ) -> &mut Self {
        self.after(move |info, renderer| match patch(info) {
            Some(patch) => renderer.relayout(&patch),
            None => Ok(()),
        })
    }

    /// Fetch everything, render once, run the postprocess queue.
    ///
    /// All enqueued fetches run concurrently and fail as a group: if any one
    /// fails, the renderer is not invoked and the previous chart stays. The
    /// loading indicator ends off on both paths.
    pub async fn show(mut self, renderer: &mut R) -> VinoResult<usize> {
        self.indicator.set_loading(true);
        let _loading = LoadingGuard(Arc::clone(&self.indicator));

        self.events.publish(PlotEvent::LoadStarted { id: self.info.id });

        match self.run(renderer).await {
            Ok(traces) => {
                info!(traces, "plotted");
                self.events.publish(PlotEvent::Plotted {
                    id: self.info.id,
                    traces,
                });
                Ok(traces)
            }
            Err(error) => {
                warn!(%error, "plot request failed");
                self.events.publish(PlotEvent::PlotFailed { id: self.info.id });
                Err(error)
            }
        }
    }

    async fn run(&mut self, renderer: &mut R) -> VinoResult<usize> {
        debug!(fetches = self.paths.len(), "issuing plot fetches");

        let source = Arc::clone(&self.source);
        let chunks =
            try_join_all(self.paths.iter().map(|path| source.fetch_chunk(path))).await?;

        let mut traces = Vec::with_capacity(chunks.len());
        for chunk in &chunks {
            let kind = ChunkKind::classify(chunk)?;
            traces.push(Trace::from_chunk(kind, chunk.distances.as_ref()));
            self.info.absorb(chunk);
        }

        let layout = layout_for(&self.info);
        renderer.react(&traces, &layout, &self.config)?;

        for callback in std::mem::take(&mut self.postprocess) {
            callback(&self.info, renderer)?;
        }

        Ok(traces.len())
    }
}

/// Turns the loading indicator off when dropped, whatever the exit path.
struct LoadingGuard(Arc<dyn LoadingIndicator>);

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.0.set_loading(false);
    }
}
