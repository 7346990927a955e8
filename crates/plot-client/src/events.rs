//! Plot lifecycle events.
//!
//! A first-class publish/subscribe surface composed into components that
//! need it, instead of inheritance from a host event-target base.

use tokio::sync::broadcast;

use vino_common::VinoId;

/// Lifecycle of one plot request.
#[derive(Debug, Clone, PartialEq)]
pub enum PlotEvent {
    /// Fetches issued, loading indicator on.
    LoadStarted { id: Option<VinoId> },
    /// Renderer invoked with the full trace list.
    Plotted { id: Option<VinoId>, traces: usize },
    /// A fetch or decode failed; the previous chart is left untouched.
    PlotFailed { id: Option<VinoId> },
}

/// Broadcast bus for plot events. Cloning shares the channel.
#[derive(Debug, Clone)]
pub struct EventBus {
    tx: broadcast::Sender<PlotEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Register a subscriber. Events published before this call are not
    /// replayed.
    pub fn subscribe(&self) -> broadcast::Receiver<PlotEvent> {
        self.tx.subscribe()
    }

    /// Publish to all current subscribers. Publishing with no subscribers
    /// is not an error.
    pub fn publish(&self, event: PlotEvent) {
        let _ = self.tx.send(event);
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(16)
    }
}
