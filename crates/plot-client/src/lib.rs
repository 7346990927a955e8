//! Client-side plot controller for vino datasets.
//!
//! Two cooperating components, both stateless across page sessions:
//!
//! - the **reconciler** ([`Reconciler`]) reads form controls, derives a
//!   canonical [`RequestedState`](vino_common::RequestedState), and triggers
//!   a re-plot only on a valid, dirty transition;
//! - the **plot session** ([`PlotSession`]) turns a committed state into
//!   concurrent backend fetches, merges the resulting chunks into traces,
//!   and invokes the renderer exactly once.
//!
//! The charting engine, the REST backend, and the form widgets stay behind
//! the [`Renderer`], [`DataSource`], and [`FormControls`] seams.

pub mod cache;
pub mod deeplink;
pub mod events;
pub mod layout;
pub mod reconciler;
pub mod renderer;
pub mod session;
pub mod source;
pub mod trace;
pub mod viewport;

pub use cache::DatasetInfoCache;
pub use deeplink::{parse_fragment, DeepLink};
pub use events::{EventBus, PlotEvent};
pub use layout::{axis_range_patch, grid_tick_patch, layout_for, Layout};
pub use reconciler::{default_ppa, FormControls, PlotPlan, Reconciler};
pub use renderer::{LoadingIndicator, NoopIndicator, PlotConfig, RelayoutPatch, Renderer};
pub use session::PlotSession;
pub use source::{DataSource, HttpDataSource};
pub use trace::{Trace, TraceKind, TraceMode};
pub use viewport::{Camera, Viewport};

// The merged-info record flows through session callbacks; re-export it so
// consumers need not depend on the protocol crate directly.
pub use vino_protocol::MergedInfo;
