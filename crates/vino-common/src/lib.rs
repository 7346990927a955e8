//! Common types shared across all vino-viz crates.

pub mod error;
pub mod format;
pub mod info;
pub mod ppa;
pub mod state;

pub use error::{VinoError, VinoResult};
pub use format::Format;
pub use info::{AxisDescriptor, DatasetInfo, GridInfo, OriginalInfo, VariableDescriptor};
pub use ppa::Ppa;
pub use state::{Plane, RequestedState, VinoId};
