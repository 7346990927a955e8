//! Wire contract of the vino REST backend.
//!
//! This crate owns the two boundaries between the client and the backend:
//! composing request URLs from a [`RequestedState`](vino_common::RequestedState)
//! and decoding response chunks into tagged trace inputs.

pub mod chunk;
pub mod urls;

pub use chunk::{ChunkKind, DataChunk, Distances, MergedInfo};
pub use urls::{data_url, info_url, UrlSuffix};
