//! Mock record store and payload sinks for cloudform.
//!
//! This crate provides the collaborators a [`cloudform_core::CloudForm`]
//! talks to: an in-memory dataset that answers lookups after a simulated
//! delay, and sinks that print or record submitted payloads.

mod dataset;
mod sink;

pub use dataset::{DatasetError, MockDataset};
pub use sink::{ConsoleSink, MemorySink};
