//! Core types and errors for sizeprint.
//!
//! This crate provides the data structures shared by every stage of a
//! sizeprint build: the immutable options record, the build request handed
//! over by the build graph, the entries produced by the walker and the
//! metrics produced by measurement.

mod config;
mod entry;
mod error;
mod request;

pub use config::{DEFAULT_CONCURRENCY, SizeOptions, SizeOptionsBuilder};
pub use entry::{FileMetrics, WalkEntry};
pub use error::BuildError;
pub use request::BuildRequest;
