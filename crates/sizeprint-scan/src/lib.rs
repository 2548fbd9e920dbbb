//! Directory walking engine for sizeprint.
//!
//! This crate enumerates every regular file reachable from a root directory,
//! descending into symbolically linked directories, and fans the files out to
//! per-file asynchronous tasks.
//!
//! # Overview
//!
//! - [`Walker`] is a lazy producer: each call to [`Walker::walk`] starts a
//!   fresh enumeration on a blocking thread and yields entries over a bounded
//!   channel.
//! - [`visit_files`] drives a walk and runs one task per file, joined by a
//!   single "all done or first failure" barrier.
//!
//! Symlink cycles are detected by `walkdir`, which checks every followed
//! directory against the ones above it; a cycle is logged and skipped.
//!
//! # Example
//!
//! ```rust,no_run
//! use sizeprint_scan::visit_files;
//!
//! # async fn run() -> Result<(), sizeprint_scan::BuildError> {
//! let count = visit_files("/path/to/dist", 8, |entry| async move {
//!     println!("{}", entry.relative_path.display());
//!     Ok(())
//! })
//! .await?;
//!
//! println!("{count} files");
//! # Ok(())
//! # }
//! ```

mod visit;
mod walker;

pub use visit::visit_files;
pub use walker::{WALK_CHANNEL_SIZE, Walker};

// Re-export core types for convenience
pub use sizeprint_core::{BuildError, WalkEntry};
