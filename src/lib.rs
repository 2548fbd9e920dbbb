//! sizeprint - pass a directory tree through a build step and print the size
//! of every file in it.
//!
//! A [`FileSizeNode`] is a build-graph node. When built, it materializes its
//! first input directory at the output path (a symbolic link when possible,
//! a recursive copy otherwise), then walks the input, following symbolic
//! links, and reports one line per file:
//!
//! ```text
//! lorem.txt => 1000 B (446 B gzipped)
//! subdir/other.txt => 50 B (68 B gzipped)
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use sizeprint::{Buildable, BuildRequest, FileSizeNode, SizeOptions};
//!
//! # async fn run() -> Result<(), sizeprint::BuildError> {
//! let node = FileSizeNode::new("dist", SizeOptions::default());
//! let request = BuildRequest::new(node.inputs().to_vec(), "out/dist")?;
//! let outcome = node.build(&request).await?;
//! println!("{} files", outcome.files_reported);
//! # Ok(())
//! # }
//! ```

mod node;

pub use node::{BuildOutcome, Buildable, FileSizeNode, InputNodes};

// Re-export the pieces a build graph needs to drive a node.
pub use sizeprint_core::{BuildError, BuildRequest, FileMetrics, SizeOptions, SizeOptionsBuilder};
pub use sizeprint_ops::MaterializeMethod;
pub use sizeprint_report::{LineBuffer, Reporter, format_line, format_size};
