//! File size measurement and reporting for sizeprint.
//!
//! - **Measurement** - raw size from metadata, or raw plus gzipped size from
//!   the file's content
//! - **Reporting** - one human-readable line per file, written atomically to
//!   an injected sink
//!
//! ```rust,ignore
//! use sizeprint_report::{Measurer, Reporter};
//! use sizeprint_core::{SizeOptions, WalkEntry};
//!
//! let options = SizeOptions::default();
//! let measurer = Measurer::from_options(&options);
//! let reporter = Reporter::stdout(options.colors);
//!
//! let metrics = measurer.measure(&WalkEntry::file("dist", "app.js")).await?;
//! reporter.report(&metrics)?;
//! // app.js => 12.4 KiB (3.91 KiB gzipped)
//! ```

mod measure;
mod reporter;

pub use measure::{MeasureMode, Measurer, gzip_len, measure_file};
pub use reporter::{LineBuffer, Reporter, format_line, format_size};

// Re-export core types
pub use sizeprint_core::{BuildError, FileMetrics, SizeOptions, WalkEntry};
