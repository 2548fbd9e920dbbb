//! Per-file size measurement.
//!
//! Two modes:
//! 1. Stat - read only the file's metadata
//! 2. Compress - read the whole content and gzip it at the default level
//!
//! Content is handled as raw bytes, so binary files measure correctly.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use flate2::Compression;
use flate2::write::GzEncoder;

use sizeprint_core::{BuildError, FileMetrics, SizeOptions, WalkEntry};

/// What gets measured for each file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasureMode {
    /// Byte length as recorded by the filesystem.
    Stat,
    /// Byte length of the content and of its gzip-compressed form.
    Compress,
}

impl MeasureMode {
    /// Select the mode from build options.
    pub fn from_options(options: &SizeOptions) -> Self {
        if options.gzipped {
            Self::Compress
        } else {
            Self::Stat
        }
    }
}

/// Measures files on the blocking thread pool.
#[derive(Debug, Clone, Copy)]
pub struct Measurer {
    mode: MeasureMode,
}

impl Measurer {
    /// Create a measurer for the given mode.
    pub fn new(mode: MeasureMode) -> Self {
        Self { mode }
    }

    /// Create a measurer from build options.
    pub fn from_options(options: &SizeOptions) -> Self {
        Self::new(MeasureMode::from_options(options))
    }

    /// The measurement mode.
    pub fn mode(&self) -> MeasureMode {
        self.mode
    }

    /// Measure one walked file.
    pub async fn measure(&self, entry: &WalkEntry) -> Result<FileMetrics, BuildError> {
        let mode = self.mode;
        let path = entry.path();
        let relative_path = entry.relative_path.clone();

        tokio::task::spawn_blocking(move || measure_file(mode, &path, relative_path))
            .await
            .map_err(BuildError::task)?
    }
}

/// Measure the file at `path`, labelling the metrics with `relative_path`.
pub fn measure_file(
    mode: MeasureMode,
    path: &Path,
    relative_path: PathBuf,
) -> Result<FileMetrics, BuildError> {
    match mode {
        MeasureMode::Stat => {
            let metadata = fs::metadata(path).map_err(|e| BuildError::measure(path, e))?;
            Ok(FileMetrics::raw(relative_path, metadata.len()))
        }
        MeasureMode::Compress => {
            let content = fs::read(path).map_err(|e| BuildError::measure(path, e))?;
            let gzipped = gzip_len(&content).map_err(|e| BuildError::compress(path, e))?;
            Ok(FileMetrics::gzipped(relative_path, content.len() as u64, gzipped))
        }
    }
}

/// Length of `content` once wrapped in a gzip container at the default
/// compression level.
pub fn gzip_len(content: &[u8]) -> io::Result<u64> {
    let mut encoder = GzEncoder::new(ByteCounter::default(), Compression::default());
    encoder.write_all(content)?;
    Ok(encoder.finish()?.count)
}

/// Writer that discards bytes and counts them.
#[derive(Debug, Default)]
struct ByteCounter {
    count: u64,
}

impl Write for ByteCounter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.count += buf.len() as u64;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
