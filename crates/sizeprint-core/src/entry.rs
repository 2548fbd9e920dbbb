//! Walk entries and file metrics.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// A single entry produced by the walker.
///
/// `relative_path` is always relative to `root`, whatever the nesting depth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkEntry {
    /// Root directory the walk started from.
    pub root: PathBuf,
    /// Path of the entry relative to `root`.
    pub relative_path: PathBuf,
    /// Whether the entry is a regular file (after following links).
    pub is_file: bool,
}

impl WalkEntry {
    /// Create a new file entry.
    pub fn file(root: impl Into<PathBuf>, relative_path: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            relative_path: relative_path.into(),
            is_file: true,
        }
    }

    /// Absolute (root-joined) path of the entry.
    pub fn path(&self) -> PathBuf {
        self.root.join(&self.relative_path)
    }
}

/// Sizes measured for one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMetrics {
    /// Path of the file relative to the walk root.
    pub relative_path: PathBuf,
    /// Size in bytes.
    pub raw_size: u64,
    /// Size in bytes of the gzip-compressed content, when measured.
    pub gzipped_size: Option<u64>,
}

impl FileMetrics {
    /// Metrics carrying only the raw size.
    pub fn raw(relative_path: impl Into<PathBuf>, raw_size: u64) -> Self {
        Self {
            relative_path: relative_path.into(),
            raw_size,
            gzipped_size: None,
        }
    }

    /// Metrics carrying both raw and gzipped sizes.
    pub fn gzipped(relative_path: impl Into<PathBuf>, raw_size: u64, gzipped_size: u64) -> Self {
        Self {
            relative_path: relative_path.into(),
            raw_size,
            gzipped_size: Some(gzipped_size),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_path_joins_root() {
        let entry = WalkEntry::file("/input", "subdir/other.txt");
        assert_eq!(entry.path(), PathBuf::from("/input/subdir/other.txt"));
        assert!(entry.is_file);
    }

    #[test]
    fn test_metrics_constructors() {
        let raw = FileMetrics::raw("lorem.txt", 1000);
        assert_eq!(raw.gzipped_size, None);

        let gz = FileMetrics::gzipped("lorem.txt", 1000, 420);
        assert_eq!(gz.raw_size, 1000);
        assert_eq!(gz.gzipped_size, Some(420));
    }
}
