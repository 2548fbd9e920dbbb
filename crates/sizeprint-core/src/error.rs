//! Error types for build operations.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can abort a build.
///
/// Every variant is fatal: the build stops and surfaces the first one it
/// observes to the caller.
#[derive(Debug, Error)]
pub enum BuildError {
    /// The output tree could not be linked or copied, even after removing a
    /// stale output and retrying once.
    #[error("Failed to materialize {input} at {output}: {source}")]
    Materialize {
        input: PathBuf,
        output: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Directory enumeration failed.
    #[error("Failed to walk {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A file could not be read or stat'ed.
    #[error("Failed to measure {path}: {source}")]
    Measure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Compressing a file's content failed.
    #[error("Failed to compress {path}: {source}")]
    Compress {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing a report line to the sink failed.
    #[error("Failed to write report line: {source}")]
    Report {
        #[source]
        source: std::io::Error,
    },

    /// Path not found.
    #[error("Path not found: {path}")]
    NotFound { path: PathBuf },

    /// Input path is not a directory.
    #[error("Input path is not a directory: {path}")]
    NotADirectory { path: PathBuf },

    /// The build request is malformed.
    #[error("Invalid build request: {message}")]
    InvalidRequest { message: String },

    /// A spawned task panicked or was cancelled.
    #[error("Task failed: {message}")]
    Task { message: String },
}

impl BuildError {
    /// Create a walk error with path context.
    pub fn walk(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound { path },
            _ => Self::Walk { path, source },
        }
    }

    /// Create a measurement error with path context.
    pub fn measure(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Measure {
            path: path.into(),
            source,
        }
    }

    /// Create a compression error with path context.
    pub fn compress(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Compress {
            path: path.into(),
            source,
        }
    }

    /// Create a materialization error.
    pub fn materialize(
        input: impl Into<PathBuf>,
        output: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::Materialize {
            input: input.into(),
            output: output.into(),
            source,
        }
    }

    /// Create a task error from anything displayable (usually a join error).
    pub fn task(error: impl std::fmt::Display) -> Self {
        Self::Task {
            message: error.to_string(),
        }
    }

}
