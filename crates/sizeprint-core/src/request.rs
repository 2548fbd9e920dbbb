//! Build requests supplied by the build graph.

use std::path::{Path, PathBuf};

use crate::error::BuildError;

/// Input and output paths for one build invocation.
///
/// Only the first input path is materialized and walked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildRequest {
    input_paths: Vec<PathBuf>,
    output_path: PathBuf,
}

impl BuildRequest {
    /// Create a validated build request.
    pub fn new<I, P>(input_paths: I, output_path: impl Into<PathBuf>) -> Result<Self, BuildError>
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let input_paths: Vec<PathBuf> = input_paths.into_iter().map(Into::into).collect();
        let output_path = output_path.into();

        if input_paths.is_empty() {
            return Err(BuildError::InvalidRequest {
                message: "At least one input path is required".to_string(),
            });
        }
        if let Some(empty) = input_paths.iter().position(|p| p.as_os_str().is_empty()) {
            return Err(BuildError::InvalidRequest {
                message: format!("Input path #{empty} is empty"),
            });
        }
        if output_path.as_os_str().is_empty() {
            return Err(BuildError::InvalidRequest {
                message: "Output path cannot be empty".to_string(),
            });
        }

        Ok(Self {
            input_paths,
            output_path,
        })
    }

    /// All input paths, in order.
    pub fn input_paths(&self) -> &[PathBuf] {
        &self.input_paths
    }

    /// The input path that gets materialized and walked.
    pub fn primary_input(&self) -> &Path {
        // Non-empty by construction.
        &self.input_paths[0]
    }

    /// Output directory path.
    pub fn output_path(&self) -> &Path {
        &self.output_path
    }
}
