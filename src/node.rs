//! The file size build node.

use std::future::Future;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::info;

use sizeprint_core::{BuildError, BuildRequest, SizeOptions};
use sizeprint_ops::{MaterializeMethod, materialize};
use sizeprint_report::{Measurer, Reporter};
use sizeprint_scan::visit_files;

/// Capabilities a build graph needs from a node.
pub trait Buildable {
    /// Input paths declared when the node was constructed.
    fn inputs(&self) -> &[PathBuf];

    /// Run one build for the paths the graph supplies.
    fn build(
        &self,
        request: &BuildRequest,
    ) -> impl Future<Output = Result<BuildOutcome, BuildError>> + Send;
}

/// Result of a successful build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildOutcome {
    /// How the output tree was produced.
    pub method: MaterializeMethod,
    /// Number of files reported.
    pub files_reported: u64,
}

/// One or many input paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputNodes(Vec<PathBuf>);

impl InputNodes {
    /// The paths, in order.
    pub fn into_vec(self) -> Vec<PathBuf> {
        self.0
    }
}

impl From<PathBuf> for InputNodes {
    fn from(path: PathBuf) -> Self {
        Self(vec![path])
    }
}

impl From<&Path> for InputNodes {
    fn from(path: &Path) -> Self {
        Self(vec![path.to_path_buf()])
    }
}

impl From<&str> for InputNodes {
    fn from(path: &str) -> Self {
        Self(vec![PathBuf::from(path)])
    }
}

impl From<String> for InputNodes {
    fn from(path: String) -> Self {
        Self(vec![PathBuf::from(path)])
    }
}

impl<P: Into<PathBuf>> From<Vec<P>> for InputNodes {
    fn from(paths: Vec<P>) -> Self {
        Self(paths.into_iter().map(Into::into).collect())
    }
}

impl<P: Into<PathBuf>, const N: usize> From<[P; N]> for InputNodes {
    fn from(paths: [P; N]) -> Self {
        Self(paths.into_iter().map(Into::into).collect())
    }
}

/// Passes its first input through to the output and prints the size of
/// every file in it.
pub struct FileSizeNode<W = io::Stdout> {
    inputs: Vec<PathBuf>,
    options: SizeOptions,
    reporter: Arc<Reporter<W>>,
}

impl FileSizeNode<io::Stdout> {
    /// Create a node reporting to standard output.
    pub fn new(inputs: impl Into<InputNodes>, options: SizeOptions) -> Self {
        let reporter = Reporter::stdout(options.colors);
        Self::with_reporter(inputs, options, reporter)
    }
}

impl<W: Write + Send + 'static> FileSizeNode<W> {
    /// Create a node reporting to `sink`.
    pub fn with_sink(inputs: impl Into<InputNodes>, options: SizeOptions, sink: W) -> Self {
        let reporter = Reporter::new(sink, options.colors);
        Self::with_reporter(inputs, options, reporter)
    }

    fn with_reporter(
        inputs: impl Into<InputNodes>,
        options: SizeOptions,
        reporter: Reporter<W>,
    ) -> Self {
        Self {
            inputs: inputs.into().into_vec(),
            options,
            reporter: Arc::new(reporter),
        }
    }

    /// The node's options.
    pub fn options(&self) -> &SizeOptions {
        &self.options
    }

    /// Build into `output` using the node's own inputs.
    pub async fn build_to(&self, output: impl Into<PathBuf>) -> Result<BuildOutcome, BuildError> {
        let request = BuildRequest::new(self.inputs.clone(), output)?;
        self.build(&request).await
    }
}

impl<W: Write + Send + 'static> Buildable for FileSizeNode<W> {
    fn inputs(&self) -> &[PathBuf] {
        &self.inputs
    }

    fn build(
        &self,
        request: &BuildRequest,
    ) -> impl Future<Output = Result<BuildOutcome, BuildError>> + Send {
        let input = request.primary_input().to_path_buf();
        let output = request.output_path().to_path_buf();
        let concurrency = self.options.effective_concurrency();
        let measurer = Measurer::from_options(&self.options);
        let reporter = Arc::clone(&self.reporter);

        async move {
            info!(input = %input.display(), output = %output.display(), "Building");

            let method = {
                let (input, output) = (input.clone(), output.clone());
                tokio::task::spawn_blocking(move || materialize(&input, &output))
                    .await
                    .map_err(BuildError::task)??
            };

            let files_reported = visit_files(input, concurrency, move |entry| {
                let reporter = Arc::clone(&reporter);
                async move {
                    let metrics = measurer.measure(&entry).await?;
                    reporter.report(&metrics)
                }
            })
            .await?;

            info!(files = files_reported, %method, "Build finished");
            Ok(BuildOutcome {
                method,
                files_reported,
            })
        }
    }
}
