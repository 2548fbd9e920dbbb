//! sizeprint - pass a directory through and print the size of every file.
//!
//! Usage:
//!   sizeprint <INPUT>... --output <DIR>     Link/copy the first input, print sizes
//!   sizeprint dist -o out --no-gzip          Raw sizes only
//!   sizeprint --help                         Show help

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{Context, Result};
use tracing_subscriber::EnvFilter;

use sizeprint::{BuildRequest, Buildable, FileSizeNode, SizeOptions};

#[derive(Parser)]
#[command(
    name = "sizeprint",
    version,
    about = "Pass a directory through and print the size of every file",
    long_about = "sizeprint links (or copies) the first INPUT directory to OUTPUT and prints \
                  one line per file with its size and, by default, its gzipped size.\n\n\
                  Set RUST_LOG to see what it does along the way."
)]
struct Cli {
    /// Input directories (only the first one is passed through and reported)
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Output path the first input is materialized at
    #[arg(short, long)]
    output: PathBuf,

    /// Only report raw sizes (stat files instead of reading and compressing them)
    #[arg(long)]
    no_gzip: bool,

    /// Print lines without terminal colors
    #[arg(long)]
    no_color: bool,

    /// Maximum number of files measured at once (0 = auto)
    #[arg(short = 'j', long, default_value = "0")]
    jobs: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let options = SizeOptions::builder()
        .gzipped(!cli.no_gzip)
        .colors(!cli.no_color)
        .concurrency(cli.jobs)
        .build()
        .context("Invalid options")?;

    let node = FileSizeNode::new(cli.inputs.clone(), options);
    let request = BuildRequest::new(cli.inputs, cli.output).context("Invalid build request")?;

    node.build(&request).await.context("Build failed")?;

    Ok(())
}
