//! Per-file task fan-out over a walk.

use std::future::Future;
use std::path::PathBuf;

use tokio::task::{JoinError, JoinSet};
use tracing::debug;

use sizeprint_core::{BuildError, WalkEntry};

use crate::walker::Walker;

/// Walk `root` and run `on_file` for every regular file.
///
/// Each file gets its own task; at most `concurrency` of them run at once.
/// Completes once every task has completed. The first error, whether from
/// the walk or from a task, stops new tasks from being started and is
/// returned after the tasks already in flight have settled.
///
/// Returns the number of files handed to `on_file`.
pub async fn visit_files<F, Fut>(
    root: impl Into<PathBuf>,
    concurrency: usize,
    mut on_file: F,
) -> Result<u64, BuildError>
where
    F: FnMut(WalkEntry) -> Fut,
    Fut: Future<Output = Result<(), BuildError>> + Send + 'static,
{
    let walker = Walker::new(root);
    let mut entries = walker.walk();

    let limit = concurrency.max(1);
    let mut tasks = JoinSet::new();
    let mut first_error: Option<BuildError> = None;
    let mut visited = 0u64;

    loop {
        // A slot is only freed by joining its task, so a failed task is
        // always seen before the next file is handed out.
        if tasks.len() >= limit {
            if let Some(Err(err)) = tasks.join_next().await.map(flatten) {
                first_error = Some(err);
                break;
            }
            continue;
        }

        tokio::select! {
            biased;

            Some(joined) = tasks.join_next(), if !tasks.is_empty() => {
                if let Err(err) = flatten(joined) {
                    first_error = Some(err);
                    break;
                }
            }

            next = entries.recv() => match next {
                Some(Ok(entry)) => {
                    tasks.spawn(on_file(entry));
                    visited += 1;
                }
                Some(Err(err)) => {
                    first_error = Some(err);
                    break;
                }
                None => break,
            },
        }
    }

    // Closing the channel stops the producer.
    drop(entries);

    while let Some(joined) = tasks.join_next().await {
        if let Err(err) = flatten(joined) {
            first_error.get_or_insert(err);
        }
    }

    match first_error {
        Some(err) => {
            debug!(root = %walker.root().display(), visited, error = %err, "Walk aborted");
            Err(err)
        }
        None => {
            debug!(root = %walker.root().display(), visited, "Walk finished");
            Ok(visited)
        }
    }
}

fn flatten(joined: Result<Result<(), BuildError>, JoinError>) -> Result<(), BuildError> {
    joined.map_err(BuildError::task)?
}
