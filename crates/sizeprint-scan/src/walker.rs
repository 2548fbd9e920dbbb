//! Recursive, symlink-following directory walker.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tokio::sync::mpsc;
use tracing::warn;
use walkdir::WalkDir;

use sizeprint_core::{BuildError, WalkEntry};

/// Default channel buffer size between the walker and its consumer.
pub const WALK_CHANNEL_SIZE: usize = 100;

type EntryResult = Result<WalkEntry, BuildError>;

/// Lazily enumerates every regular file under a root directory.
///
/// Symbolic links to directories are descended into as if the linked
/// subtree were inlined; links that lead back into a directory on the
/// current descent path are skipped. Entries within a directory are
/// produced in file name order.
#[derive(Debug, Clone)]
pub struct Walker {
    root: PathBuf,
    channel_size: usize,
}

impl Walker {
    /// Create a walker rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            channel_size: WALK_CHANNEL_SIZE,
        }
    }

    /// Set how many entries may be buffered ahead of the consumer.
    pub fn with_channel_size(mut self, channel_size: usize) -> Self {
        self.channel_size = channel_size.max(1);
        self
    }

    /// Root directory of the walk.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Start a fresh walk on a blocking thread.
    ///
    /// Returns a receiver yielding one entry per regular file. An error
    /// ends the stream. Dropping the receiver stops the walk.
    ///
    /// Must be called from within a tokio runtime.
    pub fn walk(&self) -> mpsc::Receiver<EntryResult> {
        let (tx, rx) = mpsc::channel(self.channel_size);
        let root = self.root.clone();

        tokio::task::spawn_blocking(move || {
            if let Err(err) = walk_blocking(&root, &tx) {
                let _ = tx.blocking_send(Err(err));
            }
        });

        rx
    }

    /// Walk to completion and collect every entry.
    pub async fn collect(&self) -> Result<Vec<WalkEntry>, BuildError> {
        let mut rx = self.walk();
        let mut entries = Vec::new();
        while let Some(entry) = rx.recv().await {
            entries.push(entry?);
        }
        Ok(entries)
    }
}

fn walk_blocking(root: &Path, tx: &mpsc::Sender<EntryResult>) -> Result<(), BuildError> {
    let metadata = fs::metadata(root).map_err(|e| BuildError::walk(root, e))?;
    if !metadata.is_dir() {
        return Err(BuildError::NotADirectory {
            path: root.to_path_buf(),
        });
    }

    let walk = WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .min_depth(1);

    for entry in walk {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) if err.loop_ancestor().is_some() => {
                warn!(path = %err.path().unwrap_or(root).display(), "Skipping symlink cycle");
                continue;
            }
            Err(err) => return Err(walk_error(root, err)),
        };

        // With links followed, the file type is the target's.
        if !entry.file_type().is_file() {
            continue;
        }

        let relative_path = entry
            .path()
            .strip_prefix(root)
            .map_err(|e| BuildError::walk(entry.path(), io::Error::other(e)))?;

        if tx
            .blocking_send(Ok(WalkEntry::file(root, relative_path)))
            .is_err()
        {
            break;
        }
    }

    Ok(())
}

fn walk_error(root: &Path, err: walkdir::Error) -> BuildError {
    let path = err.path().unwrap_or(root).to_path_buf();
    BuildError::walk(path, err.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_tree() -> TempDir {
        let temp = TempDir::new().unwrap();
        let root = temp.path();

        fs::create_dir_all(root.join("dir1/subdir")).unwrap();
        fs::create_dir(root.join("dir2")).unwrap();

        fs::write(root.join("file1.txt"), "hello").unwrap();
        fs::write(root.join("dir1/file2.txt"), "world world world").unwrap();
        fs::write(root.join("dir1/subdir/file3.txt"), "test").unwrap();
        fs::write(root.join("dir2/file4.txt"), "another file here").unwrap();

        temp
    }

    fn relative_paths(entries: &[WalkEntry]) -> Vec<PathBuf> {
        entries.iter().map(|e| e.relative_path.clone()).collect()
    }

    #[tokio::test]
    async fn test_walk_lists_every_file_relative_to_root() {
        let temp = create_test_tree();
        let entries = Walker::new(temp.path()).collect().await.unwrap();

        assert_eq!(
            relative_paths(&entries),
            vec![
                PathBuf::from("dir1/file2.txt"),
                PathBuf::from("dir1/subdir/file3.txt"),
                PathBuf::from("dir2/file4.txt"),
                PathBuf::from("file1.txt"),
            ]
        );
        assert!(entries.iter().all(|e| e.is_file && e.root == temp.path()));
    }

    #[tokio::test]
    async fn test_walk_empty_directory() {
        let temp = TempDir::new().unwrap();
        let entries = Walker::new(temp.path()).collect().await.unwrap();
        assert!(entries.is_empty());
    }

    #[tokio::test]
    async fn test_walk_missing_root() {
        let temp = TempDir::new().unwrap();
        let result = Walker::new(temp.path().join("missing")).collect().await;
        assert!(matches!(result, Err(BuildError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_walk_root_is_file() {
        let temp = create_test_tree();
        let result = Walker::new(temp.path().join("file1.txt")).collect().await;
        assert!(matches!(result, Err(BuildError::NotADirectory { .. })));
    }

    #[tokio::test]
    async fn test_walk_restarts_per_call() {
        let temp = create_test_tree();
        let walker = Walker::new(temp.path()).with_channel_size(1);

        let first = walker.collect().await.unwrap();
        let second = walker.collect().await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_dropping_receiver_stops_walk() {
        let temp = create_test_tree();
        let mut rx = Walker::new(temp.path()).with_channel_size(1).walk();

        let first = rx.recv().await.unwrap().unwrap();
        assert_eq!(first.relative_path, PathBuf::from("dir1/file2.txt"));
        drop(rx);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_walk_follows_directory_symlinks() {
        let temp = create_test_tree();
        let outside = TempDir::new().unwrap();
        fs::write(outside.path().join("linked.txt"), "linked").unwrap();
        std::os::unix::fs::symlink(outside.path(), temp.path().join("link")).unwrap();

        let entries = Walker::new(temp.path()).collect().await.unwrap();
        assert!(relative_paths(&entries).contains(&PathBuf::from("link/linked.txt")));
        assert_eq!(entries.len(), 5);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_walk_skips_symlink_cycles() {
        let temp = create_test_tree();
        std::os::unix::fs::symlink(temp.path(), temp.path().join("dir1/loop")).unwrap();

        let entries = Walker::new(temp.path()).collect().await.unwrap();
        assert_eq!(entries.len(), 4);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_walk_visits_shared_target_under_each_link() {
        let temp = TempDir::new().unwrap();
        let shared = TempDir::new().unwrap();
        fs::write(shared.path().join("a.txt"), "a").unwrap();
        std::os::unix::fs::symlink(shared.path(), temp.path().join("one")).unwrap();
        std::os::unix::fs::symlink(shared.path(), temp.path().join("two")).unwrap();

        let entries = Walker::new(temp.path()).collect().await.unwrap();
        assert_eq!(
            relative_paths(&entries),
            vec![PathBuf::from("one/a.txt"), PathBuf::from("two/a.txt")]
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_walk_fails_on_broken_symlink() {
        let temp = create_test_tree();
        std::os::unix::fs::symlink(temp.path().join("nowhere"), temp.path().join("broken"))
            .unwrap();

        let result = Walker::new(temp.path()).collect().await;
        assert!(matches!(result, Err(BuildError::NotFound { .. })));
    }
}
