//! Recursive directory copy.

use std::fs;
use std::io;
use std::path::Path;

use tracing::warn;
use walkdir::WalkDir;

/// Recursively copy a directory, following symbolic links.
///
/// Linked files and directories are copied as regular content. Links that
/// lead back into a directory being copied are skipped. Returns the number
/// of bytes copied.
pub fn copy_dir_recursive(source: &Path, dest: &Path) -> io::Result<u64> {
    if !fs::metadata(source)?.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("Not a directory: {}", source.display()),
        ));
    }

    let mut total_bytes = 0u64;

    for entry in WalkDir::new(source).follow_links(true) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) if err.loop_ancestor().is_some() => {
                let path = err.path().unwrap_or(source);
                warn!(path = %path.display(), "Skipping symlink cycle while copying");
                continue;
            }
            Err(err) => return Err(err.into()),
        };

        let relative = entry.path().strip_prefix(source).map_err(io::Error::other)?;
        let dest_path = dest.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&dest_path)?;
        } else if entry.file_type().is_file() {
            total_bytes += fs::copy(entry.path(), &dest_path)?;
        }
    }

    Ok(total_bytes)
}
