//! Symlink-or-copy materialization with a single retry.

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use tracing::{debug, warn};

use sizeprint_core::BuildError;

#[cfg(not(unix))]
use crate::copy::copy_dir_recursive;

/// How the output tree was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterializeMethod {
    /// The output path is a symbolic link to the input directory.
    Symlink,
    /// The input directory was copied recursively.
    Copy,
}

impl fmt::Display for MaterializeMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Symlink => write!(f, "symlink"),
            Self::Copy => write!(f, "copy"),
        }
    }
}

/// Make `output` present the same tree as the `input` directory.
///
/// If the first attempt fails, whatever sits at `output` is removed and the
/// attempt is retried once. `input` is never modified.
pub fn materialize(input: &Path, output: &Path) -> Result<MaterializeMethod, BuildError> {
    let metadata = fs::metadata(input).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => BuildError::NotFound {
            path: input.to_path_buf(),
        },
        _ => BuildError::materialize(input, output, e),
    })?;
    if !metadata.is_dir() {
        return Err(BuildError::NotADirectory {
            path: input.to_path_buf(),
        });
    }

    // A relative link target would resolve against the output's parent.
    let target = std::path::absolute(input).map_err(|e| BuildError::materialize(input, output, e))?;

    let method = match symlink_or_copy(&target, output) {
        Ok(method) => method,
        Err(first) => {
            if fs::symlink_metadata(output).is_ok() {
                warn!(
                    output = %output.display(),
                    error = %first,
                    "Removing stale output before retrying"
                );
                remove_path(output).map_err(|e| BuildError::materialize(input, output, e))?;
            }
            symlink_or_copy(&target, output)
                .map_err(|e| BuildError::materialize(input, output, e))?
        }
    };

    debug!(
        input = %input.display(),
        output = %output.display(),
        %method,
        "Materialized output"
    );
    Ok(method)
}

/// Link `output` to `input`, or copy `input` where links are unavailable.
#[cfg(unix)]
pub fn symlink_or_copy(input: &Path, output: &Path) -> io::Result<MaterializeMethod> {
    std::os::unix::fs::symlink(input, output)?;
    Ok(MaterializeMethod::Symlink)
}

/// Link `output` to `input`, or copy `input` where links are unavailable.
///
/// Creating directory links needs a privilege most accounts lack, so a
/// refused link falls back to a copy unless something occupies `output`.
#[cfg(windows)]
pub fn symlink_or_copy(input: &Path, output: &Path) -> io::Result<MaterializeMethod> {
    match std::os::windows::fs::symlink_dir(input, output) {
        Ok(()) => Ok(MaterializeMethod::Symlink),
        Err(e) if fs::symlink_metadata(output).is_ok() => Err(e),
        Err(_) => {
            copy_dir_recursive(input, output)?;
            Ok(MaterializeMethod::Copy)
        }
    }
}

/// Link `output` to `input`, or copy `input` where links are unavailable.
#[cfg(not(any(unix, windows)))]
pub fn symlink_or_copy(input: &Path, output: &Path) -> io::Result<MaterializeMethod> {
    copy_dir_recursive(input, output)?;
    Ok(MaterializeMethod::Copy)
}

/// Remove a file, link or directory tree without following links.
pub fn remove_path(path: &Path) -> io::Result<()> {
    let file_type = fs::symlink_metadata(path)?.file_type();
    if file_type.is_dir() {
        fs::remove_dir_all(path)
    } else {
        // Directory links on Windows need remove_dir.
        fs::remove_file(path).or_else(|_| fs::remove_dir(path))
    }
}
