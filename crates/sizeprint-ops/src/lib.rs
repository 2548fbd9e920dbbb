//! Output tree materialization for sizeprint.
//!
//! Makes an output path present the same file tree as an input directory,
//! preferring a symbolic link and falling back to a recursive copy. A stale
//! object already sitting at the output path is removed and the attempt is
//! retried exactly once.

mod copy;
mod materialize;

pub use copy::copy_dir_recursive;
pub use materialize::{MaterializeMethod, materialize, remove_path, symlink_or_copy};
