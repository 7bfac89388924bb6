//! Loading tree text from a file or standard input

use std::path::Path;

use tracing::debug;

use crate::infrastructure::error::{InfraError, InfraResult};
use crate::infrastructure::traits::{FileSystem, InputReader};

/// Read the tree string from `path`, or from `stdin` when no path is given.
pub fn read_tree_input(
    fs: &dyn FileSystem,
    stdin: &dyn InputReader,
    path: Option<&Path>,
) -> InfraResult<String> {
    match path {
        Some(path) => {
            if !fs.exists(path) {
                return Err(InfraError::InputNotFound(path.to_path_buf()));
            }
            if !fs.is_file(path) {
                return Err(InfraError::NotAFile(path.to_path_buf()));
            }
            debug!("reading tree from {}", path.display());
            fs.read_to_string(path)
                .map_err(|e| InfraError::io(format!("read {}", path.display()), e))
        }
        None => {
            debug!("reading tree from stdin");
            stdin
                .read_all()
                .map_err(|e| InfraError::io("read stdin", e))
        }
    }
}
