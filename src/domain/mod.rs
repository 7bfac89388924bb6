//! Domain layer: tree grammar, parsed structure and comment markers
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod entities;
pub mod error;
pub mod markers;
pub mod parser;

pub use arena::{TreeArena, TreeNode, ROOT_NAME};
pub use entities::*;
pub use error::{DomainError, DomainResult};
pub use markers::{CommentMarkers, CommentStyle};
pub use parser::{parse, TreeParser, DEFAULT_COMMENT_DELIMITER};

/// Project a parsed tree into a plain ordered mapping.
pub fn to_dict(tree: &TreeArena, include_comments: bool) -> TreeDict {
    tree.to_dict(include_comments)
}

/// Expand `~`, `$VAR` and `${VAR}` in a path string.
///
/// Uses shellexpand crate for robust expansion.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}
