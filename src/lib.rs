//! Create directory trees on disk from `tree`-style text.
//!
//! ```no_run
//! let tree = "
//! example_project/
//! ├── main.py # entry point
//! ├── src/
//! │   └── app.py
//! └── empty_directory/
//! ";
//! let report = creatree::creatree(tree, "/tmp/out").unwrap();
//! assert_eq!(report.roots.len(), 1);
//! ```

use std::path::Path;
use std::sync::Arc;

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;

pub use application::services::{MaterializeReport, MaterializeService};
pub use application::{ApplicationError, ApplicationResult};
pub use domain::{parse, to_dict, DictValue, DomainError, TreeArena, TreeDict, TreeParser};

use domain::CommentMarkers;
use infrastructure::traits::RealFileSystem;

/// Parse `tree` and create it below `where_to_create`.
///
/// Parsing errors are raised before anything is written. Existing entries
/// are kept; only newly created files receive their inline comment.
pub fn creatree(
    tree: &str,
    where_to_create: impl AsRef<Path>,
) -> ApplicationResult<MaterializeReport> {
    let parsed = parse(tree)?;
    MaterializeService::new(Arc::new(RealFileSystem), CommentMarkers::default())
        .materialize(&parsed, where_to_create.as_ref())
}
