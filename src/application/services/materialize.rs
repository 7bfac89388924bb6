//! Filesystem materializer
//!
//! Walks a parsed [`TreeArena`] depth-first and creates the entries below a
//! target directory. Existing entries are left alone, so running twice is
//! harmless; only freshly created files receive their inline comment.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::{CommentMarkers, NodeKind, TreeArena, TreeNode};
use crate::infrastructure::traits::FileSystem;

/// What a materialization run did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaterializeReport {
    /// Top-level entries below the target directory
    pub roots: Vec<PathBuf>,
    pub created_dirs: Vec<PathBuf>,
    pub created_files: Vec<PathBuf>,
    /// Entries that were already present and left untouched
    pub existing: Vec<PathBuf>,
    /// Created files that received a comment line
    pub commented: Vec<PathBuf>,
}

impl MaterializeReport {
    pub fn created_count(&self) -> usize {
        self.created_dirs.len() + self.created_files.len()
    }
}

/// Service creating parsed trees on disk.
pub struct MaterializeService {
    fs: Arc<dyn FileSystem>,
    markers: CommentMarkers,
}

impl MaterializeService {
    pub fn new(fs: Arc<dyn FileSystem>, markers: CommentMarkers) -> Self {
        Self { fs, markers }
    }

    /// Create every entry of `tree` below `where_to_create`.
    ///
    /// The target directory is created if missing. Directories come before
    /// their contents. The first failure stops the walk; entries created so
    /// far are kept.
    ///
    /// # Errors
    /// * [`ApplicationError::PathConflict`] if an entry exists with the other type
    /// * [`ApplicationError::Filesystem`] for any I/O failure
    #[instrument(level = "debug", skip(self, tree), fields(entries = tree.len()))]
    pub fn materialize(
        &self,
        tree: &TreeArena,
        where_to_create: &Path,
    ) -> ApplicationResult<MaterializeReport> {
        let mut report = MaterializeReport {
            roots: tree
                .top_level()
                .map(|node| where_to_create.join(&node.name))
                .collect(),
            ..Default::default()
        };

        if self.fs.exists(where_to_create) && !self.fs.is_dir(where_to_create) {
            return Err(ApplicationError::PathConflict {
                path: where_to_create.to_path_buf(),
                expected: "directory",
            });
        }
        self.fs
            .create_dir_all(where_to_create)
            .with_path_context("create target directory", where_to_create)?;

        for (relative, node) in tree.iter() {
            let path = where_to_create.join(&relative);
            match node.kind {
                NodeKind::Directory => self.create_dir(&path, &mut report)?,
                NodeKind::File => self.create_file(&path, node, &mut report)?,
            }
        }

        info!(
            created = report.created_count(),
            existing = report.existing.len(),
            "materialized tree in {}",
            where_to_create.display()
        );
        Ok(report)
    }

    /// Paths that `materialize` would visit, in creation order.
    pub fn plan(&self, tree: &TreeArena, where_to_create: &Path) -> Vec<PathBuf> {
        tree.paths()
            .into_iter()
            .map(|relative| where_to_create.join(relative))
            .collect()
    }

    fn create_dir(&self, path: &Path, report: &mut MaterializeReport) -> ApplicationResult<()> {
        if self.fs.is_dir(path) {
            debug!("directory exists: {}", path.display());
            report.existing.push(path.to_path_buf());
            return Ok(());
        }
        if self.fs.exists(path) {
            return Err(ApplicationError::PathConflict {
                path: path.to_path_buf(),
                expected: "directory",
            });
        }
        self.fs
            .create_dir_all(path)
            .with_path_context("create directory", path)?;
        debug!("created directory: {}", path.display());
        report.created_dirs.push(path.to_path_buf());
        Ok(())
    }

    fn create_file(
        &self,
        path: &Path,
        node: &TreeNode,
        report: &mut MaterializeReport,
    ) -> ApplicationResult<()> {
        if self.fs.is_dir(path) {
            return Err(ApplicationError::PathConflict {
                path: path.to_path_buf(),
                expected: "file",
            });
        }
        if self.fs.exists(path) {
            debug!("file exists, not touching: {}", path.display());
            report.existing.push(path.to_path_buf());
            return Ok(());
        }

        // names like `src/lib.rs` need their intermediate directories
        self.fs
            .ensure_parent(path)
            .with_path_context("create parent directory", path)?;

        let content = node
            .comment
            .as_deref()
            .and_then(|comment| self.markers.render(path, comment))
            .unwrap_or_default();
        if node.comment.is_some() && content.is_empty() {
            debug!("no comment marker for {}, skipping comment", path.display());
        }

        match self.fs.create_new(path, &content) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                report.existing.push(path.to_path_buf());
                return Ok(());
            }
            Err(e) => {
                return Err(ApplicationError::Filesystem {
                    context: format!("create file: {}", path.display()),
                    source: e,
                })
            }
        }

        debug!("created file: {}", path.display());
        report.created_files.push(path.to_path_buf());
        if !content.is_empty() {
            report.commented.push(path.to_path_buf());
        }
        Ok(())
    }
}
