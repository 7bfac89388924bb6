use std::path::{Path, PathBuf};

/// Forward slashes only; tree strings written on Windows use `\`.
pub fn normalize_path_separator(s: &str) -> String {
    s.replace('\\', "/")
}

/// Absolute form of `path` without touching the filesystem.
///
/// Relative paths are resolved against the current working directory.
pub fn absolutize(path: &Path) -> std::io::Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}

/// `'a', 'b'` list used in user-facing messages.
pub fn quote_paths(paths: &[PathBuf]) -> String {
    itertools::join(paths.iter().map(|p| format!("'{}'", p.display())), ", ")
}
