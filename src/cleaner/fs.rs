//! Filesystem helpers shared by the built-in cleaners.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use walkdir::WalkDir;

use super::CleanerError;

/// Sum of regular file sizes below `path`. Unreadable entries are skipped.
pub fn dir_size(path: &Path) -> u64 {
    WalkDir::new(path)
        .into_iter()
        .flatten()
        .filter(|e| e.file_type().is_file())
        .filter_map(|e| e.metadata().ok())
        .map(|m| m.len())
        .sum()
}

/// Sizes several roots in parallel.
pub fn total_size(paths: &[PathBuf]) -> u64 {
    paths.par_iter().map(|p| dir_size(p)).sum()
}

/// Remove every path, continuing past failures.
///
/// Paths that no longer exist count as removed.
pub fn remove_paths<P: AsRef<Path>>(paths: &[P]) -> Result<(), CleanerError> {
    let mut failed = Vec::new();

    for path in paths {
        let path = path.as_ref();
        if let Err(e) = remove_path(path) {
            tracing::warn!(path = %path.display(), error = %e, "Failed to remove");
            failed.push(path.to_path_buf());
        }
    }

    match failed.first() {
        None => Ok(()),
        Some(first) => Err(CleanerError::PartialRemoval {
            failed: failed.len(),
            first: first.clone(),
        }),
    }
}

fn remove_path(path: &Path) -> io::Result<()> {
    let meta = match fs::symlink_metadata(path) {
        Ok(m) => m,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(e),
    };

    if meta.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    }
}

/// The current user's home directory.
pub fn home_dir() -> Result<PathBuf, CleanerError> {
    dirs::home_dir().ok_or(CleanerError::NoHomeDir)
}
