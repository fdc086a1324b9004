//! Everything else under `~/.cache`.

use std::fs;
use std::io;
use std::path::PathBuf;

use crate::cleaner::fs::{home_dir, remove_paths, total_size};
use crate::cleaner::{Cleaner, CleanerError};

/// Top-level `~/.cache` entries owned by other cleaners, plus our own log
/// directory.
const EXCLUDED: &[&str] = &[
    "thumbnails",
    "google-chrome",
    "chromium",
    "mozilla",
    "BraveSoftware",
    "reclaim",
];

/// Removes top-level entries of `~/.cache` not claimed by a more specific
/// cleaner.
pub struct UserCacheCleaner {
    home: Option<PathBuf>,
}

impl UserCacheCleaner {
    pub fn new() -> Self {
        Self { home: None }
    }

    pub fn with_home(home: PathBuf) -> Self {
        Self { home: Some(home) }
    }

    fn cache_dir(&self) -> Result<PathBuf, CleanerError> {
        let home = match &self.home {
            Some(h) => h.clone(),
            None => home_dir()?,
        };
        Ok(home.join(".cache"))
    }

    fn entries(&self) -> Result<Vec<PathBuf>, CleanerError> {
        let dir = self.cache_dir()?;
        let read = match fs::read_dir(&dir) {
            Ok(read) => read,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => return Err(CleanerError::Io { path: dir, source }),
        };

        Ok(read
            .flatten()
            .filter(|e| !EXCLUDED.iter().any(|x| e.file_name() == *x))
            .map(|e| e.path())
            .collect())
    }
}

impl Default for UserCacheCleaner {
    fn default() -> Self {
        Self::new()
    }
}

impl Cleaner for UserCacheCleaner {
    fn id(&self) -> &'static str {
        "user-cache"
    }

    fn name(&self) -> &str {
        "Other User Caches"
    }

    fn scan(&self) -> Result<u64, CleanerError> {
        Ok(total_size(&self.entries()?))
    }

    fn clean(&self) -> Result<(), CleanerError> {
        remove_paths(&self.entries()?)
    }
}
