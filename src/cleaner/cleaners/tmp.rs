//! System temporary directory cleaner.

use std::fs;
use std::path::PathBuf;

use walkdir::WalkDir;

use crate::cleaner::fs::remove_paths;
use crate::cleaner::{Cleaner, CleanerError};

const DEFAULT_ROOTS: &[&str] = &["/tmp", "/var/tmp", "/var/crash"];

/// Empties the system temp directories.
///
/// Entries named `.X*` (X11 sockets and locks) are left in place.
pub struct TmpCleaner {
    roots: Vec<PathBuf>,
}

impl TmpCleaner {
    pub fn new() -> Self {
        Self {
            roots: DEFAULT_ROOTS.iter().map(PathBuf::from).collect(),
        }
    }

    pub fn with_roots(roots: Vec<PathBuf>) -> Self {
        Self { roots }
    }

    fn removable_entries(&self) -> Vec<PathBuf> {
        self.roots
            .iter()
            .filter_map(|root| fs::read_dir(root).ok())
            .flat_map(|entries| entries.flatten())
            .filter(|e| !e.file_name().to_string_lossy().starts_with(".X"))
            .map(|e| e.path())
            .collect()
    }
}

impl Default for TmpCleaner {
    fn default() -> Self {
        Self::new()
    }
}

impl Cleaner for TmpCleaner {
    fn id(&self) -> &'static str {
        "tmp"
    }

    fn name(&self) -> &str {
        "System Temp Files"
    }

    fn requires_privilege(&self) -> bool {
        true
    }

    fn scan(&self) -> Result<u64, CleanerError> {
        // Sockets and device nodes are not counted.
        Ok(self
            .removable_entries()
            .iter()
            .flat_map(|entry| WalkDir::new(entry).into_iter().flatten())
            .filter(|e| e.file_type().is_file())
            .filter_map(|e| e.metadata().ok())
            .map(|m| m.len())
            .sum())
    }

    fn clean(&self) -> Result<(), CleanerError> {
        remove_paths(&self.removable_entries())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_requires_privilege() {
        assert!(TmpCleaner::new().requires_privilege());
        assert_eq!(TmpCleaner::new().id(), "tmp");
    }

    #[test]
    fn test_clean_keeps_x11_entries() {
        let tmp = TempDir::new().unwrap();
        let x11 = tmp.path().join(".X11-unix");
        fs::create_dir(&x11).unwrap();
        fs::write(x11.join("X0"), "x".repeat(10)).unwrap();
        fs::write(tmp.path().join("scratch.txt"), "x".repeat(30)).unwrap();
        let sub = tmp.path().join("build-123");
        fs::create_dir(&sub).unwrap();
        fs::write(sub.join("obj.o"), "x".repeat(70)).unwrap();

        let cleaner = TmpCleaner::with_roots(vec![tmp.path().to_path_buf()]);
        assert_eq!(cleaner.scan().unwrap(), 100);

        cleaner.clean().unwrap();
        assert!(x11.join("X0").exists());
        assert!(!sub.exists());
        assert!(!tmp.path().join("scratch.txt").exists());
    }

    #[test]
    fn test_unreadable_root_is_skipped() {
        let cleaner = TmpCleaner::with_roots(vec![PathBuf::from("/nonexistent/reclaim-test")]);
        assert_eq!(cleaner.scan().unwrap(), 0);
        assert!(cleaner.clean().is_ok());
    }
}
