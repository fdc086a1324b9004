//! Rotated system log cleaner.

use std::path::PathBuf;

use walkdir::WalkDir;

use crate::cleaner::fs::remove_paths;
use crate::cleaner::{Cleaner, CleanerError};

const ROTATED_SUFFIXES: &[&str] = &[".gz", ".1", ".old"];

/// Removes rotated and compressed logs under `/var/log`.
pub struct LogCleaner {
    root: PathBuf,
}

impl LogCleaner {
    pub fn new() -> Self {
        Self {
            root: PathBuf::from("/var/log"),
        }
    }

    pub fn with_root(root: PathBuf) -> Self {
        Self { root }
    }

    fn rotated_logs(&self) -> Vec<(PathBuf, u64)> {
        WalkDir::new(&self.root)
            .into_iter()
            .flatten()
            .filter(|e| e.file_type().is_file())
            .filter(|e| {
                let name = e.file_name().to_string_lossy();
                ROTATED_SUFFIXES.iter().any(|s| name.ends_with(s))
            })
            .filter_map(|e| {
                let len = e.metadata().ok()?.len();
                Some((e.into_path(), len))
            })
            .collect()
    }
}

impl Default for LogCleaner {
    fn default() -> Self {
        Self::new()
    }
}

impl Cleaner for LogCleaner {
    fn id(&self) -> &'static str {
        "logs"
    }

    fn name(&self) -> &str {
        "System Logs"
    }

    fn requires_privilege(&self) -> bool {
        true
    }

    fn scan(&self) -> Result<u64, CleanerError> {
        Ok(self.rotated_logs().iter().map(|(_, len)| len).sum())
    }

    fn clean(&self) -> Result<(), CleanerError> {
        let paths: Vec<PathBuf> = self.rotated_logs().into_iter().map(|(p, _)| p).collect();
        remove_paths(&paths)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_only_rotated_logs_are_counted() {
        let tmp = TempDir::new().unwrap();
        let nginx = tmp.path().join("nginx");
        fs::create_dir(&nginx).unwrap();
        fs::write(tmp.path().join("syslog"), "x".repeat(500)).unwrap();
        fs::write(tmp.path().join("syslog.1"), "x".repeat(40)).unwrap();
        fs::write(nginx.join("access.log.2.gz"), "x".repeat(60)).unwrap();
        fs::write(tmp.path().join("dpkg.log.old"), "x".repeat(5)).unwrap();

        let cleaner = LogCleaner::with_root(tmp.path().to_path_buf());
        assert_eq!(cleaner.scan().unwrap(), 105);

        cleaner.clean().unwrap();
        assert!(tmp.path().join("syslog").exists());
        assert!(!tmp.path().join("syslog.1").exists());
        assert!(!nginx.join("access.log.2.gz").exists());
        assert_eq!(cleaner.scan().unwrap(), 0);
    }

    #[test]
    fn test_requires_privilege() {
        assert!(LogCleaner::new().requires_privilege());
    }
}
