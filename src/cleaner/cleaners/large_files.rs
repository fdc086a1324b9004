//! Large, long-untouched files under the home directory.
//!
//! This is the one itemized cleaner: the TUI lists every file it finds and
//! the user picks which ones go.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, SystemTime};

use walkdir::{DirEntry, WalkDir};

use crate::cleaner::fs::{home_dir, remove_paths};
use crate::cleaner::{Cleaner, CleanerError, FileDetail, ItemizedCleaner};
use crate::config::LargeFilesConfig;

const MB: u64 = 1024 * 1024;
const DAY_SECS: u64 = 24 * 60 * 60;

pub struct LargeFileCleaner {
    name: String,
    root: Option<PathBuf>,
    min_size: u64,
    min_age: Duration,
    found: Mutex<Vec<FileDetail>>,
    targets: Mutex<Vec<PathBuf>>,
}

impl LargeFileCleaner {
    pub fn new(config: &LargeFilesConfig) -> Self {
        Self {
            name: format!(
                "Large Unused Files (>{}MB, >{}d)",
                config.min_size_mb, config.min_age_days
            ),
            root: config.root.clone(),
            min_size: config.min_size_mb.saturating_mul(MB),
            min_age: Duration::from_secs(config.min_age_days.saturating_mul(DAY_SECS)),
            found: Mutex::new(Vec::new()),
            targets: Mutex::new(Vec::new()),
        }
    }

    /// Override the thresholds in bytes and seconds.
    pub fn with_thresholds(mut self, min_size: u64, min_age: Duration) -> Self {
        self.min_size = min_size;
        self.min_age = min_age;
        self
    }

    pub fn with_root(mut self, root: PathBuf) -> Self {
        self.root = Some(root);
        self
    }

    fn qualifies(&self, entry: &DirEntry, now: SystemTime) -> Option<FileDetail> {
        let meta = entry.metadata().ok()?;
        if meta.len() <= self.min_size {
            return None;
        }
        let age = now
            .duration_since(meta.modified().ok()?)
            .unwrap_or(Duration::ZERO);
        if age < self.min_age {
            return None;
        }
        Some(FileDetail {
            path: entry.path().to_path_buf(),
            size: meta.len(),
        })
    }
}

fn is_hidden_dir(entry: &DirEntry, root: &Path) -> bool {
    entry.file_type().is_dir()
        && entry.path() != root
        && entry.file_name().to_string_lossy().starts_with('.')
}

impl Cleaner for LargeFileCleaner {
    fn id(&self) -> &'static str {
        "large-files"
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn scan(&self) -> Result<u64, CleanerError> {
        let root = match &self.root {
            Some(r) => r.clone(),
            None => home_dir()?,
        };
        let now = SystemTime::now();

        let mut files: Vec<FileDetail> = WalkDir::new(&root)
            .into_iter()
            .filter_entry(|e| !is_hidden_dir(e, &root))
            .flatten()
            .filter(|e| e.file_type().is_file())
            .filter_map(|e| self.qualifies(&e, now))
            .collect();
        files.sort_by(|a, b| b.size.cmp(&a.size).then_with(|| a.path.cmp(&b.path)));

        let total = files.iter().map(|f| f.size).sum();
        tracing::debug!(count = files.len(), total, "Large file scan finished");

        *self.found.lock().unwrap_or_else(PoisonError::into_inner) = files;
        Ok(total)
    }

    fn clean(&self) -> Result<(), CleanerError> {
        let targets = self
            .targets
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();

        if !targets.is_empty() {
            return remove_paths(&targets);
        }

        let all: Vec<PathBuf> = self.found_files().into_iter().map(|f| f.path).collect();
        remove_paths(&all)
    }

    fn as_itemized(&self) -> Option<&dyn ItemizedCleaner> {
        Some(self)
    }
}

impl ItemizedCleaner for LargeFileCleaner {
    fn found_files(&self) -> Vec<FileDetail> {
        self.found
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn set_files_to_clean(&self, paths: Vec<PathBuf>) {
        *self.targets.lock().unwrap_or_else(PoisonError::into_inner) = paths;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn cleaner_for(root: &Path) -> LargeFileCleaner {
        LargeFileCleaner::new(&LargeFilesConfig::default())
            .with_root(root.to_path_buf())
            .with_thresholds(100, Duration::ZERO)
    }

    #[test]
    fn test_name_reflects_thresholds() {
        let cleaner = LargeFileCleaner::new(&LargeFilesConfig::default());
        assert_eq!(cleaner.name(), "Large Unused Files (>100MB, >30d)");
        assert_eq!(cleaner.id(), "large-files");
        assert!(cleaner.as_itemized().is_some());
    }

    #[test]
    fn test_scan_finds_large_files_sorted_by_size() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("small.txt"), "x".repeat(50)).unwrap();
        fs::write(tmp.path().join("medium.bin"), "x".repeat(200)).unwrap();
        let videos = tmp.path().join("videos");
        fs::create_dir(&videos).unwrap();
        fs::write(videos.join("big.mkv"), "x".repeat(500)).unwrap();

        let cleaner = cleaner_for(tmp.path());
        assert_eq!(cleaner.scan().unwrap(), 700);

        let found = cleaner.found_files();
        assert_eq!(found.len(), 2);
        assert!(found[0].path.ends_with("big.mkv"));
        assert_eq!(found[1].size, 200);
    }

    #[test]
    fn test_hidden_directories_are_skipped() {
        let tmp = TempDir::new().unwrap();
        let hidden = tmp.path().join(".local");
        fs::create_dir(&hidden).unwrap();
        fs::write(hidden.join("huge.db"), "x".repeat(1000)).unwrap();

        let cleaner = cleaner_for(tmp.path());
        assert_eq!(cleaner.scan().unwrap(), 0);
        assert!(cleaner.found_files().is_empty());
    }

    #[test]
    fn test_recent_files_are_ignored() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("fresh.bin"), "x".repeat(500)).unwrap();

        let cleaner = LargeFileCleaner::new(&LargeFilesConfig::default())
            .with_root(tmp.path().to_path_buf())
            .with_thresholds(100, Duration::from_secs(DAY_SECS));
        assert_eq!(cleaner.scan().unwrap(), 0);
    }

    #[test]
    fn test_extreme_thresholds_saturate() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("fresh.bin"), "x".repeat(500)).unwrap();

        let config = LargeFilesConfig {
            min_size_mb: u64::MAX,
            min_age_days: 1 << 32,
            root: Some(tmp.path().to_path_buf()),
        };
        let cleaner = LargeFileCleaner::new(&config);
        assert_eq!(cleaner.scan().unwrap(), 0);

        let config = LargeFilesConfig {
            min_size_mb: 0,
            ..config
        };
        let cleaner = LargeFileCleaner::new(&config);
        assert_eq!(cleaner.scan().unwrap(), 0);
    }

    #[test]
    fn test_clean_only_chosen_subset() {
        let tmp = TempDir::new().unwrap();
        let keep = tmp.path().join("keep.bin");
        let drop = tmp.path().join("drop.bin");
        fs::write(&keep, "x".repeat(300)).unwrap();
        fs::write(&drop, "x".repeat(400)).unwrap();

        let cleaner = cleaner_for(tmp.path());
        cleaner.scan().unwrap();
        cleaner.set_files_to_clean(vec![drop.clone()]);
        cleaner.clean().unwrap();

        assert!(keep.exists());
        assert!(!drop.exists());
    }

    #[test]
    fn test_clean_without_subset_removes_everything_found() {
        let tmp = TempDir::new().unwrap();
        let a = tmp.path().join("a.bin");
        let b = tmp.path().join("b.bin");
        fs::write(&a, "x".repeat(300)).unwrap();
        fs::write(&b, "x".repeat(400)).unwrap();

        let cleaner = cleaner_for(tmp.path());
        cleaner.scan().unwrap();
        cleaner.clean().unwrap();

        assert!(!a.exists());
        assert!(!b.exists());
    }
}
