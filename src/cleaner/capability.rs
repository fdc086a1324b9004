//! Core trait and types for cleaners.

use std::path::PathBuf;
use thiserror::Error;

/// A file discovered by an itemized cleaner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDetail {
    pub path: PathBuf,
    pub size: u64,
}

/// Failure of a single scan or clean unit.
#[derive(Error, Debug)]
pub enum CleanerError {
    #[error("home directory could not be determined")]
    NoHomeDir,

    #[error("IO error at path '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{failed} path(s) could not be removed, first: {first}")]
    PartialRemoval { failed: usize, first: PathBuf },

    #[error("worker could not be started: {0}")]
    Spawn(#[source] std::io::Error),
}

/// Trait for a unit of disk-space discovery and reclamation.
///
/// Cleaners are shared between the event loop and worker threads, so any
/// state carried from `scan` to `clean` must use interior mutability.
pub trait Cleaner: Send + Sync {
    /// Stable identifier (e.g., "trash"), used by configuration.
    fn id(&self) -> &'static str;

    /// Human-readable name shown in the list.
    fn name(&self) -> &str;

    /// Bytes that `clean` would free.
    fn scan(&self) -> Result<u64, CleanerError>;

    /// Remove what `scan` found.
    fn clean(&self) -> Result<(), CleanerError>;

    /// Whether the cleaner only works with root privileges.
    fn requires_privilege(&self) -> bool {
        false
    }

    /// Itemized view, for cleaners that support per-file selection.
    fn as_itemized(&self) -> Option<&dyn ItemizedCleaner> {
        None
    }
}

/// A cleaner whose findings can be selected file by file.
pub trait ItemizedCleaner {
    /// Files discovered by the last scan.
    fn found_files(&self) -> Vec<FileDetail>;

    /// Restrict the next `clean` to `paths`. An empty list means every
    /// discovered file.
    fn set_files_to_clean(&self, paths: Vec<PathBuf>);
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockCleaner;

    impl Cleaner for MockCleaner {
        fn id(&self) -> &'static str {
            "mock"
        }

        fn name(&self) -> &str {
            "Mock Cleaner"
        }

        fn scan(&self) -> Result<u64, CleanerError> {
            Ok(42)
        }

        fn clean(&self) -> Result<(), CleanerError> {
            Ok(())
        }
    }

    #[test]
    fn test_trait_defaults() {
        let cleaner = MockCleaner;
        assert!(!cleaner.requires_privilege());
        assert!(cleaner.as_itemized().is_none());
        assert_eq!(cleaner.scan().unwrap(), 42);
    }

    #[test]
    fn test_partial_removal_message() {
        let err = CleanerError::PartialRemoval {
            failed: 2,
            first: PathBuf::from("/tmp/a"),
        };
        let msg = err.to_string();
        assert!(msg.contains("2 path(s)"));
        assert!(msg.contains("/tmp/a"));
    }
}
