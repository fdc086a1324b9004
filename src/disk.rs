//! Filesystem free-space queries.

use std::path::Path;

use nix::sys::statvfs::statvfs;

use crate::error::{ReclaimError, Result};

/// Bytes available to unprivileged users on the filesystem holding `path`.
pub fn available_space(path: &Path) -> Result<u64> {
    let stat = statvfs(path).map_err(|source| ReclaimError::DiskStat {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(stat.blocks_available() as u64 * stat.fragment_size() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_available_space_root() {
        assert!(available_space(Path::new("/")).is_ok());
    }

    #[test]
    fn test_available_space_missing_path() {
        assert!(available_space(Path::new("/nonexistent/reclaim/path")).is_err());
    }
}
