use std::path::PathBuf;
use thiserror::Error;

/// Failures surfaced by the library outside of individual cleaners.
///
/// Cleaner failures stay on their item as [`crate::cleaner::CleanerError`].
#[derive(Error, Debug)]
pub enum ReclaimError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("cannot query free space of '{path}': {source}")]
    DiskStat {
        path: PathBuf,
        #[source]
        source: nix::Error,
    },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed config '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("{key} = {value} is out of range ({min}..={max})")]
    OutOfRange {
        key: &'static str,
        value: u64,
        min: u64,
        max: u64,
    },

    #[error("unknown cleaner '{id}' in cleaners.disabled (known: {known})")]
    UnknownCleaner { id: String, known: String },
}

pub type Result<T> = std::result::Result<T, ReclaimError>;
