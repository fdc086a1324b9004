use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where log output is written while the TUI owns the terminal
    pub log_file: Option<PathBuf>,
    pub cleaners: CleanersConfig,
    pub large_files: LargeFilesConfig,
    pub tui: TuiConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CleanersConfig {
    /// Cleaner ids to leave out of the run
    pub disabled: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LargeFilesConfig {
    /// Files must be strictly larger than this to be listed
    pub min_size_mb: u64,
    /// Files must not have been modified for this many days
    pub min_age_days: u64,
    /// Directory to search (defaults to the home directory)
    pub root: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TuiConfig {
    /// Input poll timeout and redraw cadence in milliseconds
    pub tick_rate_ms: u64,
    /// Start with every runnable cleaner selected
    pub preselect: bool,
}

impl Default for LargeFilesConfig {
    fn default() -> Self {
        Self {
            min_size_mb: 100,
            min_age_days: 30,
            root: None,
        }
    }
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: 100,
            preselect: false,
        }
    }
}

impl Config {
    /// Load configuration from `path`, or from the default location.
    ///
    /// An explicit path must exist. A missing default file yields the
    /// built-in defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, required) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => match Self::default_path() {
                Some(p) => (p, false),
                None => return Ok(Self::default()),
            },
        };

        if !required && !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;

        let config: Config =
            toml::from_str(&contents).map_err(|source| ConfigError::Parse {
                path: path.clone(),
                source,
            })?;

        config.validate()?;
        Ok(config)
    }

    /// `$XDG_CONFIG_HOME/reclaim/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("reclaim").join("config.toml"))
    }

    /// `$XDG_CACHE_HOME/reclaim/reclaim.log`
    pub fn default_log_path() -> Option<PathBuf> {
        dirs::cache_dir().map(|d| d.join("reclaim").join("reclaim.log"))
    }

    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        check_range("tui.tick_rate_ms", self.tui.tick_rate_ms, 1, MAX_TICK_RATE_MS)?;
        check_range("large_files.min_size_mb", self.large_files.min_size_mb, 1, MAX_MIN_SIZE_MB)?;
        check_range("large_files.min_age_days", self.large_files.min_age_days, 0, MAX_MIN_AGE_DAYS)?;
        Ok(())
    }
}

/// One minute.
const MAX_TICK_RATE_MS: u64 = 60_000;
/// 1 PiB expressed in MiB.
const MAX_MIN_SIZE_MB: u64 = 1 << 30;
/// A century.
const MAX_MIN_AGE_DAYS: u64 = 36_500;

fn check_range(key: &'static str, value: u64, min: u64, max: u64) -> std::result::Result<(), ConfigError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { key, value, min, max })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.large_files.min_size_mb, 100);
        assert_eq!(config.large_files.min_age_days, 30);
        assert!(!config.tui.preselect);
    }

    #[test]
    fn config_serializes_to_toml() {
        let config = Config::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[large_files]"));
        assert!(toml_str.contains("[tui]"));
    }

    #[test]
    fn zero_tick_rate_is_rejected() {
        let mut config = Config::default();
        config.tui.tick_rate_ms = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::OutOfRange { key: "tui.tick_rate_ms", .. })
        ));
    }

    #[test]
    fn huge_min_size_is_rejected() {
        let mut config = Config::default();
        config.large_files.min_size_mb = i64::MAX as u64;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::OutOfRange { key: "large_files.min_size_mb", .. })
        ));

        config.large_files.min_size_mb = MAX_MIN_SIZE_MB;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn huge_min_age_is_rejected() {
        let mut config = Config::default();
        config.large_files.min_age_days = 1 << 32;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::OutOfRange { key: "large_files.min_age_days", .. })
        ));

        config.large_files.min_age_days = 0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn nothing_disabled_by_default() {
        assert!(CleanersConfig::default().disabled.is_empty());
    }
}
