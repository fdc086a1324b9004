//! Cleaner registry.

use std::collections::HashSet;
use std::sync::Arc;

use crate::cleaner::cleaners::all_cleaners;
use crate::cleaner::Cleaner;
use crate::config::{Config, LargeFilesConfig};
use crate::error::ConfigError;

/// The fixed, ordered set of cleaners for one run.
#[derive(Clone)]
pub struct CleanerRegistry {
    cleaners: Vec<Arc<dyn Cleaner>>,
}

impl CleanerRegistry {
    /// Create a registry with all built-in cleaners and default settings.
    pub fn new() -> Self {
        Self {
            cleaners: all_cleaners(&LargeFilesConfig::default()),
        }
    }

    /// Build the registry described by `config`.
    ///
    /// Fails if `cleaners.disabled` names an unknown cleaner.
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let all = all_cleaners(&config.large_files);
        let known: HashSet<&str> = all.iter().map(|c| c.id()).collect();

        if let Some(unknown) = config
            .cleaners
            .disabled
            .iter()
            .find(|id| !known.contains(id.as_str()))
        {
            return Err(ConfigError::UnknownCleaner {
                id: unknown.clone(),
                known: all.iter().map(|c| c.id()).collect::<Vec<_>>().join(", "),
            });
        }

        let disabled: HashSet<&str> = config.cleaners.disabled.iter().map(|s| s.as_str()).collect();
        Ok(Self {
            cleaners: all
                .into_iter()
                .filter(|c| !disabled.contains(c.id()))
                .collect(),
        })
    }

    /// Build a registry from an explicit list.
    pub fn from_cleaners(cleaners: Vec<Arc<dyn Cleaner>>) -> Self {
        Self { cleaners }
    }

    /// Get all registered cleaners.
    pub fn cleaners(&self) -> &[Arc<dyn Cleaner>] {
        &self.cleaners
    }

    /// Get a cleaner by ID.
    pub fn get(&self, id: &str) -> Option<&Arc<dyn Cleaner>> {
        self.cleaners.iter().find(|c| c.id() == id)
    }

    /// List all cleaner IDs.
    pub fn ids(&self) -> Vec<&str> {
        self.cleaners.iter().map(|c| c.id()).collect()
    }

    pub fn len(&self) -> usize {
        self.cleaners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cleaners.is_empty()
    }
}

impl Default for CleanerRegistry {
    fn default() -> Self {
        Self::new()
    }
}
