//! Cleaners that wipe fixed directories under the user's home.

use std::path::PathBuf;

use crate::cleaner::fs::{home_dir, remove_paths, total_size};
use crate::cleaner::{Cleaner, CleanerError};

const BROWSER_CACHES: &[&str] = &[
    ".cache/google-chrome",
    ".cache/chromium",
    ".cache/mozilla/firefox",
    ".cache/BraveSoftware",
];

/// Removes a fixed set of directories relative to the home directory.
///
/// The directories are removed whole; the owning tools recreate them on
/// demand.
pub struct HomeCacheCleaner {
    id: &'static str,
    name: &'static str,
    relative: &'static [&'static str],
    home: Option<PathBuf>,
}

impl HomeCacheCleaner {
    /// Files in the desktop trash.
    pub fn trash() -> Self {
        Self::new("trash", "User Trash", &[".local/share/Trash"])
    }

    /// Cached thumbnail images.
    pub fn thumbnails() -> Self {
        Self::new("thumbnails", "User Cache (Thumbnails)", &[".cache/thumbnails"])
    }

    /// Downloaded crates and git checkouts.
    pub fn cargo() -> Self {
        Self::new(
            "cargo",
            "Cargo Cache (Rust)",
            &[
                ".cargo/registry/cache",
                ".cargo/registry/src",
                ".cargo/git/db",
                ".cargo/git/checkouts",
            ],
        )
    }

    /// Browser disk caches. Profiles live elsewhere and are untouched.
    pub fn browsers() -> Self {
        Self::new("browsers", "Browser Caches", BROWSER_CACHES)
    }

    /// Caches that Electron apps keep under `~/.config`.
    pub fn app_caches() -> Self {
        Self::new(
            "app-caches",
            "App Specific Caches",
            &[
                ".config/discord/Cache",
                ".config/discord/Code Cache",
                ".config/discord/DawnCache",
                ".config/Slack/Cache",
                ".config/Slack/Code Cache",
                ".config/Slack/Service Worker/CacheStorage",
                ".config/Code/Cache",
                ".config/Code/CachedData",
                ".config/Code/CachedExtensionVSIXs",
                ".config/spotify/Storage",
            ],
        )
    }

    /// The npm content-addressable cache.
    pub fn npm() -> Self {
        Self::new("npm", "NPM Cache", &[".npm/_cacache"])
    }

    fn new(id: &'static str, name: &'static str, relative: &'static [&'static str]) -> Self {
        Self {
            id,
            name,
            relative,
            home: None,
        }
    }

    /// Resolve targets against `home` instead of the real home directory.
    pub fn with_home(mut self, home: PathBuf) -> Self {
        self.home = Some(home);
        self
    }

    fn targets(&self) -> Result<Vec<PathBuf>, CleanerError> {
        let home = match &self.home {
            Some(h) => h.clone(),
            None => home_dir()?,
        };
        Ok(self.relative.iter().map(|r| home.join(r)).collect())
    }
}

impl Cleaner for HomeCacheCleaner {
    fn id(&self) -> &'static str {
        self.id
    }

    fn name(&self) -> &str {
        self.name
    }

    fn scan(&self) -> Result<u64, CleanerError> {
        Ok(total_size(&self.targets()?))
    }

    fn clean(&self) -> Result<(), CleanerError> {
        remove_paths(&self.targets()?)
    }
}
