//! Built-in cleaners.

mod home_cache;
mod large_files;
mod logs;
mod tmp;
mod user_cache;

pub use home_cache::HomeCacheCleaner;
pub use large_files::LargeFileCleaner;
pub use logs::LogCleaner;
pub use tmp::TmpCleaner;
pub use user_cache::UserCacheCleaner;

use std::sync::Arc;

use crate::cleaner::Cleaner;
use crate::config::LargeFilesConfig;

/// Returns all built-in cleaners, in display order.
pub fn all_cleaners(large_files: &LargeFilesConfig) -> Vec<Arc<dyn Cleaner>> {
    vec![
        Arc::new(LogCleaner::new()),
        Arc::new(HomeCacheCleaner::trash()),
        Arc::new(HomeCacheCleaner::thumbnails()),
        Arc::new(HomeCacheCleaner::browsers()),
        Arc::new(UserCacheCleaner::new()),
        Arc::new(HomeCacheCleaner::npm()),
        Arc::new(TmpCleaner::new()),
        Arc::new(HomeCacheCleaner::cargo()),
        Arc::new(HomeCacheCleaner::app_caches()),
        Arc::new(LargeFileCleaner::new(large_files)),
    ]
}
