//! Cleaners and their registry.
//!
//! This module provides:
//! - The `Cleaner` capability trait every cleaner implements
//! - The built-in cleaners
//! - The registry that fixes the set of cleaners for a run

mod capability;
pub mod cleaners;
pub mod fs;
mod registry;

pub use capability::{Cleaner, CleanerError, FileDetail, ItemizedCleaner};
pub use cleaners::all_cleaners;
pub use registry::CleanerRegistry;
