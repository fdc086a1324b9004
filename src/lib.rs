//! Reclaim - interactive disk space reclamation for Linux
//!
//! This crate provides functionality for:
//! - Measuring what a fixed set of cleaners would free
//! - Reviewing and selecting cleaners, down to individual large files
//! - Running the chosen cleaners concurrently behind a responsive TUI

pub mod cleaner;
pub mod cli;
pub mod config;
pub mod disk;
pub mod engine;
pub mod error;
pub mod tui;

// Re-export commonly used types
pub use config::Config;
pub use error::{ReclaimError, Result};
