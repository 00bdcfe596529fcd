//! CLI command implementations
//!
//! This module re-exports all CLI command functions.

mod config_gen;
mod import;
mod remove;
mod stats;

pub use config_gen::config_generate;
pub use import::import_catalog;
pub use remove::remove_entry;
pub use stats::show_stats;
