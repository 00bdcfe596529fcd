//! Command-line interface definitions using clap
//!
//! This module defines the CLI structure for rental-catalog using clap's derive macros.

use clap::{Parser, Subcommand};

/// Rental Catalog - vacation rental listings with search, pagination and autocomplete
#[derive(Parser)]
#[command(name = "rental-catalog")]
#[command(version)]
#[command(about = "A read-only catalog service for vacation rental listings", long_about = None)]
pub struct Cli {
    /// Path to the TOML configuration file
    #[arg(long, short = 'c', global = true, default_value = crate::config::DEFAULT_CONFIG_PATH)]
    pub config: String,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP server (default)
    Serve,

    /// Replace the whole catalog with the contents of a CSV file
    ///
    /// Existing locations, properties and images are deleted first.
    /// The file is fully validated before anything is touched.
    Import {
        /// CSV file path
        csv_file: String,
    },

    /// Show catalog totals and per-property image counts
    Stats,

    /// Delete a catalog entry (cascades to dependent rows)
    Remove {
        #[command(subcommand)]
        target: RemoveTarget,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

/// Entities that can be removed from the CLI
#[derive(Subcommand, Debug)]
pub enum RemoveTarget {
    /// Remove a location with its properties and images
    Location { id: String },
    /// Remove a property with its images
    Property { id: String },
    /// Remove a single image
    Image { id: String },
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Generate a sample configuration file
    Generate {
        /// Output file path (default: config.example.toml)
        output_path: Option<String>,

        /// Force overwrite without confirmation
        #[arg(long)]
        force: bool,
    },
}

impl Commands {
    /// Whether this command starts the HTTP server
    pub fn is_server(&self) -> bool {
        matches!(self, Commands::Serve)
    }
}
