//! CLI interface module
//!
//! This module provides command-line interface functionality for rental-catalog.

pub mod commands;

use std::fmt;

use crate::cli::{Commands, ConfigCommands};
use crate::runtime::lifetime::startup::prepare_startup;
use commands::{config_generate, import_catalog, remove_entry, show_stats};

#[derive(Debug)]
pub enum CliError {
    StorageError(String),
    ParseError(String),
    CommandError(String),
}

impl CliError {
    /// Format as simple output
    pub fn format_simple(&self) -> String {
        match self {
            CliError::StorageError(msg) => format!("Storage error: {}", msg),
            CliError::ParseError(msg) => format!("Parse error: {}", msg),
            CliError::CommandError(msg) => format!("Command error: {}", msg),
        }
    }

    /// Format as colored output
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        match self {
            CliError::StorageError(msg) => {
                format!("{} {}", "Storage error:".red().bold(), msg.white())
            }
            CliError::ParseError(msg) => {
                format!("{} {}", "Parse error:".yellow().bold(), msg.white())
            }
            CliError::CommandError(msg) => {
                format!("{} {}", "Command error:".red().bold(), msg.white())
            }
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for CliError {}

impl From<crate::errors::CatalogError> for CliError {
    fn from(err: crate::errors::CatalogError) -> Self {
        use crate::errors::CatalogError;
        match err {
            CatalogError::Validation(msg) | CatalogError::Serialization(msg) => {
                CliError::ParseError(msg)
            }
            CatalogError::NotFound(_) | CatalogError::FileOperation(_) => {
                CliError::CommandError(err.format_simple())
            }
            other => CliError::StorageError(other.to_string()),
        }
    }
}

/// Run a CLI command from clap-parsed input
pub async fn run_cli_command(cmd: Commands) -> Result<(), CliError> {
    // Generate doesn't need DB connection, handle it separately
    if let Commands::Config {
        action: ConfigCommands::Generate { output_path, force },
    } = cmd
    {
        return config_generate(output_path, force).await;
    }

    let context = prepare_startup()
        .await
        .map_err(|e| CliError::StorageError(format!("{:#}", e)))?;

    match cmd {
        Commands::Import { csv_file } => import_catalog(&context.import, &csv_file).await,

        Commands::Stats => show_stats(&context.catalog).await,

        Commands::Remove { target } => remove_entry(&context.catalog, target).await,

        Commands::Serve => Err(CliError::CommandError(
            "serve is handled by the server runtime".to_string(),
        )),

        Commands::Config { .. } => unreachable!("handled above"),
    }
}
