//! Import catalog command

use colored::Colorize;

use crate::interfaces::cli::CliError;
use crate::services::{ImportService, RowOutcome};

pub async fn import_catalog(service: &ImportService, csv_file: &str) -> Result<(), CliError> {
    println!(
        "{} {}",
        "Importing catalog from".yellow(),
        csv_file.blue()
    );
    println!(
        "  {}",
        "Existing locations, properties and images will be replaced".dimmed()
    );

    let report = service.import_file(csv_file).await?;

    for row in &report.rows {
        let marker = match row.outcome {
            RowOutcome::Created { .. } => "✓".green(),
            RowOutcome::SkippedDuplicate => "↷".yellow(),
        };
        println!("  {} {}", marker, row.describe());
    }

    println!();
    println!(
        "{} Imported {} locations, {} properties, {} images",
        "✓".bold().green(),
        report.locations.to_string().cyan(),
        report.properties.to_string().cyan(),
        report.images.to_string().cyan()
    );

    let skipped = report.skipped();
    if skipped > 0 {
        println!(
            "{} Skipped {} duplicate property rows",
            "ℹ".bold().blue(),
            skipped.to_string().yellow()
        );
    }

    Ok(())
}
