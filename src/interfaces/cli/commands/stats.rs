//! Catalog stats command

use colored::Colorize;

use crate::interfaces::cli::CliError;
use crate::services::CatalogService;

pub async fn show_stats(catalog: &CatalogService) -> Result<(), CliError> {
    let stats = catalog
        .stats()
        .await
        .map_err(|e| CliError::StorageError(format!("Failed to load stats: {}", e)))?;

    println!("{}", "Catalog:".bold().green());
    println!("  locations:  {}", stats.locations.to_string().cyan());
    println!("  properties: {}", stats.properties.to_string().cyan());
    println!("  images:     {}", stats.images.to_string().cyan());

    let counts = catalog.image_counts().await?;
    if counts.is_empty() {
        println!();
        println!("{} No properties found", "ℹ".bold().blue());
        return Ok(());
    }

    println!();
    println!("{}", "Images per property:".bold().green());
    for entry in &counts {
        let images = if entry.images == 0 {
            "0".red().to_string()
        } else {
            entry.images.to_string().green().to_string()
        };
        println!(
            "  {} {} {}",
            entry.property_id.cyan(),
            entry.property_name,
            format!("({} images)", images).dimmed()
        );
    }

    Ok(())
}
