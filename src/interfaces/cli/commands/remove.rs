//! Remove catalog entry command

use colored::Colorize;

use crate::cli::RemoveTarget;
use crate::interfaces::cli::CliError;
use crate::services::CatalogService;

pub async fn remove_entry(catalog: &CatalogService, target: RemoveTarget) -> Result<(), CliError> {
    let (kind, id) = match target {
        RemoveTarget::Location { id } => {
            catalog.remove_location(&id).await?;
            ("location", id)
        }
        RemoveTarget::Property { id } => {
            catalog.remove_property(&id).await?;
            ("property", id)
        }
        RemoveTarget::Image { id } => {
            catalog.remove_image(&id).await?;
            ("image", id)
        }
    };

    println!("{} Deleted {}: {}", "✓".bold().green(), kind, id.cyan());
    Ok(())
}
