//! `leads export`：按区域导出留资

use colored::Colorize;
use std::fs::File;
use std::io::BufWriter;
use std::sync::Arc;

use crate::downloads::LeadSource;
use crate::interfaces::cli::CliError;
use crate::region::Region;
use crate::storage::SeaOrmStorage;

fn default_export_filename(region: Region) -> String {
    format!(
        "leads_{}_{}.csv",
        region.code(),
        chrono::Utc::now().format("%Y%m%d_%H%M%S")
    )
}

pub async fn export_leads(
    storage: Arc<SeaOrmStorage>,
    region: Region,
    source: Option<LeadSource>,
    file_path: Option<String>,
) -> Result<(), CliError> {
    let output_path = file_path.unwrap_or_else(|| default_export_filename(region));

    let file = File::create(&output_path).map_err(|e| {
        CliError::CommandError(format!(
            "Failed to create export file '{}': {}",
            output_path, e
        ))
    })?;

    let count = storage
        .export_leads(region, source, BufWriter::new(file))
        .await?;

    if count == 0 {
        println!(
            "{} No leads in region {}; export file is empty",
            "ℹ".bold().blue(),
            region.code().cyan()
        );
    } else {
        println!(
            "{} Exported {} leads to {}",
            "✓".bold().green(),
            count.to_string().green(),
            output_path.cyan()
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filename_names_region() {
        let name = default_export_filename(Region::Fr);
        assert!(name.starts_with("leads_fr_"));
        assert!(name.ends_with(".csv"));
    }
}
