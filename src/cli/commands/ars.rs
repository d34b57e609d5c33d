use serde::Serialize;
use tabled::{Table, Tabled};

use crate::ars::ArsRegistry;
use crate::cli::commands::OutputFormat;
use crate::cli::error::CliResult;
use crate::cli::utils::apply_table_style;

#[derive(Debug, Serialize, Tabled)]
pub(crate) struct MunicipalityDisplay {
    #[tabled(rename = "Municipality")]
    pub(crate) municipality: String,
    #[tabled(rename = "ARS")]
    pub(crate) ars: String,
}

/// Print the regional key of one municipality.
pub async fn lookup(registry: &ArsRegistry, name: &str) -> CliResult<String> {
    match registry.lookup(name).await? {
        Some(ars) => Ok(ars),
        None => Ok(format!("No regional key found for '{}'", name)),
    }
}

/// List all municipalities whose name contains `fragment`.
pub async fn search(
    registry: &ArsRegistry,
    fragment: &str,
    format: OutputFormat,
) -> CliResult<String> {
    let matches = registry.search(fragment).await?;

    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&matches)?),
        OutputFormat::Table => {
            if matches.is_empty() {
                return Ok(format!("No municipalities match '{}'", fragment));
            }

            let rows: Vec<MunicipalityDisplay> = matches
                .into_iter()
                .map(|(municipality, ars)| MunicipalityDisplay { municipality, ars })
                .collect();
            let mut table = Table::new(rows);
            apply_table_style(&mut table);
            Ok(table.to_string())
        }
    }
}
