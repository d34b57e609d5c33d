use serde::Serialize;
use tabled::{Table, Tabled};
use tracing::debug;

use crate::ars::{ArsRegistry, district_key};
use crate::cli::commands::OutputFormat;
use crate::cli::error::{CliError, CliResult};
use crate::cli::utils::{apply_table_style, or_dash, truncate_with_ellipsis};
use crate::nina::{DashboardItem, NinaClient};

#[derive(Debug, Serialize, Tabled)]
pub(crate) struct WarningDisplay {
    #[tabled(rename = "ID")]
    pub(crate) id: String,
    #[tabled(rename = "Severity")]
    pub(crate) severity: String,
    #[tabled(rename = "Provider")]
    pub(crate) provider: String,
    #[tabled(rename = "Headline")]
    pub(crate) headline: String,
    #[tabled(rename = "Sent")]
    pub(crate) sent: String,
}

impl From<&DashboardItem> for WarningDisplay {
    fn from(item: &DashboardItem) -> Self {
        Self {
            id: or_dash(item.id.as_deref()),
            severity: or_dash(item.severity()),
            provider: or_dash(item.provider()),
            headline: truncate_with_ellipsis(&or_dash(item.headline()), 60),
            sent: item
                .sent
                .map(|sent| sent.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| "-".to_string()),
        }
    }
}

/// Resolve `region` to a district key.
///
/// Anything made of digits is taken as a regional key, everything else as a
/// municipality name.
pub(crate) async fn resolve_region(registry: &ArsRegistry, region: &str) -> CliResult<String> {
    let region = region.trim();
    let ars = if !region.is_empty() && region.chars().all(|c| c.is_ascii_digit()) {
        region.to_string()
    } else {
        registry
            .lookup(region)
            .await?
            .ok_or_else(|| CliError::UnknownMunicipality {
                name: region.to_string(),
            })?
    };

    Ok(district_key(&ars)?)
}

/// List the current dashboard warnings of a region.
pub async fn list_warnings(
    client: &NinaClient,
    registry: &ArsRegistry,
    region: &str,
    format: OutputFormat,
) -> CliResult<String> {
    let key = resolve_region(registry, region).await?;
    debug!(%region, %key, "Fetching warnings");

    let items = client.dashboard(&key).await?;

    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&items)?),
        OutputFormat::Table => {
            if items.is_empty() {
                return Ok(format!("No current warnings for '{}'", region.trim()));
            }

            let rows: Vec<WarningDisplay> = items.iter().map(WarningDisplay::from).collect();
            let mut table = Table::new(rows);
            apply_table_style(&mut table);
            Ok(table.to_string())
        }
    }
}
