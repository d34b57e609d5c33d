//! MCP tools for the NINA warning API and regional keys.

use rmcp::{
    ErrorData as McpError,
    handler::server::wrapper::Parameters,
    model::*,
    schemars::{self, JsonSchema},
    tool, tool_router,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::ars::{ArsError, district_key};
use crate::mcp::nina_server::NinaServer;
use crate::mcp::tools::{error_result, json_result, map_nina_error};
use crate::nina::MapProvider;

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct RegionalWarningsParams {
    #[schemars(
        description = "Regional key (ARS) with 8 or 12 digits, e.g. '09162000' for München. Use find_ars_code to look it up."
    )]
    pub ars: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct WarningIdParams {
    #[schemars(description = "Warning identifier, e.g. 'mow.DE-BY-A-W083-20200529-000'")]
    pub warning_id: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct MapWarningsParams {
    #[schemars(description = "Provider: mowas, katwarn, biwapp, dwd, lhp or police")]
    pub provider: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ArsParams {
    #[schemars(description = "Regional key (ARS) with 12 digits")]
    pub ars: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct FindArsCodeParams {
    #[schemars(description = "Name of the municipality, e.g. 'Blankenfelde-Mahlow'")]
    pub municipality: String,
}

#[tool_router(router = warnings_router, vis = "pub(crate)")]
impl NinaServer {
    #[tool(
        description = "Current warnings for a region. The regional key is reduced to district level before querying."
    )]
    pub async fn get_regional_warnings(
        &self,
        params: Parameters<RegionalWarningsParams>,
    ) -> Result<CallToolResult, McpError> {
        let key = match district_key(&params.0.ars) {
            Ok(key) => key,
            Err(e) => return Ok(error_result(e.to_string())),
        };

        match self.client.dashboard(&key).await {
            Ok(items) => json_result(&items),
            Err(e) => map_nina_error(e),
        }
    }

    #[tool(description = "Full details of a warning by its identifier.")]
    pub async fn get_warning_details(
        &self,
        params: Parameters<WarningIdParams>,
    ) -> Result<CallToolResult, McpError> {
        match self.client.warning(&params.0.warning_id).await {
            Ok(warning) => json_result(&warning),
            Err(e) => map_nina_error(e),
        }
    }

    #[tool(description = "Affected area of a warning as GeoJSON.")]
    pub async fn get_warning_geojson(
        &self,
        params: Parameters<WarningIdParams>,
    ) -> Result<CallToolResult, McpError> {
        match self.client.warning_geojson(&params.0.warning_id).await {
            Ok(geojson) => json_result(&geojson),
            Err(e) => map_nina_error(e),
        }
    }

    #[tool(description = "All warnings currently published by one provider.")]
    pub async fn get_map_warnings(
        &self,
        params: Parameters<MapWarningsParams>,
    ) -> Result<CallToolResult, McpError> {
        let provider = match params.0.provider.parse::<MapProvider>() {
            Ok(provider) => provider,
            Err(e) => return map_nina_error(e),
        };

        match self.client.map_warnings(provider).await {
            Ok(warnings) => json_result(&warnings),
            Err(e) => map_nina_error(e),
        }
    }

    #[tool(description = "Update history of a MoWaS warning.")]
    pub async fn get_warning_history(
        &self,
        params: Parameters<WarningIdParams>,
    ) -> Result<CallToolResult, McpError> {
        match self.client.warning_history(&params.0.warning_id).await {
            Ok(history) => json_result(&history),
            Err(e) => map_nina_error(e),
        }
    }

    #[tool(description = "COVID rules that applied to a region.")]
    pub async fn get_covid_rules(
        &self,
        params: Parameters<ArsParams>,
    ) -> Result<CallToolResult, McpError> {
        match self.client.covid_rules(&params.0.ars).await {
            Ok(rules) => json_result(&rules),
            Err(e) => map_nina_error(e),
        }
    }

    #[tool(description = "General COVID information published through NINA.")]
    pub async fn get_covid_infos(&self) -> Result<CallToolResult, McpError> {
        match self.client.covid_infos().await {
            Ok(infos) => json_result(&infos),
            Err(e) => map_nina_error(e),
        }
    }

    #[tool(description = "COVID news ticker published through NINA.")]
    pub async fn get_covid_ticker(&self) -> Result<CallToolResult, McpError> {
        match self.client.covid_ticker().await {
            Ok(ticker) => json_result(&ticker),
            Err(e) => map_nina_error(e),
        }
    }

    #[tool(description = "Frequently asked questions about the NINA app.")]
    pub async fn get_faqs(&self) -> Result<CallToolResult, McpError> {
        match self.client.faqs().await {
            Ok(faqs) => json_result(&faqs),
            Err(e) => map_nina_error(e),
        }
    }

    #[tool(
        description = "Look up the official regional key (ARS) of a German municipality. The name match ignores case."
    )]
    pub async fn find_ars_code(
        &self,
        params: Parameters<FindArsCodeParams>,
    ) -> Result<CallToolResult, McpError> {
        let municipality = params.0.municipality;

        match self.registry.lookup(&municipality).await {
            Ok(Some(ars)) => json_result(&serde_json::json!({
                "municipality": municipality,
                "ars": ars,
            })),
            Ok(None) => {
                warn!(%municipality, "Unknown municipality");
                Ok(error_result(format!(
                    "No regional key found for '{}'",
                    municipality
                )))
            }
            Err(e @ ArsError::FileNotFound(_)) | Err(e @ ArsError::Io(_)) => Err(
                McpError::internal_error(e.to_string(), None),
            ),
            Err(e) => Ok(error_result(e.to_string())),
        }
    }
}
