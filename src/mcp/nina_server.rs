//! NINA warning MCP server
//!
//! Tools wrap the public warning API. Resources expose the regional key
//! directory so a model can resolve municipality names without web search.

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler,
    handler::server::{router::prompt::PromptRouter, router::tool::ToolRouter, wrapper::Parameters},
    model::*,
    prompt, prompt_handler, prompt_router,
    schemars::{self, JsonSchema},
    service::RequestContext,
    tool_handler,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use crate::ars::ArsRegistry;
use crate::nina::NinaClient;

pub const ARS_CODES_URI: &str = "ars://codes";
const ARS_CODE_PREFIX: &str = "ars://codes/";
const ARS_CODE_TEMPLATE: &str = "ars://codes/{gemeinde}";
const ARS_CODES_MIME: &str = "application/json";
const ARS_CODE_MIME: &str = "text/plain";

/// `ars://codes` is the JSON map, a single municipality is its bare key.
pub(crate) fn ars_mime_type(uri: &str) -> &'static str {
    if uri == ARS_CODES_URI {
        ARS_CODES_MIME
    } else {
        ARS_CODE_MIME
    }
}

#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct ArsLookupArgs {
    #[schemars(description = "Municipality or fragment to search for")]
    pub query: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct EmergencyWarningsArgs {
    #[schemars(description = "Country of the site, e.g. 'Deutschland'")]
    pub country: String,
}

/// MCP server over the NINA API and the ARS directory.
#[derive(Clone)]
pub struct NinaServer {
    pub(crate) client: NinaClient,
    pub(crate) registry: ArsRegistry,
    pub(crate) tool_router: ToolRouter<Self>,
    pub(crate) prompt_router: PromptRouter<Self>,
}

impl NinaServer {
    pub fn new(client: NinaClient, registry: ArsRegistry) -> Self {
        Self {
            client,
            registry,
            tool_router: Self::warnings_router(),
            prompt_router: Self::prompt_router(),
        }
    }

    fn ars_resource(uri: &str, name: &str, description: &str) -> Resource {
        let mut raw = RawResource::new(uri, name);
        raw.description = Some(description.to_string());
        raw.mime_type = Some(ARS_CODES_MIME.to_string());
        raw.no_annotation()
    }

    pub(crate) async fn read_ars_resource(&self, uri: &str) -> Result<String, McpError> {
        let internal = |e: crate::ars::ArsError| McpError::internal_error(e.to_string(), None);

        if uri == ARS_CODES_URI {
            let codes = self.registry.codes().await.map_err(internal)?;
            return serde_json::to_string(codes.as_ref())
                .map_err(|e| McpError::internal_error(e.to_string(), None));
        }

        if let Some(municipality) = uri.strip_prefix(ARS_CODE_PREFIX) {
            let municipality = urlencoding::decode(municipality)
                .map(|name| name.into_owned())
                .unwrap_or_else(|_| municipality.to_string());
            debug!(%municipality, "Resolving ARS resource");
            // Unknown municipalities read as empty text
            let ars = self
                .registry
                .lookup(&municipality)
                .await
                .map_err(internal)?;
            return Ok(ars.unwrap_or_default());
        }

        Err(McpError::resource_not_found(
            "resource_not_found",
            Some(json!({"uri": uri})),
        ))
    }
}

#[prompt_router]
impl NinaServer {
    #[prompt(name = "ars_lookup", description = "ARS-Codes nachschlagen")]
    pub async fn ars_lookup(
        &self,
        Parameters(args): Parameters<ArsLookupArgs>,
    ) -> Vec<PromptMessage> {
        let query = args.query.unwrap_or_default();
        vec![PromptMessage::new_text(
            PromptMessageRole::User,
            format!(
                "Du hast Zugriff auf eine MCP-Ressource mit der URI: {uri}\n\n\
                 Diese Ressource enthält alle deutschen Amtlichen Regionalschlüssel.\n\n\
                 Verwende ausschließlich diese Ressource, keine Websuche!\n\n\
                 Schritte:\n\
                 1. Lade die MCP-Ressource {uri}\n\
                 2. Suche in den Daten nach: {query}\n\
                 3. Gib die Ergebnisse aus",
                uri = ARS_CODES_URI,
                query = query
            ),
        )]
    }

    #[prompt(
        name = "zeige-notfall-warnungen",
        description = "Notfall-Warnungen für alle Mitarbeiter an einem Standort"
    )]
    pub async fn emergency_warnings(
        &self,
        Parameters(args): Parameters<EmergencyWarningsArgs>,
    ) -> Vec<PromptMessage> {
        vec![PromptMessage::new_text(
            PromptMessageRole::User,
            format!(
                "Prüfe auf Notfall-Warnungen für alle Mitarbeiter am Standort {country}!\n\n\
                 DATENQUELLE:\n\
                 - Verwende ausschließlich die MCP-Ressource \"{uri}\" oder das Tool find_ars_code\n\
                 - Keine Websuche für ARS-Codes oder Gemeindedaten!\n\n\
                 1. Ermittle alle Mitarbeiter aus der Mitarbeiterdatenbank, die ihren Wohnsitz \
                 in Deutschland haben.\n\
                 2. Ermittle für jeden Wohnort den Amtlichen Regionalschlüssel ARS.\n\
                 3. Suche mit dem ARS nach aktuellen Warnungen mit get_regional_warnings.\n\
                 4. Gib den Namen des Mitarbeiters mit Adresse und amtlicher Warnung aus.",
                country = args.country,
                uri = ARS_CODES_URI
            ),
        )]
    }
}

// Dispatch through the composed routers held in the struct fields
#[tool_handler(router = self.tool_router)]
#[prompt_handler(router = self.prompt_router)]
impl ServerHandler for NinaServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo::new(
            ServerCapabilities::builder()
                .enable_tools()
                .enable_prompts()
                .enable_resources()
                .build(),
        )
        .with_instructions(
            "NINA warnings - current civil protection warnings for German regions and \
             the official regional keys (ARS) of all municipalities. \
             ars://codes is a JSON object of municipality name to ARS; \
             ars://codes/{gemeinde} is the plain ARS text, empty when unknown.",
        )
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        Ok(ListResourcesResult::with_all_items(vec![Self::ars_resource(
            ARS_CODES_URI,
            "amtliche_regionalschluessel",
            "Alle Amtlichen Regionalschlüssel (ARS) nach Gemeindename",
        )]))
    }

    async fn list_resource_templates(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourceTemplatesResult, McpError> {
        let template: ResourceTemplate = serde_json::from_value(json!({
            "uriTemplate": ARS_CODE_TEMPLATE,
            "name": "amtlicher_regionalschluessel",
            "description": "Der Amtliche Regionalschlüssel (ARS) einer Gemeinde",
            "mimeType": ARS_CODE_MIME,
        }))
        .map_err(|e| McpError::internal_error(e.to_string(), None))?;

        Ok(ListResourceTemplatesResult::with_all_items(vec![template]))
    }

    async fn read_resource(
        &self,
        ReadResourceRequestParams { uri, .. }: ReadResourceRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        let text = self.read_ars_resource(&uri).await?;
        let contents: ResourceContents = serde_json::from_value(json!({
            "uri": uri,
            "mimeType": ars_mime_type(&uri),
            "text": text,
        }))
        .map_err(|e| McpError::internal_error(e.to_string(), None))?;

        Ok(ReadResourceResult::new(vec![contents]))
    }
}
