//! Employee directory MCP server
//!
//! Holds the database handle and routes tool and prompt calls. The tools
//! themselves live in `tools::{users, addresses, work_status, stats}`.

use std::sync::Arc;

use rmcp::{
    RoleServer, ServerHandler,
    handler::server::{router::prompt::PromptRouter, router::tool::ToolRouter, wrapper::Parameters},
    model::*,
    prompt, prompt_handler, prompt_router,
    schemars::{self, JsonSchema},
    service::RequestContext,
    tool_handler,
};
use serde::{Deserialize, Serialize};

use crate::db::Database;

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct AnalyzeUserArgs {
    #[schemars(description = "Name of the user to analyze")]
    pub name: String,
}

/// MCP server over the employee database.
///
/// Generic over `D: Database`, so tests run it on in-memory SQLite.
pub struct EmployeeServer<D: Database> {
    pub(crate) db: Arc<D>,
    pub(crate) tool_router: ToolRouter<Self>,
    pub(crate) prompt_router: PromptRouter<Self>,
}

impl<D: Database> Clone for EmployeeServer<D> {
    fn clone(&self) -> Self {
        Self {
            db: Arc::clone(&self.db),
            tool_router: self.tool_router.clone(),
            prompt_router: self.prompt_router.clone(),
        }
    }
}

impl<D: Database + 'static> EmployeeServer<D> {
    pub fn new(db: impl Into<Arc<D>>) -> Self {
        Self {
            db: db.into(),
            tool_router: Self::users_router()
                + Self::addresses_router()
                + Self::work_status_router()
                + Self::stats_router(),
            prompt_router: Self::prompt_router(),
        }
    }

    /// Shared database handle.
    pub fn db(&self) -> &Arc<D> {
        &self.db
    }
}

#[prompt_router]
impl<D: Database + 'static> EmployeeServer<D> {
    #[prompt(name = "analyze-user", description = "Analyze the profile of a user")]
    pub async fn analyze_user(
        &self,
        Parameters(args): Parameters<AnalyzeUserArgs>,
    ) -> Vec<PromptMessage> {
        vec![PromptMessage::new_text(
            PromptMessageRole::User,
            format!(
                "Analyze this user profile for: {}\n\n\
                 Please provide insights on:\n\
                 - User behavior patterns\n\
                 - Engagement metrics\n\
                 - Recommendations",
                args.name
            ),
        )]
    }

    #[prompt(
        name = "zeige-alle-datenbank-nutzer",
        description = "Liste aller Nutzer der Mitarbeiterdatenbank"
    )]
    pub async fn list_all_users(&self) -> Vec<PromptMessage> {
        vec![PromptMessage::new_text(
            PromptMessageRole::User,
            "Gebe eine Liste aller Nutzer in der Mitarbeiterdatenbank zurück\n\n\
             1. Ermittle die Liste aller Nutzer mit dem Tool find_all_users\n\
             2. Formatiere das Ergebnis so, dass pro Nutzer eine Zeile angezeigt wird, \
             wobei die einzelnen Werte durch Komma voneinander getrennt sein sollen\n\
             3. Stelle jeder Zeile eine fortlaufende Nummer voran, die rechtsbündig \
             ausgerichtet sein soll",
        )]
    }

    #[prompt(
        name = "zeige-mitarbeiter-anzahl",
        description = "Anzahl der Mitarbeiter und Adressen"
    )]
    pub async fn employee_count(&self) -> Vec<PromptMessage> {
        vec![PromptMessage::new_text(
            PromptMessageRole::User,
            "Wie viele Mitarbeiter sind in der Datenbank gespeichert?\n\n\
             1. Rufe das Tool get_database_stats auf\n\
             2. Nenne die Anzahl der Mitarbeiter, der Adressen und der Mitarbeiter im Homeoffice\n\
             3. Antworte in einem kurzen Satz",
        )]
    }
}

// Dispatch through the composed routers held in the struct fields
#[tool_handler(router = self.tool_router)]
#[prompt_handler(router = self.prompt_router)]
impl<D: Database + 'static> ServerHandler for EmployeeServer<D> {
    fn get_info(&self) -> ServerInfo {
        ServerInfo::new(
            ServerCapabilities::builder()
                .enable_tools()
                .enable_prompts()
                .build(),
        )
        .with_instructions(
            "Employee directory - manage users, their addresses and home office status",
        )
    }
}
