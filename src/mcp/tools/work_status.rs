//! MCP tools for home office status.

use rmcp::{
    ErrorData as McpError,
    handler::server::wrapper::Parameters,
    model::*,
    schemars::{self, JsonSchema},
    tool, tool_router,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::db::{Database, Id, UserRepository, WorkStatusRepository};
use crate::mcp::server::EmployeeServer;
use crate::mcp::tools::{json_result, map_db_error, text_result};

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct UserIdParams {
    #[schemars(description = "User ID")]
    pub user_id: Id,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct SetHomeOfficeParams {
    #[schemars(description = "User ID")]
    pub user_id: Id,
    #[schemars(description = "true when the user works from home")]
    pub is_home_office: bool,
}

#[tool_router(router = work_status_router, vis = "pub(crate)")]
impl<D: Database + 'static> EmployeeServer<D> {
    #[tool(
        description = "Get the home office status of a user. Returns null when none was recorded."
    )]
    pub async fn get_work_status(
        &self,
        params: Parameters<UserIdParams>,
    ) -> Result<CallToolResult, McpError> {
        let user_id = params.0.user_id;

        // Unknown users are an error, users without a record are not
        if let Err(e) = self.db.users().get(user_id).await {
            return map_db_error(e);
        }

        match self.db.work_statuses().get_by_user_id(user_id).await {
            Ok(status) => json_result(&status),
            Err(e) => map_db_error(e),
        }
    }

    #[tool(description = "Set whether a user works from home.")]
    pub async fn set_home_office(
        &self,
        params: Parameters<SetHomeOfficeParams>,
    ) -> Result<CallToolResult, McpError> {
        let SetHomeOfficeParams {
            user_id,
            is_home_office,
        } = params.0;

        match self.db.work_statuses().set(user_id, is_home_office).await {
            Ok(status) => {
                let message = if status.is_home_office {
                    format!("User ID {} works from home", user_id)
                } else {
                    format!("User ID {} works on site", user_id)
                };
                info!("{}", message);
                Ok(text_result(message))
            }
            Err(e) => map_db_error(e),
        }
    }
}
