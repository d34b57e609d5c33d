//! MCP tool for database statistics.

use rmcp::{ErrorData as McpError, model::*, tool, tool_router};

use crate::db::Database;
use crate::mcp::server::EmployeeServer;
use crate::mcp::tools::{map_db_error, text_result};

#[tool_router(router = stats_router, vis = "pub(crate)")]
impl<D: Database + 'static> EmployeeServer<D> {
    #[tool(description = "Get current database statistics.")]
    pub async fn get_database_stats(&self) -> Result<CallToolResult, McpError> {
        match self.db.stats().await {
            Ok(stats) => Ok(text_result(stats.to_string())),
            Err(e) => map_db_error(e),
        }
    }
}
