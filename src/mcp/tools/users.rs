//! MCP tools for user management.

use rmcp::{
    ErrorData as McpError,
    handler::server::wrapper::Parameters,
    model::*,
    schemars::{self, JsonSchema},
    tool, tool_router,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::db::validation::{CreateUserRequest, UpdateUserRequest};
use crate::db::{Database, UserRepository};
use crate::mcp::server::EmployeeServer;
use crate::mcp::tools::{json_result, map_db_error, text_result};

// =============================================================================
// Parameter Structs
// =============================================================================

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct FindUserParams {
    #[schemars(description = "Last name of the user")]
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct AddUserParams {
    #[schemars(description = "First name (1-255 characters)")]
    pub first_name: String,
    #[schemars(description = "Last name (1-255 characters)")]
    pub last_name: String,
    #[schemars(description = "Email address, must be unique")]
    pub email: String,
    #[schemars(description = "Age between 0 and 150")]
    pub age: i64,
    #[schemars(description = "Gender: 'male', 'female' or 'other' (optional)")]
    pub gender: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct UpdateUserParams {
    #[schemars(description = "Last name of the user to update")]
    pub last_name: String,
    #[schemars(description = "New first name (optional)")]
    pub first_name: Option<String>,
    #[schemars(description = "New email address (optional)")]
    pub email: Option<String>,
    #[schemars(description = "New age (optional)")]
    pub age: Option<i64>,
    #[schemars(description = "New gender: 'male', 'female' or 'other' (optional)")]
    pub gender: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct DeleteUserParams {
    #[schemars(description = "Last name of the user(s) to delete")]
    pub last_name: String,
}

// =============================================================================
// User Tools
// =============================================================================

#[tool_router(router = users_router, vis = "pub(crate)")]
impl<D: Database + 'static> EmployeeServer<D> {
    #[tool(description = "Get all users from the database.")]
    pub async fn find_all_users(&self) -> Result<CallToolResult, McpError> {
        match self.db.users().list().await {
            Ok(users) => json_result(&users),
            Err(e) => map_db_error(e),
        }
    }

    #[tool(description = "Get a user by last name. Returns null when nobody has that name.")]
    pub async fn find_user_by_last_name(
        &self,
        params: Parameters<FindUserParams>,
    ) -> Result<CallToolResult, McpError> {
        match self.db.users().get_by_last_name(&params.0.name).await {
            Ok(user) => json_result(&user),
            Err(e) => map_db_error(e),
        }
    }

    #[tool(
        description = "Add a user with name, email, age and gender (male/female/other) to the database."
    )]
    pub async fn add_user(
        &self,
        params: Parameters<AddUserParams>,
    ) -> Result<CallToolResult, McpError> {
        let request = CreateUserRequest {
            first_name: params.0.first_name,
            last_name: params.0.last_name,
            email: params.0.email,
            age: params.0.age,
            gender: params.0.gender,
        };

        let new_user = match request.validate() {
            Ok(user) => user,
            Err(e) => return map_db_error(e),
        };

        match self.db.users().create(&new_user).await {
            Ok(user) => {
                let message = format!("User '{} {}' added", user.first_name, user.last_name);
                info!(id = user.id, "{}", message);
                Ok(text_result(message))
            }
            Err(e) => map_db_error(e),
        }
    }

    #[tool(
        description = "Update a user by last name with optional new values. Gender options: male/female/other."
    )]
    pub async fn update_user(
        &self,
        params: Parameters<UpdateUserParams>,
    ) -> Result<CallToolResult, McpError> {
        let request = UpdateUserRequest {
            last_name: params.0.last_name,
            first_name: params.0.first_name,
            email: params.0.email,
            age: params.0.age,
            gender: params.0.gender,
        };

        let (last_name, changes) = match request.validate() {
            Ok(validated) => validated,
            Err(e) => return map_db_error(e),
        };

        match self.db.users().update_by_last_name(&last_name, &changes).await {
            Ok(true) => {
                let message = format!("User '{}' updated", last_name);
                info!("{}", message);
                Ok(text_result(message))
            }
            Ok(false) => {
                let message = format!("User '{}' not found", last_name);
                warn!("{}", message);
                Ok(text_result(message))
            }
            Err(e) => map_db_error(e),
        }
    }

    #[tool(description = "Delete a user by last name from the database.")]
    pub async fn delete_user_by_last_name(
        &self,
        params: Parameters<DeleteUserParams>,
    ) -> Result<CallToolResult, McpError> {
        let last_name = params.0.last_name;

        match self.db.users().delete_by_last_name(&last_name).await {
            Ok(true) => {
                let message = format!("User '{}' deleted", last_name);
                info!("{}", message);
                Ok(text_result(message))
            }
            Ok(false) => {
                let message = format!("User '{}' not found", last_name);
                warn!("{}", message);
                Ok(text_result(message))
            }
            Err(e) => map_db_error(e),
        }
    }

    #[tool(description = "Delete all users from the database.")]
    pub async fn delete_all_users(&self) -> Result<CallToolResult, McpError> {
        match self.db.users().delete_all().await {
            Ok(count) => {
                let message = format!("{} users deleted", count);
                info!("{}", message);
                Ok(text_result(message))
            }
            Err(e) => map_db_error(e),
        }
    }
}
