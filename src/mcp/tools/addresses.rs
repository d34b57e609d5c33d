//! MCP tools for address management.

use rmcp::{
    ErrorData as McpError,
    handler::server::wrapper::Parameters,
    model::*,
    schemars::{self, JsonSchema},
    tool, tool_router,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::db::validation::{CreateAddressRequest, UpdateAddressRequest};
use crate::db::{AddressRepository, Database, DbError, Id};
use crate::mcp::server::EmployeeServer;
use crate::mcp::tools::{json_result, map_db_error, text_result};

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct AddressIdParams {
    #[schemars(description = "Address ID")]
    pub address_id: Id,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct AddAddressParams {
    #[schemars(description = "Street and house number")]
    pub street: String,
    #[schemars(description = "City (max 100 characters)")]
    pub city: String,
    #[schemars(description = "Postal code (max 20 characters)")]
    pub postal_code: String,
    #[schemars(description = "ISO 3166-1 alpha-2 country code, e.g. 'DE', 'US', 'FR'")]
    pub country_code: String,
    #[schemars(description = "ID of the user living at this address")]
    pub user_id: Id,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct UpdateAddressParams {
    #[schemars(description = "Address ID to update")]
    pub address_id: Id,
    #[schemars(description = "New street (optional)")]
    pub street: Option<String>,
    #[schemars(description = "New city (optional)")]
    pub city: Option<String>,
    #[schemars(description = "New postal code (optional)")]
    pub postal_code: Option<String>,
    #[schemars(description = "New ISO 3166-1 alpha-2 country code (optional)")]
    pub country_code: Option<String>,
}

#[tool_router(router = addresses_router, vis = "pub(crate)")]
impl<D: Database + 'static> EmployeeServer<D> {
    #[tool(description = "Get all addresses from the database.")]
    pub async fn find_all_addresses(&self) -> Result<CallToolResult, McpError> {
        match self.db.addresses().list().await {
            Ok(addresses) => json_result(&addresses),
            Err(e) => map_db_error(e),
        }
    }

    #[tool(description = "Get an address by ID. Returns null when the ID is unknown.")]
    pub async fn find_address_by_id(
        &self,
        params: Parameters<AddressIdParams>,
    ) -> Result<CallToolResult, McpError> {
        match self.db.addresses().get(params.0.address_id).await {
            Ok(address) => json_result(&address),
            Err(DbError::NotFound { .. }) => json_result(&None::<()>),
            Err(e) => map_db_error(e),
        }
    }

    #[tool(
        description = "Add a new address to the database. Use ISO 3166-1 alpha-2 country code (e.g., 'DE', 'US', 'FR')."
    )]
    pub async fn add_address(
        &self,
        params: Parameters<AddAddressParams>,
    ) -> Result<CallToolResult, McpError> {
        let request = CreateAddressRequest {
            street: params.0.street,
            city: params.0.city,
            postal_code: params.0.postal_code,
            country_code: params.0.country_code,
            user_id: params.0.user_id,
        };

        let new_address = match request.validate() {
            Ok(address) => address,
            Err(e) => return map_db_error(e),
        };

        match self.db.addresses().create(&new_address).await {
            Ok(address) => {
                let message = format!("Address '{}, {}' added", address.street, address.city);
                info!(id = address.id, user_id = address.user_id, "{}", message);
                Ok(text_result(message))
            }
            Err(e) => map_db_error(e),
        }
    }

    #[tool(
        description = "Update an address by ID. Use ISO 3166-1 alpha-2 country code (e.g., 'DE', 'US', 'FR')."
    )]
    pub async fn update_address(
        &self,
        params: Parameters<UpdateAddressParams>,
    ) -> Result<CallToolResult, McpError> {
        let address_id = params.0.address_id;
        let request = UpdateAddressRequest {
            street: params.0.street,
            city: params.0.city,
            postal_code: params.0.postal_code,
            country_code: params.0.country_code,
        };

        let changes = match request.validate() {
            Ok(changes) => changes,
            Err(e) => return map_db_error(e),
        };

        match self.db.addresses().update(address_id, &changes).await {
            Ok(true) => {
                let message = format!("Address ID {} updated", address_id);
                info!("{}", message);
                Ok(text_result(message))
            }
            Ok(false) => {
                let message = format!("Address ID {} not found", address_id);
                warn!("{}", message);
                Ok(text_result(message))
            }
            Err(e) => map_db_error(e),
        }
    }

    #[tool(description = "Delete an address by ID.")]
    pub async fn delete_address_by_id(
        &self,
        params: Parameters<AddressIdParams>,
    ) -> Result<CallToolResult, McpError> {
        let address_id = params.0.address_id;

        match self.db.addresses().delete(address_id).await {
            Ok(true) => {
                let message = format!("Address ID {} deleted", address_id);
                info!("{}", message);
                Ok(text_result(message))
            }
            Ok(false) => {
                let message = format!("Address ID {} not found", address_id);
                warn!("{}", message);
                Ok(text_result(message))
            }
            Err(e) => map_db_error(e),
        }
    }
}
