//! MCP tool implementations
//!
//! Each module adds one `#[tool_router]` block to a server. The servers
//! combine those routers when they are constructed.

pub(crate) mod addresses;
pub(crate) mod stats;
pub(crate) mod users;
pub(crate) mod warnings;
pub(crate) mod work_status;

#[cfg(test)]
mod addresses_test;

use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use serde::Serialize;
use serde_json::json;
use tracing::warn;

use crate::db::DbError;
use crate::nina::NinaError;

pub use addresses::{AddAddressParams, AddressIdParams, UpdateAddressParams};
pub use users::{AddUserParams, DeleteUserParams, FindUserParams, UpdateUserParams};
pub use warnings::{
    ArsParams, FindArsCodeParams, MapWarningsParams, RegionalWarningsParams, WarningIdParams,
};
pub use work_status::{SetHomeOfficeParams, UserIdParams};

/// Successful plain text result.
pub(crate) fn text_result(message: impl Into<String>) -> CallToolResult {
    CallToolResult::success(vec![Content::text(message.into())])
}

/// Successful result carrying pretty-printed JSON.
pub(crate) fn json_result<T: Serialize + ?Sized>(value: &T) -> Result<CallToolResult, McpError> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(e.to_string(), None))?;
    Ok(CallToolResult::success(vec![Content::text(text)]))
}

/// Tool-level failure the model can read and react to.
pub(crate) fn error_result(message: impl Into<String>) -> CallToolResult {
    CallToolResult::error(vec![Content::text(message.into())])
}

/// Map a database error to a tool result.
///
/// Input problems become an error result with the plain message. Everything
/// else is a protocol error.
pub(crate) fn map_db_error(e: DbError) -> Result<CallToolResult, McpError> {
    match e {
        DbError::Validation { .. } | DbError::AlreadyExists { .. } | DbError::Constraint { .. } => {
            warn!(error = %e, "Rejected tool input");
            Ok(error_result(e.user_message()))
        }
        DbError::NotFound { .. } => Err(McpError::resource_not_found(
            e.to_string(),
            Some(json!({"error": e.to_string()})),
        )),
        _ => Err(McpError::internal_error(
            e.to_string(),
            Some(json!({"error": e.to_string()})),
        )),
    }
}

/// Map a NINA client error to a tool result.
///
/// API answers (unknown IDs, bad arguments) are reported to the model.
/// Transport and decoding failures are protocol errors.
pub(crate) fn map_nina_error(e: NinaError) -> Result<CallToolResult, McpError> {
    match e {
        NinaError::Status { status, ref body } => {
            warn!(status, "NINA API rejected request");
            Ok(error_result(format!(
                "NINA API returned status {}: {}",
                status, body
            )))
        }
        NinaError::InvalidArgument { .. } => Ok(error_result(e.to_string())),
        _ => Err(McpError::internal_error(
            e.to_string(),
            Some(json!({"error": e.to_string()})),
        )),
    }
}

#[cfg(test)]
pub(crate) fn result_text(result: &CallToolResult) -> &str {
    match &result.content[0].raw {
        rmcp::model::RawContent::Text(content) => content.text.as_str(),
        other => panic!("expected text content, got {other:?}"),
    }
}
