//! MCP Streamable HTTP service creation
//!
//! Builds the tower services that the HTTP mode of both servers nests
//! under `/mcp` in an axum router.

use std::sync::Arc;

use rmcp::transport::streamable_http_server::{
    StreamableHttpServerConfig, StreamableHttpService, session::local::LocalSessionManager,
};
use tokio_util::sync::CancellationToken;

use crate::ars::ArsRegistry;
use crate::db::Database;
use crate::nina::NinaClient;

use super::nina_server::NinaServer;
use super::server::EmployeeServer;

fn http_config(cancellation_token: CancellationToken) -> StreamableHttpServerConfig {
    StreamableHttpServerConfig::default()
        .with_sse_keep_alive(None) // Use default (15s)
        .with_stateful_mode(true)
        .with_cancellation_token(cancellation_token)
}

/// Create the employee MCP service.
///
/// Every session gets its own `EmployeeServer`, all sharing one database.
///
/// # Example
/// ```no_run
/// use axum::Router;
/// use tokio_util::sync::CancellationToken;
/// # use staffalert::db::SqliteDatabase;
/// # use staffalert::mcp::create_employee_service;
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// # let db = SqliteDatabase::in_memory().await?;
///
/// let ct = CancellationToken::new();
/// let mcp_service = create_employee_service(db, ct);
///
/// let app: Router = Router::new().nest_service("/mcp", mcp_service);
/// # Ok(())
/// # }
/// ```
pub fn create_employee_service<D: Database + 'static>(
    db: impl Into<Arc<D>>,
    cancellation_token: CancellationToken,
) -> StreamableHttpService<EmployeeServer<D>, LocalSessionManager> {
    let db = db.into();

    // rmcp expects the factory to fail with io::Error
    let service_factory = move || -> Result<EmployeeServer<D>, std::io::Error> {
        Ok(EmployeeServer::new(Arc::clone(&db)))
    };

    StreamableHttpService::new(
        service_factory,
        LocalSessionManager::default().into(),
        http_config(cancellation_token),
    )
}

/// Create the NINA MCP service.
pub fn create_nina_service(
    client: NinaClient,
    registry: ArsRegistry,
    cancellation_token: CancellationToken,
) -> StreamableHttpService<NinaServer, LocalSessionManager> {
    let service_factory = move || -> Result<NinaServer, std::io::Error> {
        Ok(NinaServer::new(client.clone(), registry.clone()))
    };

    StreamableHttpService::new(
        service_factory,
        LocalSessionManager::default().into(),
        http_config(cancellation_token),
    )
}
