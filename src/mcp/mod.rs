//! Model Context Protocol (MCP) servers
//!
//! - **server**: `EmployeeServer`, CRUD over users, addresses and work status
//! - **nina_server**: `NinaServer`, NINA warnings and ARS resources
//! - **tools**: tool routers, one module per entity
//! - **service**: Streamable HTTP services for the HTTP transport
//!
//! Both servers also run over stdio via `rmcp::ServiceExt::serve`.

pub mod nina_server;
pub mod server;
mod service;
pub mod tools;

#[cfg(test)]
mod nina_server_test;

pub use nina_server::NinaServer;
pub use server::EmployeeServer;
pub use service::{create_employee_service, create_nina_service};
