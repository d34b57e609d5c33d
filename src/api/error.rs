use miette::Diagnostic;
use thiserror::Error;

use crate::ars::ArsError;
use crate::config::ConfigError;
use crate::db::DbError;
use crate::nina::NinaError;

/// Startup and runtime failures of the server binaries.
#[derive(Error, Diagnostic, Debug)]
pub enum ServerError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error("Database error: {0}")]
    #[diagnostic(code(staffalert::server::database))]
    Database(#[from] DbError),

    #[error("NINA client error: {0}")]
    #[diagnostic(code(staffalert::server::nina))]
    Nina(#[from] NinaError),

    #[error("Regional key directory error: {0}")]
    #[diagnostic(code(staffalert::server::ars))]
    Ars(#[from] ArsError),

    #[error("I/O error: {0}")]
    #[diagnostic(code(staffalert::server::io))]
    Io(#[from] std::io::Error),

    #[error("MCP transport error: {0}")]
    #[diagnostic(
        code(staffalert::server::transport),
        help("In stdio mode the server must be started by an MCP client.")
    )]
    Transport(String),
}

pub type ServerResult<T> = Result<T, ServerError>;
