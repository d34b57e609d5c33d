use miette::Diagnostic;
use thiserror::Error;

use crate::ars::ArsError;
use crate::nina::NinaError;

#[derive(Error, Diagnostic, Debug)]
pub enum CliError {
    #[error("Failed to reach the NINA API")]
    #[diagnostic(
        code(staffalert::cli::connection_failed),
        help("Check your network connection, or point NINA_BASE_URL at a reachable server.")
    )]
    ConnectionFailed {
        #[source]
        source: NinaError,
    },

    #[error("NINA API error: {source}")]
    #[diagnostic(code(staffalert::cli::nina))]
    Nina {
        #[source]
        source: NinaError,
    },

    #[error("No regional key found for '{name}'")]
    #[diagnostic(
        code(staffalert::cli::unknown_municipality),
        help("Try `staffalert ars search <fragment>` to find the exact spelling.")
    )]
    UnknownMunicipality { name: String },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Ars(#[from] ArsError),

    #[error("Failed to render JSON: {message}")]
    #[diagnostic(code(staffalert::cli::json))]
    Json { message: String },
}

impl From<NinaError> for CliError {
    fn from(e: NinaError) -> Self {
        match &e {
            NinaError::Request(inner) if inner.is_connect() || inner.is_timeout() => {
                CliError::ConnectionFailed { source: e }
            }
            _ => CliError::Nina { source: e },
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Json {
            message: e.to_string(),
        }
    }
}

pub type CliResult<T> = Result<T, CliError>;
