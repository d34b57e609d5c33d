//! NINA client errors.

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum NinaError {
    #[error("NINA API returned {status}: {body}")]
    #[diagnostic(code(staffalert::nina::status))]
    Status { status: u16, body: String },

    #[error("Request to NINA API failed: {0}")]
    #[diagnostic(
        code(staffalert::nina::request),
        help("Check network access to warnung.bund.de or set NINA_BASE_URL")
    )]
    Request(#[from] reqwest::Error),

    #[error("Unexpected response from NINA API: {message}")]
    #[diagnostic(code(staffalert::nina::decode))]
    Decode { message: String },

    #[error("{message}")]
    #[diagnostic(code(staffalert::nina::invalid_argument))]
    InvalidArgument { message: String },
}

impl NinaError {
    /// True for a 404 from the API, i.e. an unknown warning or region.
    pub fn is_not_found(&self) -> bool {
        matches!(self, NinaError::Status { status: 404, .. })
    }
}

pub type NinaResult<T> = Result<T, NinaError>;
