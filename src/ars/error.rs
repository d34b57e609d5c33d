//! Errors raised while loading the municipality directory.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum ArsError {
    #[error("Municipality file not found: {}", .0.display())]
    #[diagnostic(
        code(staffalert::ars::file_not_found),
        help("Set ARS_FILE to the path of the GV100AD directory")
    )]
    FileNotFound(PathBuf),

    #[error("Failed to read municipality file: {0}")]
    #[diagnostic(code(staffalert::ars::io))]
    Io(#[from] std::io::Error),

    #[error("'{0}' is not a regional key")]
    #[diagnostic(
        code(staffalert::ars::invalid_key),
        help("A regional key consists of 8 or 12 digits")
    )]
    InvalidKey(String),
}

pub type ArsResult<T> = Result<T, ArsError>;
