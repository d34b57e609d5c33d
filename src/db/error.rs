//! Database error types.
//!
//! This module provides abstracted error types for database operations.
//! It uses miette for fancy diagnostic output and thiserror for derive macros.
//! The error types are storage-backend agnostic.

use miette::Diagnostic;
use thiserror::Error;

/// Database operation errors.
#[derive(Error, Diagnostic, Debug)]
pub enum DbError {
    #[error("Entity not found: {entity_type} with {key} '{value}'")]
    #[diagnostic(code(staffalert::db::not_found))]
    NotFound {
        entity_type: String,
        key: String,
        value: String,
    },

    #[error("{message}")]
    #[diagnostic(
        code(staffalert::db::already_exists),
        help("Use a different value or update the existing record")
    )]
    AlreadyExists { message: String },

    #[error("Validation error: {message}")]
    #[diagnostic(code(staffalert::db::validation_error))]
    Validation { message: String },

    #[error("Database error: {message}")]
    #[diagnostic(code(staffalert::db::database_error))]
    Database { message: String },

    #[error("Migration error: {message}")]
    #[diagnostic(code(staffalert::db::migration_error))]
    Migration { message: String },

    #[error("Connection error: {message}")]
    #[diagnostic(code(staffalert::db::connection_error))]
    Connection { message: String },

    #[error("Constraint violation: {message}")]
    #[diagnostic(code(staffalert::db::constraint))]
    Constraint { message: String },
}

impl DbError {
    pub(crate) fn not_found(entity_type: &str, key: &str, value: impl ToString) -> Self {
        DbError::NotFound {
            entity_type: entity_type.to_string(),
            key: key.to_string(),
            value: value.to_string(),
        }
    }

    pub(crate) fn validation(message: impl Into<String>) -> Self {
        DbError::Validation {
            message: message.into(),
        }
    }

    /// Message meant for the end user, without the category prefix.
    pub fn user_message(&self) -> String {
        match self {
            DbError::Validation { message }
            | DbError::AlreadyExists { message }
            | DbError::Constraint { message } => message.clone(),
            other => other.to_string(),
        }
    }
}

impl From<sqlx::Error> for DbError {
    fn from(e: sqlx::Error) -> Self {
        DbError::Database {
            message: e.to_string(),
        }
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;
