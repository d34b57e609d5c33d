//! Database abstraction layer.
//!
//! Trait-based data access for the employee directory, so handlers can be
//! written against [`Database`] and tested against in-memory SQLite.
//!
//! # Architecture
//!
//! - `error`: Storage-agnostic error types
//! - `models`: Domain entities (User, Address, WorkStatus)
//! - `repository`: Trait definitions for data access
//! - `validation`: Checks applied to raw tool input
//! - `seed`: Random demo employees
//! - `sqlite`: SQLx implementation

mod error;
mod models;
mod repository;
pub mod seed;
pub mod sqlite;
pub mod validation;

#[cfg(test)]
mod models_test;

pub use error::{DbError, DbResult};
pub use models::*;
pub use repository::*;
pub use sqlite::SqliteDatabase;
