//! SQLite implementation of the database traits.
//!
//! This module provides a SQLite-backed implementation of the repository
//! traits defined in the parent module.

mod address;
mod connection;
mod helpers;
mod user;
mod work_status;

#[cfg(test)]
mod address_test;
#[cfg(test)]
mod user_test;

pub use address::SqliteAddressRepository;
pub use connection::SqliteDatabase;
pub use user::SqliteUserRepository;
pub use work_status::SqliteWorkStatusRepository;
