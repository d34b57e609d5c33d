//! Client for the NINA public warning API.

mod client;
mod error;
pub mod models;

#[cfg(test)]
mod client_test;

pub use client::{DEFAULT_BASE_URL, NinaClient};
pub use error::{NinaError, NinaResult};
pub use models::{CovidRules, DashboardItem, MapProvider, MapWarning, Warning};
