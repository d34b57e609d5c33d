//! Runtime settings shared by the server binaries.
//!
//! Every value can be given as a command line flag or through the
//! environment variable of the same name.

use std::net::IpAddr;
use std::path::PathBuf;

use clap::{ArgAction, Args, ValueEnum};
use miette::Diagnostic;
use thiserror::Error;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/mitarbeiter.db";
pub const DEFAULT_NINA_BASE_URL: &str = "https://warnung.bund.de/api31";
pub const DEFAULT_ARS_FILE: &str = "resources/GV100AD_31082025.txt";
pub const MAX_INITIAL_USERS: u32 = 1000;

const LOG_LEVELS: [&str; 5] = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"];

#[derive(Error, Diagnostic, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("DATABASE_URL must not be empty")]
    #[diagnostic(
        code(staffalert::config::empty_database_url),
        help("Set DATABASE_URL, e.g. sqlite://data/mitarbeiter.db")
    )]
    EmptyDatabaseUrl,

    #[error("Unsupported DATABASE_URL '{0}'")]
    #[diagnostic(
        code(staffalert::config::unsupported_database_url),
        help("Only sqlite: URLs are supported")
    )]
    UnsupportedDatabaseUrl(String),

    #[error("Invalid LOG_LEVEL '{0}'")]
    #[diagnostic(
        code(staffalert::config::invalid_log_level),
        help("Use one of DEBUG, INFO, WARNING, ERROR, CRITICAL")
    )]
    InvalidLogLevel(String),

    #[error("INITIAL_USERS_COUNT must be between 0 and {max}, got {value}")]
    #[diagnostic(code(staffalert::config::invalid_users_count))]
    InvalidUsersCount { value: u32, max: u32 },
}

/// How an MCP server talks to its client.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Transport {
    /// JSON-RPC over stdin/stdout
    #[default]
    Stdio,
    /// Streamable HTTP under /mcp
    Http,
}

/// Transport flags of the server binaries.
#[derive(Debug, Clone, Args)]
pub struct TransportArgs {
    /// Transport used to serve MCP
    #[arg(long, env = "MCP_TRANSPORT", value_enum, default_value_t = Transport::Stdio)]
    pub transport: Transport,

    /// Host address to bind to in HTTP mode
    #[arg(long, env = "MCP_HOST", default_value = "127.0.0.1")]
    pub host: IpAddr,

    /// Port to listen on in HTTP mode
    #[arg(short, long, env = "MCP_PORT", default_value_t = 8000)]
    pub port: u16,
}

/// Application settings.
#[derive(Debug, Clone, Args)]
pub struct Settings {
    /// SQLite connection URL
    #[arg(long, env = "DATABASE_URL", default_value = DEFAULT_DATABASE_URL)]
    pub database_url: String,

    /// DEBUG, INFO, WARNING, ERROR or CRITICAL
    #[arg(long, env = "LOG_LEVEL", default_value = "INFO")]
    pub log_level: String,

    /// Number of random employees inserted at startup
    #[arg(long, env = "INITIAL_USERS_COUNT", default_value_t = 10)]
    pub initial_users_count: u32,

    /// Delete all rows when the server stops
    #[arg(long, env = "PURGE_ON_SHUTDOWN", default_value_t = true, action = ArgAction::Set)]
    pub purge_on_shutdown: bool,

    /// Base URL of the NINA warning API
    #[arg(long, env = "NINA_BASE_URL", default_value = DEFAULT_NINA_BASE_URL)]
    pub nina_base_url: String,

    /// GV100AD municipality directory
    #[arg(long, env = "ARS_FILE", default_value = DEFAULT_ARS_FILE)]
    pub ars_file: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            log_level: "INFO".to_string(),
            initial_users_count: 10,
            purge_on_shutdown: true,
            nina_base_url: DEFAULT_NINA_BASE_URL.to_string(),
            ars_file: PathBuf::from(DEFAULT_ARS_FILE),
        }
    }
}

impl Settings {
    /// Check every value and normalise the log level to upper case.
    pub fn validate(&mut self) -> Result<(), ConfigError> {
        let url = self.database_url.trim();
        if url.is_empty() {
            return Err(ConfigError::EmptyDatabaseUrl);
        }
        if !url.starts_with("sqlite:") {
            return Err(ConfigError::UnsupportedDatabaseUrl(url.to_string()));
        }
        self.database_url = url.to_string();

        let level = self.log_level.trim().to_uppercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(self.log_level.clone()));
        }
        self.log_level = level;

        if self.initial_users_count > MAX_INITIAL_USERS {
            return Err(ConfigError::InvalidUsersCount {
                value: self.initial_users_count,
                max: MAX_INITIAL_USERS,
            });
        }

        Ok(())
    }

    /// Tracing filter directive for the configured log level.
    pub fn log_filter(&self) -> &'static str {
        match self.log_level.trim().to_uppercase().as_str() {
            "DEBUG" => "debug",
            "WARNING" => "warn",
            "ERROR" | "CRITICAL" => "error",
            _ => "info",
        }
    }

    /// File path of the database, or `None` for in-memory URLs.
    pub fn database_path(&self) -> Option<PathBuf> {
        let rest = self.database_url.trim().strip_prefix("sqlite:")?;
        let rest = rest.strip_prefix("//").unwrap_or(rest);
        let path = rest.split('?').next().unwrap_or_default();

        if path.is_empty() || path == ":memory:" {
            None
        } else {
            Some(PathBuf::from(path))
        }
    }
}
