pub mod api;
pub mod ars;
pub mod cli;
pub mod config;
pub mod db;
pub mod mcp;
pub mod nina;
