mod commands;
pub mod error;
mod utils;

#[cfg(test)]
mod utils_test;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::ars::ArsRegistry;
use crate::config::{DEFAULT_ARS_FILE, DEFAULT_NINA_BASE_URL};
use crate::nina::NinaClient;

pub use commands::OutputFormat;
pub use error::{CliError, CliResult};

#[derive(Parser)]
#[command(name = "staffalert")]
#[command(author, version, about = "Regional keys and civil protection warnings", long_about = None)]
pub struct Cli {
    /// GV100AD municipality directory
    #[arg(long, global = true, env = "ARS_FILE", default_value = DEFAULT_ARS_FILE)]
    pub ars_file: PathBuf,

    /// Base URL of the NINA API
    #[arg(long, global = true, env = "NINA_BASE_URL", default_value = DEFAULT_NINA_BASE_URL)]
    pub nina_base_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Official regional keys (ARS) of German municipalities
    Ars {
        #[command(subcommand)]
        command: ArsCommands,
    },
    /// Current warnings for a regional key or municipality
    Warnings {
        /// 8 or 12 digit regional key, or a municipality name
        region: String,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
}

#[derive(Subcommand)]
enum ArsCommands {
    /// Print the regional key of a municipality
    Lookup {
        /// Municipality name, case is ignored
        name: String,
    },
    /// List municipalities whose name contains a fragment
    Search {
        /// Name fragment, case is ignored
        fragment: String,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
}

pub async fn run() -> miette::Result<()> {
    let cli = Cli::parse();
    let registry = ArsRegistry::new(&cli.ars_file);

    let output = match cli.command {
        Commands::Ars { command } => match command {
            ArsCommands::Lookup { name } => commands::ars::lookup(&registry, &name).await?,
            ArsCommands::Search { fragment, format } => {
                commands::ars::search(&registry, &fragment, format).await?
            }
        },
        Commands::Warnings { region, format } => {
            let client = NinaClient::new(&cli.nina_base_url).map_err(CliError::from)?;
            commands::warnings::list_warnings(&client, &registry, &region, format).await?
        }
    };

    println!("{}", output);
    Ok(())
}
