pub mod ars;
pub mod warnings;

use clap::ValueEnum;

/// Output format of list commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}
