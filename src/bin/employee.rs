//! Employee directory MCP server binary.
//!
//! Creates the SQLite database, seeds demo employees and serves the
//! `EmployeeServer` over stdio or Streamable HTTP.

use std::sync::Arc;

use axum::Router;
use clap::Parser;
use staffalert::api::{self, Config, ServerResult};
use staffalert::config::{Settings, Transport, TransportArgs};
use staffalert::db::{Database, SqliteDatabase, seed};
use staffalert::mcp::{EmployeeServer, create_employee_service};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "staffalert-employee")]
#[command(author, version, about = "Employee directory MCP server", long_about = None)]
struct Cli {
    #[command(flatten)]
    settings: Settings,

    #[command(flatten)]
    transport: TransportArgs,
}

#[tokio::main]
async fn main() -> miette::Result<()> {
    let cli = Cli::parse();
    run(cli).await?;
    Ok(())
}

async fn run(mut cli: Cli) -> ServerResult<()> {
    cli.settings.validate()?;
    api::init_tracing(cli.settings.log_filter());

    let db = Arc::new(connect(&cli.settings).await?);

    let inserted = seed::seed_users(db.as_ref(), cli.settings.initial_users_count as usize).await?;
    info!(inserted, "Seeded demo employees");

    let served = match cli.transport.transport {
        Transport::Stdio => {
            let server = EmployeeServer::<SqliteDatabase>::new(Arc::clone(&db));
            api::run_stdio(server).await
        }
        Transport::Http => {
            let ct = CancellationToken::new();
            let service = create_employee_service::<SqliteDatabase>(Arc::clone(&db), ct.clone());
            let router = Router::new().nest_service("/mcp", service);
            api::run(Config::from(&cli.transport), router, ct).await
        }
    };

    // Shut down cleanly even when serving failed
    if cli.settings.purge_on_shutdown {
        match db.purge().await {
            Ok(()) => info!("Purged all data"),
            Err(e) => warn!(error = %e, "Failed to purge data on shutdown"),
        }
    }
    db.close().await;
    info!("Database connection closed");

    served
}

async fn connect(settings: &Settings) -> ServerResult<SqliteDatabase> {
    if let Some(path) = settings.database_path()
        && let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }

    let db = SqliteDatabase::connect(&settings.database_url).await?;
    info!(url = %settings.database_url, "Database connected");

    db.migrate().await?;
    info!("Database tables ready");

    Ok(db)
}
