//! NINA warning MCP server binary.

use axum::Router;
use clap::Parser;
use staffalert::api::{self, Config, ServerResult};
use staffalert::ars::ArsRegistry;
use staffalert::config::{Settings, Transport, TransportArgs};
use staffalert::mcp::{NinaServer, create_nina_service};
use staffalert::nina::NinaClient;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "staffalert-nina")]
#[command(author, version, about = "NINA civil protection warnings MCP server", long_about = None)]
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

    let client = NinaClient::new(&cli.settings.nina_base_url)?;
    info!(base_url = client.base_url(), "NINA client ready");

    // The directory is parsed on first use, only its presence is checked here
    let registry = ArsRegistry::new(&cli.settings.ars_file);
    if !registry.path().exists() {
        warn!(path = %registry.path().display(), "Regional key file not found");
    }

    match cli.transport.transport {
        Transport::Stdio => api::run_stdio(NinaServer::new(client, registry)).await,
        Transport::Http => {
            let ct = CancellationToken::new();
            let service = create_nina_service(client, registry, ct.clone());
            let router = Router::new().nest_service("/mcp", service);
            api::run(Config::from(&cli.transport), router, ct).await
        }
    }
}
