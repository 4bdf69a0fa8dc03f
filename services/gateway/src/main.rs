//! AfriSwap gateway binary

use anyhow::Result;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use afriswap_gateway::{GatewayConfig, server::print_routes, start_server};

/// REST backend for AfriSwap cross-border payments
#[derive(Debug, Parser)]
#[command(name = "afriswap-gateway", version)]
struct Cli {
    /// Configuration file; missing files fall back to defaults
    #[arg(short, long, value_name = "FILE", default_value = "afriswap.toml")]
    config: String,

    /// Print the route table and exit
    #[arg(long)]
    routes: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    if cli.routes {
        print_routes();
        return Ok(());
    }

    let dotenv_path = dotenv::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "afriswap_gateway=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
    if let Some(path) = dotenv_path {
        info!(path = %path.display(), "Loaded environment file");
    }

    let config = GatewayConfig::load(&cli.config).unwrap_or_else(|e| {
        error!(file = %cli.config, error = %e, "Invalid configuration, using defaults");
        GatewayConfig::default()
    });

    start_server(config).await.inspect_err(|e| error!("Server error: {e}"))
}
