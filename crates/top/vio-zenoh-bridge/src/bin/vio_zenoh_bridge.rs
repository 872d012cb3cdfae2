//! Entry point for the vio-zenoh-bridge binary.

use clap::Parser as _;
use tracing_subscriber::EnvFilter;

use vio_zenoh_bridge::cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    vio_zenoh_bridge::app::run(cli).await
}
