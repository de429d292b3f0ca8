mod bootstrap_helpers;

use amr_cli::Cli;
use amr_gateway::run_amr_relay_server;
use anyhow::Result;
use clap::Parser;

use crate::bootstrap_helpers::init_tracing;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let config = cli.relay_server_config();
    tracing::debug!(
        bind = config.bind.as_str(),
        galaxy_url = config.galaxy.base_url.as_str(),
        "starting amr relay"
    );
    run_amr_relay_server(config).await
}
