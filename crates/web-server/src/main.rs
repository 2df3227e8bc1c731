use anyhow::Context;
use comparison::Comparator;
use market_data::YahooClient;
use std::path::Path;
use std::sync::Arc;

// This main function is the entry point when running `cargo run -p web-server`.
// It wires the configured data client into a comparator and serves it.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = configuration::load_config(Path::new("config.toml"))?;
    let _log_guard = configuration::init_tracing(&config.logging)?;

    let client = YahooClient::new(&config.market_data).context("building market data client")?;
    let comparator = Comparator::from_config(Arc::new(client), &config);

    web_server::run_server(config.server.socket_addr(), comparator).await
}
