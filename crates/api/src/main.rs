//! Player Market Value Server - Main Entry Point

use api::{init_logging, run_server, ServerConfig};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Optional config file path as the only argument
    let config_path = std::env::args().nth(1);
    let config = ServerConfig::load(config_path.as_deref())?;
    init_logging(&config)?;

    info!("=== Player Value Predictor v{} ===", env!("CARGO_PKG_VERSION"));
    info!(
        "Artifacts: scaler={}, model={}",
        config.scaler_path.display(),
        config.model_path.display()
    );

    run_server(config).await?;

    Ok(())
}
