//! Alert Relay - Main Entry Point

use anyhow::Context;
use api::{init_logging, run_server, Settings};
use metrics_exporter_prometheus::PrometheusBuilder;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::from_env().context("Invalid configuration")?;
    init_logging(settings.max_level()?, settings.log_format)?;

    info!("=== Alert Relay v{} ===", env!("CARGO_PKG_VERSION"));

    let metrics = PrometheusBuilder::new()
        .install_recorder()
        .context("Failed to install Prometheus recorder")?;

    run_server(settings, Some(metrics)).await
}
