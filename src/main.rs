//! hostbridge - HTTP bridge server entry point.
//!
//! Starts the host executor thread and the request listener in front of it.

use std::sync::Arc;

use hostbridge::{api, bridge::Bridge, config::Config, host::Workbench, tools};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hostbridge=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;
    info!(
        "Loaded configuration: listen={}:{} timeout={}s",
        config.host, config.port, config.bridge_timeout_secs
    );

    // Host thread and fixed tool table
    let registry = Arc::new(tools::workbench_registry());
    let bridge = Bridge::start_with_timeout(Workbench::new("Untitled"), config.bridge_timeout());

    // Serve until shutdown
    api::serve(&config, bridge.handle(), registry).await?;
    bridge.stop();

    Ok(())
}
