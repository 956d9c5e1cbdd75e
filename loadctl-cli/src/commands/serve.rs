//! `loadctl serve`

use anyhow::{Context, Result};
use loadctl_api::{create_app, AppState};
use loadctl_config::LoadctlConfig;
use loadctl_engine::TestRegistry;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info};

/// Run the management API until Ctrl-C, then stop every active test
pub async fn serve_command(mut config: LoadctlConfig, host: Option<String>, port: Option<u16>) -> Result<()> {
    if let Some(host) = host {
        config.server.bind_address = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    let registry = Arc::new(TestRegistry::from_config(&config).context("Failed to set up load test engine")?);
    let app = create_app(AppState::new(Arc::clone(&registry)), &config.server);

    let addr = config.server.socket_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!(
        "loadctl API listening on http://{}{}",
        listener.local_addr().context("Failed to read bound address")?,
        config.server.api_prefix
    );

    let shutdown_signal = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
        info!("Shutdown signal received");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await
        .context("Server error")?;

    let stopped = registry.shutdown().await;
    info!("Server stopped gracefully ({} running tests stopped)", stopped);
    Ok(())
}
