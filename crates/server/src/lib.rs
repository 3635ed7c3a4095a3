pub mod api;
pub mod bootstrap;
pub mod cart;
pub mod catalog;
pub mod health;
pub mod pedido;

use anyhow::Result;
use comanda_core::config::{AppConfig, LoadOptions};

fn init_logging(config: &AppConfig) {
    use comanda_core::config::LogFormat::*;
    use tracing::Level;

    let log_level = config.logging.level.parse::<Level>().unwrap_or(Level::INFO);

    match config.logging.format {
        Compact => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).compact().init();
        }
        Pretty => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).pretty().init();
        }
        Json => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).json().init();
        }
    }
}

pub async fn run() -> Result<()> {
    // Load config and initialize logging before any other operations
    let config = AppConfig::load(LoadOptions::default())?;
    init_logging(&config);

    let app = bootstrap::bootstrap_with_config(config).await?;

    let address = format!("{}:{}", app.config.server.bind_address, app.config.server.port);
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(
        event_name = "system.server.started",
        bind_address = %address,
        "comanda-server listening"
    );

    axum::serve(listener, bootstrap::router(app.state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!(event_name = "system.server.stopped", "comanda-server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::error!(
            event_name = "system.server.signal_error",
            error = %error,
            "failed to listen for the shutdown signal"
        );
    }
}
