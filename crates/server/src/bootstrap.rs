use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use thiserror::Error;
use tower_http::cors::CorsLayer;
use tracing::info;

use comanda_core::config::{AppConfig, ConfigError, LoadOptions};
use comanda_store::{JsonCartStore, JsonCatalogStore, JsonOrderStore};

use crate::api::AppState;
use crate::{cart, catalog, health, pedido};

pub struct Application {
    pub config: AppConfig,
    pub state: AppState,
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("could not prepare data directory `{path}`: {source}")]
    DataDir { path: PathBuf, source: std::io::Error },
}

pub async fn bootstrap(options: LoadOptions) -> Result<Application, BootstrapError> {
    let config = AppConfig::load(options)?;
    bootstrap_with_config(config).await
}

pub async fn bootstrap_with_config(config: AppConfig) -> Result<Application, BootstrapError> {
    tokio::fs::create_dir_all(&config.storage.data_dir)
        .await
        .map_err(|source| BootstrapError::DataDir {
            path: config.storage.data_dir.clone(),
            source,
        })?;

    let state = AppState::new(
        Arc::new(JsonCatalogStore::new(config.storage.catalog_path())),
        Arc::new(JsonCartStore::new(config.storage.cart_path())),
        Arc::new(JsonOrderStore::new(config.storage.order_path())),
    );

    info!(
        event_name = "system.bootstrap.stores_ready",
        data_dir = %config.storage.data_dir.display(),
        "file stores initialized"
    );

    Ok(Application { config, state })
}

/// Assembles the full application router. The permissive CORS layer mirrors
/// the storefront's cross-origin access to this API.
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(catalog::router(state.clone()))
        .merge(cart::router(state.clone()))
        .merge(pedido::router(state.clone()))
        .merge(health::router(state))
        .layer(CorsLayer::permissive())
}

#[cfg(test)]
mod tests {
    use comanda_core::config::{ConfigOverrides, LoadOptions};
    use tempfile::TempDir;

    use crate::bootstrap::bootstrap;

    #[tokio::test]
    async fn bootstrap_creates_the_data_directory_and_wires_the_stores() {
        let dir = TempDir::new().expect("temp dir");
        let data_dir = dir.path().join("data");

        let app = bootstrap(LoadOptions {
            overrides: ConfigOverrides {
                data_dir: Some(data_dir.clone()),
                ..ConfigOverrides::default()
            },
            ..LoadOptions::default()
        })
        .await
        .expect("bootstrap should succeed");

        assert!(data_dir.is_dir());
        assert_eq!(app.config.storage.data_dir, data_dir);
    }
}
