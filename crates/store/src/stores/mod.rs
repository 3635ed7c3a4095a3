use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use comanda_core::domain::cart::Cart;
use comanda_core::domain::order::OrderRecord;
use comanda_core::domain::product::Product;

pub mod carts;
pub mod catalog;
pub mod memory;
pub mod orders;

pub use carts::JsonCartStore;
pub use catalog::JsonCatalogStore;
pub use memory::{InMemoryCartStore, InMemoryCatalogStore, InMemoryOrderStore, UnavailableStore};
pub use orders::JsonOrderStore;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage io failure at `{path}`: {source}")]
    Io { path: PathBuf, source: std::io::Error },
    #[error("malformed storage file `{path}`: {source}")]
    Malformed { path: PathBuf, source: serde_json::Error },
}

/// Read-only access to the product catalog.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn load_products(&self) -> Result<Vec<Product>, StorageError>;
}

/// Whole-file access to the session-id → cart mapping. Every save rewrites
/// the complete mapping; callers serialize mutations externally.
#[async_trait]
pub trait CartStore: Send + Sync {
    async fn load_carts(&self) -> Result<BTreeMap<String, Cart>, StorageError>;
    async fn save_carts(&self, carts: &BTreeMap<String, Cart>) -> Result<(), StorageError>;
}

/// Whole-file access to the order-id → order mapping.
#[async_trait]
pub trait OrderStore: Send + Sync {
    async fn load_orders(&self) -> Result<BTreeMap<String, OrderRecord>, StorageError>;
    async fn save_orders(&self, orders: &BTreeMap<String, OrderRecord>) -> Result<(), StorageError>;
}

/// Loads a whole JSON document, treating a missing file as the default
/// (empty) value. Carts and orders start existing on first write.
pub(crate) async fn read_document_or_default<T>(path: &Path) -> Result<T, StorageError>
where
    T: DeserializeOwned + Default,
{
    let raw = match tokio::fs::read(path).await {
        Ok(raw) => raw,
        Err(source) if source.kind() == std::io::ErrorKind::NotFound => return Ok(T::default()),
        Err(source) => return Err(StorageError::Io { path: path.to_path_buf(), source }),
    };

    serde_json::from_slice(&raw)
        .map_err(|source| StorageError::Malformed { path: path.to_path_buf(), source })
}

/// Rewrites a whole JSON document, pretty-printed to keep the files
/// hand-inspectable.
pub(crate) async fn write_document<T: Serialize>(
    path: &Path,
    value: &T,
) -> Result<(), StorageError> {
    let raw = serde_json::to_vec_pretty(value)
        .map_err(|source| StorageError::Malformed { path: path.to_path_buf(), source })?;

    tokio::fs::write(path, raw)
        .await
        .map_err(|source| StorageError::Io { path: path.to_path_buf(), source })
}
