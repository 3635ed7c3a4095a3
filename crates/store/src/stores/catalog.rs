use std::path::PathBuf;

use async_trait::async_trait;
use serde::Deserialize;

use comanda_core::domain::product::Product;

use super::{CatalogStore, StorageError};

/// The catalog file wraps its products in a `{"produtos": [...]}` document.
#[derive(Debug, Deserialize)]
struct CatalogDocument {
    produtos: Vec<Product>,
}

/// File-backed catalog. Unlike carts and orders, a missing catalog is an
/// error: the product list is seeded out of band and the API has nothing to
/// serve without it.
pub struct JsonCatalogStore {
    path: PathBuf,
}

impl JsonCatalogStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CatalogStore for JsonCatalogStore {
    async fn load_products(&self) -> Result<Vec<Product>, StorageError> {
        let raw = tokio::fs::read(&self.path)
            .await
            .map_err(|source| StorageError::Io { path: self.path.clone(), source })?;

        let document: CatalogDocument = serde_json::from_slice(&raw)
            .map_err(|source| StorageError::Malformed { path: self.path.clone(), source })?;

        Ok(document.produtos)
    }
}
