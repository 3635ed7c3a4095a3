use std::collections::BTreeMap;
use std::path::PathBuf;

use tokio::sync::RwLock;

use comanda_core::domain::cart::Cart;
use comanda_core::domain::order::OrderRecord;
use comanda_core::domain::product::Product;

use super::{CartStore, CatalogStore, OrderStore, StorageError};

/// In-memory catalog for tests.
#[derive(Default)]
pub struct InMemoryCatalogStore {
    products: RwLock<Vec<Product>>,
}

impl InMemoryCatalogStore {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products: RwLock::new(products) }
    }
}

#[async_trait::async_trait]
impl CatalogStore for InMemoryCatalogStore {
    async fn load_products(&self) -> Result<Vec<Product>, StorageError> {
        let products = self.products.read().await;
        Ok(products.clone())
    }
}

/// In-memory cart mapping for tests.
#[derive(Default)]
pub struct InMemoryCartStore {
    carts: RwLock<BTreeMap<String, Cart>>,
}

#[async_trait::async_trait]
impl CartStore for InMemoryCartStore {
    async fn load_carts(&self) -> Result<BTreeMap<String, Cart>, StorageError> {
        let carts = self.carts.read().await;
        Ok(carts.clone())
    }

    async fn save_carts(&self, value: &BTreeMap<String, Cart>) -> Result<(), StorageError> {
        let mut carts = self.carts.write().await;
        *carts = value.clone();
        Ok(())
    }
}

/// In-memory order mapping for tests.
#[derive(Default)]
pub struct InMemoryOrderStore {
    orders: RwLock<BTreeMap<String, OrderRecord>>,
}

#[async_trait::async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn load_orders(&self) -> Result<BTreeMap<String, OrderRecord>, StorageError> {
        let orders = self.orders.read().await;
        Ok(orders.clone())
    }

    async fn save_orders(&self, value: &BTreeMap<String, OrderRecord>) -> Result<(), StorageError> {
        let mut orders = self.orders.write().await;
        *orders = value.clone();
        Ok(())
    }
}

/// Store whose every call fails, for exercising the storage-fault paths.
#[derive(Default)]
pub struct UnavailableStore;

fn unavailable() -> StorageError {
    StorageError::Io {
        path: PathBuf::from("<memory>"),
        source: std::io::Error::new(std::io::ErrorKind::Other, "store marked unavailable"),
    }
}

#[async_trait::async_trait]
impl CatalogStore for UnavailableStore {
    async fn load_products(&self) -> Result<Vec<Product>, StorageError> {
        Err(unavailable())
    }
}

#[async_trait::async_trait]
impl CartStore for UnavailableStore {
    async fn load_carts(&self) -> Result<BTreeMap<String, Cart>, StorageError> {
        Err(unavailable())
    }

    async fn save_carts(&self, _value: &BTreeMap<String, Cart>) -> Result<(), StorageError> {
        Err(unavailable())
    }
}

#[async_trait::async_trait]
impl OrderStore for UnavailableStore {
    async fn load_orders(&self) -> Result<BTreeMap<String, OrderRecord>, StorageError> {
        Err(unavailable())
    }

    async fn save_orders(&self, _value: &BTreeMap<String, OrderRecord>) -> Result<(), StorageError> {
        Err(unavailable())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use serde_json::json;

    use comanda_core::domain::order::OrderRecord;

    use crate::fixtures;
    use crate::stores::memory::{InMemoryCartStore, InMemoryCatalogStore, InMemoryOrderStore};
    use crate::stores::{CartStore, CatalogStore, OrderStore};

    #[tokio::test]
    async fn in_memory_catalog_round_trip() {
        let store = InMemoryCatalogStore::new(fixtures::sample_produtos());

        let produtos = store.load_products().await.expect("load products");

        assert_eq!(produtos, fixtures::sample_produtos());
    }

    #[tokio::test]
    async fn in_memory_carts_round_trip() {
        let store = InMemoryCartStore::default();
        let mut carts = BTreeMap::new();
        carts.insert("s1".to_string(), fixtures::sample_cart());

        store.save_carts(&carts).await.expect("save carts");
        let found = store.load_carts().await.expect("load carts");

        assert_eq!(found, carts);
    }

    #[tokio::test]
    async fn in_memory_orders_round_trip() {
        let store = InMemoryOrderStore::default();
        let mut orders = BTreeMap::new();
        orders.insert(
            "1700000000100-cc33dd44".to_string(),
            OrderRecord {
                endereco: json!({"rua": "A"}),
                usuario: json!({"id": 7}),
                session_id: "s1".to_string(),
            },
        );

        store.save_orders(&orders).await.expect("save orders");
        let found = store.load_orders().await.expect("load orders");

        assert_eq!(found, orders);
    }
}
