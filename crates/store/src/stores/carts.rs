use std::collections::BTreeMap;
use std::path::PathBuf;

use async_trait::async_trait;

use comanda_core::domain::cart::Cart;

use super::{read_document_or_default, write_document, CartStore, StorageError};

/// File-backed cart mapping. The file holds `{<sessionId>: [CartItem, ...]}`
/// and is rewritten wholesale on every save; derived totals are never
/// persisted.
pub struct JsonCartStore {
    path: PathBuf,
}

impl JsonCartStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CartStore for JsonCartStore {
    async fn load_carts(&self) -> Result<BTreeMap<String, Cart>, StorageError> {
        read_document_or_default(&self.path).await
    }

    async fn save_carts(&self, carts: &BTreeMap<String, Cart>) -> Result<(), StorageError> {
        write_document(&self.path, carts).await
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use rust_decimal::Decimal;
    use tempfile::TempDir;

    use comanda_core::domain::cart::{Cart, CartItem};

    use super::JsonCartStore;
    use crate::stores::{CartStore, StorageError};

    fn cart_with_one_item() -> Cart {
        Cart {
            itens: vec![CartItem {
                id: 1,
                nome: "Sushi Especial".to_string(),
                imagem: None,
                preco: Decimal::new(2999, 2),
                quantidade_carrinho: 2,
                observacoes: Some("Sem cebola".to_string()),
            }],
        }
    }

    #[tokio::test]
    async fn missing_cart_file_loads_as_the_empty_mapping() {
        let dir = TempDir::new().expect("temp dir");
        let store = JsonCartStore::new(dir.path().join("cart.json"));

        let carts = store.load_carts().await.expect("load carts");

        assert!(carts.is_empty());
    }

    #[tokio::test]
    async fn carts_round_trip_keyed_by_session() {
        let dir = TempDir::new().expect("temp dir");
        let store = JsonCartStore::new(dir.path().join("cart.json"));

        let mut carts = BTreeMap::new();
        carts.insert("s1".to_string(), cart_with_one_item());
        carts.insert("undefined".to_string(), Cart::default());

        store.save_carts(&carts).await.expect("save carts");
        let reloaded = store.load_carts().await.expect("reload carts");

        assert_eq!(reloaded, carts);
    }

    #[tokio::test]
    async fn persisted_carts_are_plain_item_arrays() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("cart.json");
        let store = JsonCartStore::new(&path);

        let mut carts = BTreeMap::new();
        carts.insert("s1".to_string(), cart_with_one_item());
        store.save_carts(&carts).await.expect("save carts");

        let raw = tokio::fs::read(&path).await.expect("read file back");
        let value: serde_json::Value = serde_json::from_slice(&raw).expect("parse file");

        assert!(value["s1"].is_array());
        assert_eq!(value["s1"][0]["quantidadeCarrinho"], 2);
        assert!(value["s1"][0].get("valorTotal").is_none());
    }

    #[tokio::test]
    async fn corrupt_cart_file_is_a_malformed_error() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("cart.json");
        tokio::fs::write(&path, b"[not a mapping").await.expect("write garbage");

        let store = JsonCartStore::new(path);
        let error = store.load_carts().await.expect_err("file is corrupt");

        assert!(matches!(error, StorageError::Malformed { .. }));
    }
}
