use std::collections::BTreeMap;
use std::path::PathBuf;

use async_trait::async_trait;

use comanda_core::domain::order::OrderRecord;

use super::{read_document_or_default, write_document, OrderStore, StorageError};

/// File-backed order mapping, `{<orderId>: {endereco, usuario, sessionId}}`.
/// Order ids are timestamp-prefixed, so the BTreeMap iterates confirmations
/// chronologically.
pub struct JsonOrderStore {
    path: PathBuf,
}

impl JsonOrderStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl OrderStore for JsonOrderStore {
    async fn load_orders(&self) -> Result<BTreeMap<String, OrderRecord>, StorageError> {
        read_document_or_default(&self.path).await
    }

    async fn save_orders(&self, orders: &BTreeMap<String, OrderRecord>) -> Result<(), StorageError> {
        write_document(&self.path, orders).await
    }
}
