pub mod fixtures;
pub mod stores;

pub use stores::{
    CartStore, CatalogStore, JsonCartStore, JsonCatalogStore, JsonOrderStore, OrderStore,
    StorageError,
};
