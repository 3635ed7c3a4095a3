use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Catalog entry. Field names are the wire names the storefront expects,
/// so they round-trip through the API and the catalog file unchanged.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    pub nome: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub preco: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imagem: Option<String>,
}
