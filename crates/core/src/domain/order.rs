use serde::{Deserialize, Serialize};

/// Confirmed order, stored under its generated id and never mutated again.
///
/// `endereco` and `usuario` are free-form JSON supplied by the storefront;
/// the route layer only checks presence (and that `usuario` carries an id)
/// before recording them verbatim.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub endereco: serde_json::Value,
    pub usuario: serde_json::Value,
    #[serde(rename = "sessionId")]
    pub session_id: String,
}
