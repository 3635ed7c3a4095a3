//! Order routes.
//!
//! - `POST /pedido/confirmar` — record a confirmed order for the session
//! - `GET  /pedido/confirmar` — look up the session's confirmed order
//!
//! Orders are append-only: once written under their generated id they are
//! never mutated or deleted. Repeated confirmations for the same session
//! are allowed; lookup returns the earliest one.

use axum::extract::State;
use axum::http::HeaderMap;
use axum::routing::post;
use axum::{Json, Router};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use comanda_core::domain::order::OrderRecord;
use comanda_core::errors::ServiceError;

use crate::api::{require_session, service_error, storage_error, AppState, Rejection};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/pedido/confirmar", post(confirmar_pedido).get(buscar_pedido))
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Request / Response types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct ConfirmOrderRequest {
    pub endereco: Option<Value>,
    pub usuario: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct ConfirmOrderResponse {
    pub message: String,
    pub id: String,
}

#[derive(Debug, Serialize)]
pub struct OrderView {
    pub id: String,
    pub endereco: Value,
    pub usuario: Value,
    #[serde(rename = "sessionId")]
    pub session_id: String,
}

// ---------------------------------------------------------------------------
// Validation and id generation
// ---------------------------------------------------------------------------

fn em_branco(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(text) => text.trim().is_empty(),
        Value::Object(fields) => fields.is_empty(),
        Value::Array(entries) => entries.is_empty(),
        _ => false,
    }
}

fn id_presente(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().map(|n| n != 0.0).unwrap_or(true),
        Value::String(text) => !text.trim().is_empty(),
        _ => true,
    }
}

fn validar_pedido(
    session_id: String,
    body: ConfirmOrderRequest,
) -> Result<OrderRecord, ServiceError> {
    let endereco = body
        .endereco
        .filter(|endereco| !em_branco(endereco))
        .ok_or_else(|| ServiceError::invalid_input("Campo `endereco` é obrigatório"))?;
    let usuario = body
        .usuario
        .filter(|usuario| usuario.get("id").map(id_presente).unwrap_or(false))
        .ok_or_else(|| ServiceError::invalid_input("Campo `usuario` com `id` é obrigatório"))?;

    Ok(OrderRecord { endereco, usuario, session_id })
}

/// Timestamp-derived order id with a random suffix. The millisecond prefix
/// keeps storage iteration chronological; the suffix rules out collisions
/// within the same millisecond.
fn novo_pedido_id() -> String {
    let sufixo = Uuid::new_v4().simple().to_string();
    format!("{}-{}", Utc::now().timestamp_millis(), &sufixo[..8])
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

async fn confirmar_pedido(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<ConfirmOrderRequest>,
) -> Result<Json<ConfirmOrderResponse>, Rejection> {
    let session = require_session(&headers)?;
    let pedido = validar_pedido(session.clone(), body).map_err(service_error)?;

    let _writer = state.order_writer.lock().await;
    let mut orders = state.orders.load_orders().await.map_err(storage_error)?;
    let mut id = novo_pedido_id();
    while orders.contains_key(&id) {
        id = novo_pedido_id();
    }
    orders.insert(id.clone(), pedido);
    state.orders.save_orders(&orders).await.map_err(storage_error)?;

    info!(
        event_name = "order.confirmed",
        session_id = %session,
        order_id = %id,
        "order recorded"
    );
    Ok(Json(ConfirmOrderResponse { message: "Pedido confirmado com sucesso".to_string(), id }))
}

/// Returns the first order whose `sessionId` matches, in storage iteration
/// order — with timestamp-prefixed keys, the earliest confirmation.
async fn buscar_pedido(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<OrderView>, Rejection> {
    let session = require_session(&headers)?;

    let orders = state.orders.load_orders().await.map_err(storage_error)?;
    let encontrado = orders.iter().find(|(_, order)| order.session_id == session);

    match encontrado {
        Some((id, order)) => Ok(Json(OrderView {
            id: id.clone(),
            endereco: order.endereco.clone(),
            usuario: order.usuario.clone(),
            session_id: order.session_id.clone(),
        })),
        None => Err(service_error(ServiceError::not_found(
            "Nenhum pedido encontrado para esta sessão",
        ))),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::sync::Arc;

    use axum::extract::State;
    use axum::http::{HeaderMap, StatusCode};
    use axum::Json;
    use serde_json::json;

    use comanda_core::domain::order::OrderRecord;
    use comanda_store::stores::memory::{
        InMemoryCartStore, InMemoryCatalogStore, InMemoryOrderStore,
    };
    use comanda_store::OrderStore;

    use super::{buscar_pedido, confirmar_pedido, ConfirmOrderRequest};
    use crate::api::AppState;

    fn state() -> AppState {
        AppState::new(
            Arc::new(InMemoryCatalogStore::default()),
            Arc::new(InMemoryCartStore::default()),
            Arc::new(InMemoryOrderStore::default()),
        )
    }

    fn headers(session: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("session-id", session.parse().expect("header value"));
        headers
    }

    fn pedido_valido() -> ConfirmOrderRequest {
        ConfirmOrderRequest {
            endereco: Some(json!({"rua": "A", "numero": 42})),
            usuario: Some(json!({"id": 7, "nome": "Ana"})),
        }
    }

    #[tokio::test]
    async fn confirm_then_lookup_round_trips_the_order() {
        let state = state();

        let confirmed =
            confirmar_pedido(State(state.clone()), headers("s1"), Json(pedido_valido()))
                .await
                .expect("confirm order");
        assert!(!confirmed.id.is_empty());

        let found = buscar_pedido(State(state), headers("s1")).await.expect("lookup order");
        assert_eq!(found.id, confirmed.id);
        assert_eq!(found.endereco, json!({"rua": "A", "numero": 42}));
        assert_eq!(found.usuario, json!({"id": 7, "nome": "Ana"}));
        assert_eq!(found.session_id, "s1");
    }

    #[tokio::test]
    async fn confirm_without_session_header_is_400() {
        let state = state();

        let (status, body) =
            confirmar_pedido(State(state), HeaderMap::new(), Json(pedido_valido()))
                .await
                .expect_err("session header is required");

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.error.contains("session-id"));
    }

    #[tokio::test]
    async fn confirm_rejects_missing_or_empty_endereco() {
        let state = state();

        for endereco in [None, Some(json!(null)), Some(json!({})), Some(json!(""))] {
            let body = ConfirmOrderRequest { endereco, usuario: Some(json!({"id": 7})) };
            let (status, _) = confirmar_pedido(State(state.clone()), headers("s1"), Json(body))
                .await
                .expect_err("endereco is required");
            assert_eq!(status, StatusCode::BAD_REQUEST);
        }
    }

    #[tokio::test]
    async fn confirm_rejects_usuario_without_id() {
        let state = state();

        for usuario in [None, Some(json!({})), Some(json!({"id": null})), Some(json!({"id": ""}))] {
            let body = ConfirmOrderRequest { endereco: Some(json!({"rua": "A"})), usuario };
            let (status, body) =
                confirmar_pedido(State(state.clone()), headers("s1"), Json(body))
                    .await
                    .expect_err("usuario.id is required");
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert!(body.error.contains("usuario"));
        }
    }

    #[tokio::test]
    async fn lookup_without_orders_is_404() {
        let state = state();

        let (status, body) = buscar_pedido(State(state), headers("s1"))
            .await
            .expect_err("no orders recorded yet");

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.error, "Nenhum pedido encontrado para esta sessão");
    }

    #[tokio::test]
    async fn lookup_skips_orders_of_other_sessions() {
        let state = state();

        confirmar_pedido(State(state.clone()), headers("s1"), Json(pedido_valido()))
            .await
            .expect("confirm order");

        let (status, _) = buscar_pedido(State(state), headers("s2"))
            .await
            .expect_err("s2 never confirmed");

        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn repeated_confirmations_resolve_to_the_earliest_order() {
        let orders = Arc::new(InMemoryOrderStore::default());
        let mut seeded = BTreeMap::new();
        seeded.insert(
            "1700000000100-aaaaaaaa".to_string(),
            OrderRecord {
                endereco: json!({"rua": "Primeira"}),
                usuario: json!({"id": 7}),
                session_id: "s1".to_string(),
            },
        );
        seeded.insert(
            "1700000000900-bbbbbbbb".to_string(),
            OrderRecord {
                endereco: json!({"rua": "Segunda"}),
                usuario: json!({"id": 7}),
                session_id: "s1".to_string(),
            },
        );
        orders.save_orders(&seeded).await.expect("seed orders");

        let state = AppState::new(
            Arc::new(InMemoryCatalogStore::default()),
            Arc::new(InMemoryCartStore::default()),
            orders,
        );

        let found = buscar_pedido(State(state), headers("s1")).await.expect("lookup order");

        assert_eq!(found.id, "1700000000100-aaaaaaaa");
        assert_eq!(found.endereco, json!({"rua": "Primeira"}));
    }
}
