//! Shared route-layer plumbing: handler state, response envelopes, the
//! error-to-status mapping and session-header helpers.

use std::sync::Arc;

use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::error;

use comanda_core::errors::ServiceError;
use comanda_store::{CartStore, CatalogStore, OrderStore, StorageError};

pub const SESSION_HEADER: &str = "session-id";

/// Handler state: trait-object stores plus one writer lock per mutable
/// file. Mutation handlers hold the lock across the whole
/// load → mutate → save cycle so concurrent writers cannot drop each
/// other's updates; reads take no lock.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn CatalogStore>,
    pub carts: Arc<dyn CartStore>,
    pub orders: Arc<dyn OrderStore>,
    pub cart_writer: Arc<Mutex<()>>,
    pub order_writer: Arc<Mutex<()>>,
}

impl AppState {
    pub fn new(
        catalog: Arc<dyn CatalogStore>,
        carts: Arc<dyn CartStore>,
        orders: Arc<dyn OrderStore>,
    ) -> Self {
        Self {
            catalog,
            carts,
            orders,
            cart_writer: Arc::new(Mutex::new(())),
            order_writer: Arc::new(Mutex::new(())),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApiMessage {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: String,
}

pub type Rejection = (StatusCode, Json<ApiError>);

/// Single mapping point from the service taxonomy to HTTP. Storage detail
/// goes to the logs; the response body carries a generic message.
pub fn service_error(error: ServiceError) -> Rejection {
    match error {
        ServiceError::InvalidInput(message) => {
            (StatusCode::BAD_REQUEST, Json(ApiError { error: message }))
        }
        ServiceError::NotFound(message) => {
            (StatusCode::NOT_FOUND, Json(ApiError { error: message }))
        }
        ServiceError::Storage(detail) => {
            error!(event_name = "api.storage.failure", error = %detail, "storage operation failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiError { error: "Erro interno no servidor".to_string() }),
            )
        }
    }
}

pub fn storage_error(error: StorageError) -> Rejection {
    service_error(ServiceError::Storage(error.to_string()))
}

/// Session key for cart routes. An absent header falls back to the literal
/// "undefined" key: the original storefront sometimes sent no header and
/// all those requests shared one anonymous cart. Preserved on purpose.
pub fn session_key(headers: &HeaderMap) -> String {
    headers
        .get(SESSION_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
        .unwrap_or_else(|| "undefined".to_string())
}

/// Order routes reject requests without a session id.
pub fn require_session(headers: &HeaderMap) -> Result<String, Rejection> {
    headers
        .get(SESSION_HEADER)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.trim().is_empty())
        .map(str::to_string)
        .ok_or_else(|| {
            service_error(ServiceError::invalid_input("Cabeçalho `session-id` é obrigatório"))
        })
}
