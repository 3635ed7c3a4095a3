use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use chrono::Utc;
use serde::Serialize;

use crate::api::AppState;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HealthCheck {
    pub status: &'static str,
    pub detail: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: HealthCheck,
    pub storage: HealthCheck,
    pub checked_at: String,
}

pub fn router(state: AppState) -> Router {
    Router::new().route("/health", get(health)).with_state(state)
}

pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let storage = catalog_check(&state).await;
    let ready = storage.status == "ready";

    let payload = HealthResponse {
        status: if ready { "ready" } else { "degraded" },
        service: HealthCheck {
            status: "ready",
            detail: "comanda-server runtime initialized".to_string(),
        },
        storage,
        checked_at: Utc::now().to_rfc3339(),
    };

    let status_code = if ready { StatusCode::OK } else { StatusCode::SERVICE_UNAVAILABLE };
    (status_code, Json(payload))
}

async fn catalog_check(state: &AppState) -> HealthCheck {
    match state.catalog.load_products().await {
        Ok(produtos) => HealthCheck {
            status: "ready",
            detail: format!("catalog readable with {} products", produtos.len()),
        },
        Err(error) => {
            HealthCheck { status: "degraded", detail: format!("catalog read failed: {error}") }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{extract::State, http::StatusCode, Json};

    use comanda_store::fixtures;
    use comanda_store::stores::memory::{
        InMemoryCartStore, InMemoryCatalogStore, InMemoryOrderStore, UnavailableStore,
    };

    use crate::api::AppState;
    use crate::health::health;

    #[tokio::test]
    async fn health_returns_ready_when_the_catalog_is_readable() {
        let state = AppState::new(
            Arc::new(InMemoryCatalogStore::new(fixtures::sample_produtos())),
            Arc::new(InMemoryCartStore::default()),
            Arc::new(InMemoryOrderStore::default()),
        );

        let (status, Json(payload)) = health(State(state)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(payload.status, "ready");
        assert_eq!(payload.storage.status, "ready");
        assert_eq!(payload.service.status, "ready");
    }

    #[tokio::test]
    async fn health_returns_service_unavailable_when_the_catalog_is_not() {
        let state = AppState::new(
            Arc::new(UnavailableStore),
            Arc::new(InMemoryCartStore::default()),
            Arc::new(InMemoryOrderStore::default()),
        );

        let (status, Json(payload)) = health(State(state)).await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(payload.status, "degraded");
        assert_eq!(payload.storage.status, "degraded");
        assert_eq!(payload.service.status, "ready");
    }
}
