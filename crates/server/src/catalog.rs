//! `GET /produtos` — the read-only product catalog.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use comanda_core::domain::product::Product;

use crate::api::{storage_error, AppState, Rejection};

pub fn router(state: AppState) -> Router {
    Router::new().route("/produtos", get(listar_produtos)).with_state(state)
}

/// Returns every catalog product verbatim; no partial results on a store
/// fault.
async fn listar_produtos(State(state): State<AppState>) -> Result<Json<Vec<Product>>, Rejection> {
    let produtos = state.catalog.load_products().await.map_err(storage_error)?;
    Ok(Json(produtos))
}
