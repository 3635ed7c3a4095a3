//! Cart routes.
//!
//! - `GET    /carrinho`      — session cart with recomputed totals
//! - `POST   /carrinho`      — add an item, merging same-id lines
//! - `PUT    /carrinho/{id}` — replace a line's quantity and price
//! - `DELETE /carrinho/{id}` — remove a line
//! - `DELETE /limpar`        — reset a previously-touched session cart
//!
//! Every mutation is load-whole-mapping → mutate → save-whole-mapping,
//! serialized by the cart writer lock in [`AppState`].

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::routing::{delete, get, put};
use axum::{Json, Router};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

use comanda_core::domain::cart::{Cart, CartItem};
use comanda_core::errors::ServiceError;

use crate::api::{service_error, session_key, storage_error, ApiMessage, AppState, Rejection};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/carrinho", get(ver_carrinho).post(adicionar_item))
        .route("/carrinho/{id}", put(atualizar_item).delete(remover_item))
        .route("/limpar", delete(limpar_carrinho))
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Request / Response types
// ---------------------------------------------------------------------------

/// Incoming add-item payload. Required fields arrive as options so that a
/// missing field is a 400 with a pointed message instead of a bare
/// deserialization rejection.
#[derive(Debug, Deserialize)]
pub struct AddItemRequest {
    pub id: Option<i64>,
    pub nome: Option<String>,
    pub imagem: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub preco: Option<Decimal>,
    #[serde(default, rename = "quantidadeCarrinho")]
    pub quantidade_carrinho: Option<i64>,
    pub observacoes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateItemRequest {
    #[serde(default, rename = "quantidadeCarrinho")]
    pub quantidade_carrinho: Option<i64>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub preco: Option<Decimal>,
}

#[derive(Debug, Serialize)]
pub struct CartView {
    pub carrinho: Cart,
    #[serde(rename = "valorTotal", with = "rust_decimal::serde::float")]
    pub valor_total: Decimal,
    #[serde(rename = "valorTotalFrete", with = "rust_decimal::serde::float")]
    pub valor_total_frete: Decimal,
}

impl From<Cart> for CartView {
    fn from(cart: Cart) -> Self {
        let valor_total = cart.valor_total();
        let valor_total_frete = cart.valor_total_frete();
        Self { carrinho: cart, valor_total, valor_total_frete }
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validar_novo_item(body: AddItemRequest) -> Result<CartItem, ServiceError> {
    let id = body
        .id
        .filter(|id| *id > 0)
        .ok_or_else(|| ServiceError::invalid_input("Campo `id` é obrigatório"))?;
    let nome = body
        .nome
        .map(|nome| nome.trim().to_string())
        .filter(|nome| !nome.is_empty())
        .ok_or_else(|| ServiceError::invalid_input("Campo `nome` é obrigatório"))?;
    let preco = body
        .preco
        .filter(|preco| preco.is_sign_positive() && !preco.is_zero())
        .ok_or_else(|| ServiceError::invalid_input("Campo `preco` deve ser maior que zero"))?;
    let quantidade = body.quantidade_carrinho.filter(|quantidade| *quantidade > 0).ok_or_else(
        || ServiceError::invalid_input("Campo `quantidadeCarrinho` deve ser maior que zero"),
    )?;

    Ok(CartItem {
        id: id as u64,
        nome,
        imagem: body.imagem,
        preco,
        quantidade_carrinho: quantidade as u32,
        observacoes: body.observacoes,
    })
}

fn validar_atualizacao(body: UpdateItemRequest) -> Result<(u32, Decimal), ServiceError> {
    let quantidade = body.quantidade_carrinho.filter(|quantidade| *quantidade > 0).ok_or_else(
        || ServiceError::invalid_input("Campo `quantidadeCarrinho` deve ser maior que zero"),
    )?;
    let preco = body
        .preco
        .ok_or_else(|| ServiceError::invalid_input("Campo `preco` é obrigatório"))?;

    Ok((quantidade as u32, preco))
}

fn item_nao_encontrado() -> ServiceError {
    ServiceError::not_found("Item não encontrado no carrinho")
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// A session that was never touched reads as an empty cart; totals are
/// recomputed on every request, never read from disk.
async fn ver_carrinho(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<CartView>, Rejection> {
    let session = session_key(&headers);

    let carts = state.carts.load_carts().await.map_err(storage_error)?;
    let cart = carts.get(&session).cloned().unwrap_or_default();

    Ok(Json(CartView::from(cart)))
}

async fn adicionar_item(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<AddItemRequest>,
) -> Result<Json<ApiMessage>, Rejection> {
    let session = session_key(&headers);
    let item = validar_novo_item(body).map_err(service_error)?;

    let _writer = state.cart_writer.lock().await;
    let mut carts = state.carts.load_carts().await.map_err(storage_error)?;
    let cart = carts.entry(session.clone()).or_default();
    cart.merge_item(item);
    state.carts.save_carts(&carts).await.map_err(storage_error)?;

    info!(event_name = "cart.item_added", session_id = %session, "item merged into cart");
    Ok(Json(ApiMessage { message: "Item adicionado ao carrinho".to_string() }))
}

async fn atualizar_item(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    headers: HeaderMap,
    Json(body): Json<UpdateItemRequest>,
) -> Result<Json<ApiMessage>, Rejection> {
    let session = session_key(&headers);
    let (quantidade, preco) = validar_atualizacao(body).map_err(service_error)?;

    let _writer = state.cart_writer.lock().await;
    let mut carts = state.carts.load_carts().await.map_err(storage_error)?;
    let cart =
        carts.get_mut(&session).ok_or_else(|| service_error(item_nao_encontrado()))?;
    cart.update_item(id, quantidade, preco).map_err(service_error)?;
    state.carts.save_carts(&carts).await.map_err(storage_error)?;

    info!(event_name = "cart.item_updated", session_id = %session, item_id = %id, "line replaced");
    Ok(Json(ApiMessage { message: "Item atualizado com sucesso".to_string() }))
}

async fn remover_item(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    headers: HeaderMap,
) -> Result<Json<ApiMessage>, Rejection> {
    let session = session_key(&headers);

    let _writer = state.cart_writer.lock().await;
    let mut carts = state.carts.load_carts().await.map_err(storage_error)?;
    let cart =
        carts.get_mut(&session).ok_or_else(|| service_error(item_nao_encontrado()))?;
    cart.remove_item(id).map_err(service_error)?;
    state.carts.save_carts(&carts).await.map_err(storage_error)?;

    info!(event_name = "cart.item_removed", session_id = %session, item_id = %id, "line removed");
    Ok(Json(ApiMessage { message: "Item removido do carrinho".to_string() }))
}

/// Clearing requires the session to have been touched before: an untouched
/// session has no cart entry and is a 404, distinct from an existing empty
/// cart.
async fn limpar_carrinho(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<ApiMessage>, Rejection> {
    let session = session_key(&headers);

    let _writer = state.cart_writer.lock().await;
    let mut carts = state.carts.load_carts().await.map_err(storage_error)?;
    let cart = carts.get_mut(&session).ok_or_else(|| {
        service_error(ServiceError::not_found("Carrinho não encontrado para esta sessão"))
    })?;
    cart.clear();
    state.carts.save_carts(&carts).await.map_err(storage_error)?;

    info!(event_name = "cart.cleared", session_id = %session, "cart reset to empty");
    Ok(Json(ApiMessage { message: "Carrinho limpo com sucesso".to_string() }))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
