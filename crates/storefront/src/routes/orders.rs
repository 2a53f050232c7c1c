//! Order tracking route handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use bookstore_core::OrderId;
use bookstore_core::api::OrderResponse;

use crate::error::{AppError, Result};
use crate::middleware::RequireBearer;
use crate::state::AppState;

/// An order and its delivery progress.
///
/// Any marker may read any order; ownership is not checked.
pub async fn show(
    State(state): State<AppState>,
    RequireBearer(_token): RequireBearer,
    Path(id): Path<String>,
) -> Result<Json<OrderResponse>> {
    let not_found = || AppError::NotFound("Order not found".to_string());

    let id: OrderId = id.parse().map_err(|_| not_found())?;
    let order = state.orders().get(id).await.ok_or_else(not_found)?;

    Ok(Json(OrderResponse {
        progress: order.progress(),
        order,
    }))
}
