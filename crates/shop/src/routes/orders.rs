//! Order handlers.

use axum::{Json, extract::State};
use serde::Serialize;

use threefold_core::OrderId;
use threefold_platform::http::PathParam;

use crate::error::Result;
use crate::middleware::CurrentUser;
use crate::models::Order;
use crate::services::orders;
use crate::state::AppState;

/// Response to a successful placement.
#[derive(Debug, Serialize)]
pub struct PlacedOrder {
    pub message: &'static str,
    pub orders: Vec<Order>,
}

/// Turn the caller's cart into orders.
#[tracing::instrument(skip_all, fields(user_id = %user.id))]
pub async fn place(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<PlacedOrder>> {
    let orders = orders::place_order(state.pool(), user.id).await?;
    Ok(Json(PlacedOrder {
        message: "Order placed successfully",
        orders,
    }))
}

/// The caller's orders, newest first.
pub async fn index(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<Order>>> {
    Ok(Json(orders::list_orders(state.pool(), user.id).await?))
}

/// One of the caller's orders.
pub async fn show(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    PathParam(id): PathParam<OrderId>,
) -> Result<Json<Order>> {
    Ok(Json(orders::get_order(state.pool(), user.id, id).await?))
}
