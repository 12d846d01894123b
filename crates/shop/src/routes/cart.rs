//! Cart and wishlist handlers.

use axum::{Json, extract::State};
use serde::Deserialize;

use threefold_core::{ProductId, UserId};
use threefold_platform::http::{JsonBody, Message, PathParam, QueryParams, message};

use crate::db;
use crate::error::Result;
use crate::middleware::CurrentUser;
use crate::models::{CartLine, WishlistItem};
use crate::services::cart;
use crate::state::AppState;

/// Add-to-cart request body.
#[derive(Debug, Deserialize)]
pub struct AddToCart {
    pub product_id: ProductId,
    pub quantity: i64,
}

/// `?product_id=` query.
#[derive(Debug, Deserialize)]
pub struct ProductQuery {
    pub product_id: ProductId,
}

/// Add a product to the caller's cart.
#[tracing::instrument(skip_all, fields(user_id = %user.id, product_id = %item.product_id))]
pub async fn add(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    JsonBody(item): JsonBody<AddToCart>,
) -> Result<Json<Message>> {
    cart::add_to_cart(state.pool(), user.id, item.product_id, item.quantity).await?;
    Ok(message("Cart updated"))
}

/// The caller's cart.
pub async fn show(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<CartLine>>> {
    Ok(Json(cart::cart_for(state.pool(), user.id).await?))
}

/// Any user's cart. Unauthenticated; unknown users have an empty cart.
pub async fn show_for_user(
    State(state): State<AppState>,
    PathParam(user_id): PathParam<UserId>,
) -> Result<Json<Vec<CartLine>>> {
    Ok(Json(db::cart::lines_for_user(state.pool(), user_id).await?))
}

/// Remove the caller's line for a product.
pub async fn remove(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    PathParam(product_id): PathParam<ProductId>,
) -> Result<Json<Message>> {
    cart::remove_from_cart(state.pool(), user.id, product_id).await?;
    Ok(message("Removed from cart"))
}

/// Add a product to the caller's wishlist.
pub async fn add_to_wishlist(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    QueryParams(query): QueryParams<ProductQuery>,
) -> Result<Json<Message>> {
    cart::add_to_wishlist(state.pool(), user.id, query.product_id).await?;
    Ok(message("Added to wishlist"))
}

/// The caller's wishlist.
pub async fn wishlist(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<WishlistItem>>> {
    Ok(Json(cart::wishlist_for(state.pool(), user.id).await?))
}
