//! Catalog and review handlers.

use axum::{Json, extract::State};

use threefold_core::ProductId;
use threefold_platform::http::{JsonBody, Message, PathParam, QueryParams, message};

use crate::error::Result;
use crate::middleware::{AdminUser, CurrentUser};
use crate::models::{NewProduct, NewReview, Product, ProductFilter, Review};
use crate::services::catalog;
use crate::state::AppState;

/// Search products by name and price range.
#[tracing::instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    QueryParams(filter): QueryParams<ProductFilter>,
) -> Result<Json<Vec<Product>>> {
    Ok(Json(catalog::search(state.pool(), &filter).await?))
}

/// Product detail.
pub async fn show(
    State(state): State<AppState>,
    PathParam(id): PathParam<ProductId>,
) -> Result<Json<Product>> {
    Ok(Json(catalog::product(state.pool(), id).await?))
}

/// Create a product.
#[tracing::instrument(skip_all, fields(admin_id = %admin.id))]
pub async fn create(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    JsonBody(input): JsonBody<NewProduct>,
) -> Result<Json<Product>> {
    Ok(Json(catalog::create_product(state.pool(), input).await?))
}

/// Reviews of a product.
pub async fn reviews(
    State(state): State<AppState>,
    PathParam(id): PathParam<ProductId>,
) -> Result<Json<Vec<Review>>> {
    Ok(Json(catalog::reviews(state.pool(), id).await?))
}

/// Post a review.
#[tracing::instrument(skip_all, fields(user_id = %user.id))]
pub async fn add_review(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    JsonBody(review): JsonBody<NewReview>,
) -> Result<Json<Message>> {
    catalog::add_review(state.pool(), user.id, &review).await?;
    Ok(message("Review added successfully"))
}
