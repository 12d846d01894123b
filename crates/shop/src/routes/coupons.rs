//! Coupon handlers.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use threefold_platform::http::{JsonBody, QueryParams};

use crate::error::Result;
use crate::middleware::{AdminUser, CurrentUser};
use crate::models::{Coupon, NewCoupon};
use crate::services::coupons;
use crate::state::AppState;

/// `?code=` query.
#[derive(Debug, Deserialize)]
pub struct CouponQuery {
    pub code: String,
}

/// A coupon that can be used.
#[derive(Debug, Serialize)]
pub struct AppliedCoupon {
    pub message: String,
    pub discount_percentage: i64,
}

/// Check a coupon code. Nothing is recorded.
#[tracing::instrument(skip_all, fields(user_id = %user.id))]
pub async fn apply(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    QueryParams(query): QueryParams<CouponQuery>,
) -> Result<Json<AppliedCoupon>> {
    let coupon = coupons::apply_coupon(state.pool(), &query.code).await?;
    Ok(Json(AppliedCoupon {
        message: format!(
            "Coupon applied. {}% discount available",
            coupon.discount_percentage
        ),
        discount_percentage: coupon.discount_percentage,
    }))
}

/// Create a coupon.
#[tracing::instrument(skip_all, fields(admin_id = %admin.id))]
pub async fn create(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    JsonBody(input): JsonBody<NewCoupon>,
) -> Result<Json<Coupon>> {
    Ok(Json(coupons::create_coupon(state.pool(), input).await?))
}
