//! Discount coupons.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use threefold_core::CouponId;

/// Inclusive bounds for `discount_percentage`.
pub const DISCOUNT_RANGE: std::ops::RangeInclusive<i64> = 1..=100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Coupon {
    pub id: CouponId,
    pub code: String,
    pub discount_percentage: i64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a coupon.
#[derive(Debug, Clone, Deserialize)]
pub struct NewCoupon {
    pub code: String,
    pub discount_percentage: i64,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

const fn default_active() -> bool {
    true
}
