//! Product reviews.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use threefold_core::{ProductId, ReviewId, UserId};

/// Inclusive bounds for `rating`.
pub const RATING_RANGE: std::ops::RangeInclusive<i64> = 1..=5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Review {
    pub id: ReviewId,
    pub user_id: UserId,
    pub product_id: ProductId,
    pub rating: i64,
    pub review_text: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Input for posting a review.
#[derive(Debug, Clone, Deserialize)]
pub struct NewReview {
    pub product_id: ProductId,
    pub rating: i64,
    pub review_text: Option<String>,
}
