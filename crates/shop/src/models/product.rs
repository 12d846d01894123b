//! Catalog products.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use threefold_core::{Price, ProductId};

/// A product. `stock` never goes negative; order placement only decrements
/// it conditionally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Price,
    pub stock: i64,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a product. `Price` rejects negative amounts during
/// deserialization.
#[derive(Debug, Clone, Deserialize)]
pub struct NewProduct {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Price,
    pub stock: i64,
}

/// Catalog search: optional case-insensitive name substring and an
/// inclusive price range in minor units.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProductFilter {
    pub search: Option<String>,
    #[serde(default = "default_min_price")]
    pub min_price: i64,
    #[serde(default = "default_max_price")]
    pub max_price: i64,
}

impl Default for ProductFilter {
    fn default() -> Self {
        Self {
            search: None,
            min_price: default_min_price(),
            max_price: default_max_price(),
        }
    }
}

const fn default_min_price() -> i64 {
    0
}

const fn default_max_price() -> i64 {
    100_000
}
