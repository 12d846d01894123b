//! Integer price representation in minor currency units.
//!
//! Prices are stored and computed as whole minor units (cents). There is no
//! floating point anywhere in the money path, and multiplication is checked
//! so an order total can never silently wrap.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors produced by price arithmetic and validation.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceError {
    /// A price cannot be negative.
    #[error("price cannot be negative")]
    Negative,
    /// The computed amount does not fit in an `i64`.
    #[error("price overflow")]
    Overflow,
}

/// A non-negative amount in minor currency units.
///
/// # Example
///
/// ```
/// use threefold_core::Price;
///
/// let unit = Price::from_minor(250).unwrap();
/// assert_eq!(unit.times(4).unwrap(), Price::from_minor(1000).unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlite", derive(sqlx::Type), sqlx(transparent))]
#[serde(try_from = "i64", into = "i64")]
pub struct Price(i64);

impl Price {
    /// Zero.
    pub const ZERO: Self = Self(0);

    /// Create a price from minor units.
    ///
    /// # Errors
    ///
    /// Returns `PriceError::Negative` for amounts below zero.
    pub const fn from_minor(amount: i64) -> Result<Self, PriceError> {
        if amount < 0 {
            return Err(PriceError::Negative);
        }
        Ok(Self(amount))
    }

    /// The amount in minor units.
    #[must_use]
    pub const fn minor_units(self) -> i64 {
        self.0
    }

    /// Multiply by a line quantity.
    ///
    /// # Errors
    ///
    /// Returns `PriceError::Negative` for a negative quantity and
    /// `PriceError::Overflow` if the product does not fit in an `i64`.
    pub const fn times(self, quantity: i64) -> Result<Self, PriceError> {
        if quantity < 0 {
            return Err(PriceError::Negative);
        }
        match self.0.checked_mul(quantity) {
            Some(total) => Ok(Self(total)),
            None => Err(PriceError::Overflow),
        }
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i64> for Price {
    type Error = PriceError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::from_minor(value)
    }
}

impl From<Price> for i64 {
    fn from(price: Price) -> Self {
        price.0
    }
}
