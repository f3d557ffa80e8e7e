use serde::{Deserialize, Serialize};

use storefront_core::{DomainError, DomainResult, ValueObject};

/// Unit price of a product.
///
/// Always finite and strictly positive. No currency is attached.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Price(f64);

impl ValueObject for Price {}

impl Price {
    pub fn new(amount: f64) -> DomainResult<Self> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(DomainError::validation(format!(
                "price must be greater than 0 (got {amount})"
            )));
        }
        Ok(Self(amount))
    }

    pub fn amount(self) -> f64 {
        self.0
    }

    /// Charge for `quantity` units at this price.
    pub fn times(self, quantity: u64) -> f64 {
        self.0 * quantity as f64
    }
}

impl TryFrom<f64> for Price {
    type Error = DomainError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Price> for f64 {
    fn from(value: Price) -> Self {
        value.0
    }
}

impl core::fmt::Display for Price {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}
