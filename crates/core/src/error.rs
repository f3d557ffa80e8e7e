//! Domain error model.

use thiserror::Error;

use crate::id::ProductId;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Every variant is raised synchronously at the point of violation. Domain code
/// never retries or logs these; the caller decides how to recover.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A constructor or mutation argument was malformed.
    #[error("validation failed: {0}")]
    Validation(String),

    /// More units were requested than the product has in stock.
    #[error("insufficient quantity of {product}: requested {requested}, available {available}")]
    InsufficientStock {
        product: String,
        requested: u64,
        available: u64,
    },

    /// The product is inactive and cannot be bought or quoted.
    #[error("{0} is out of stock")]
    OutOfStock(String),

    /// No product with this identity is held by the store.
    #[error("product {0} not found")]
    NotFound(ProductId),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn insufficient_stock(product: impl Into<String>, requested: u64, available: u64) -> Self {
        Self::InsufficientStock {
            product: product.into(),
            requested,
            available,
        }
    }

    pub fn out_of_stock(product: impl Into<String>) -> Self {
        Self::OutOfStock(product.into())
    }

    pub fn not_found(id: ProductId) -> Self {
        Self::NotFound(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_product() {
        let err = DomainError::insufficient_stock("Google Pixel 7", 300, 250);
        assert_eq!(
            err.to_string(),
            "insufficient quantity of Google Pixel 7: requested 300, available 250"
        );

        let err = DomainError::out_of_stock("MacBook Air M2");
        assert_eq!(err.to_string(), "MacBook Air M2 is out of stock");
    }
}
