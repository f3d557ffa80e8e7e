//! Products domain module.
//!
//! This crate contains the business rules for a single sellable item: price,
//! stock level and availability, implemented purely as deterministic domain
//! logic (no IO, no presentation).

pub mod price;
pub mod product;

pub use price::Price;
pub use product::{NewProduct, Product};
pub use storefront_core::ProductId;
