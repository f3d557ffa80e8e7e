//! Store domain module.
//!
//! A `Store` owns an ordered collection of products and answers aggregate
//! queries (totals, listings) and batch orders over them. Deterministic domain
//! logic only (no IO, no presentation).

pub mod order;
pub mod store;

pub use order::{OrderLine, OrderReceipt, ReceiptLine};
pub use store::Store;
