//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are immutable and compared by their attribute values. A unit
/// price is a value object; a product is an entity.
///
/// ```ignore
/// #[derive(Debug, Clone, Copy, PartialEq)]
/// struct Price(f64);
///
/// impl ValueObject for Price {}
///
/// assert_eq!(Price(250.0), Price(250.0));
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
