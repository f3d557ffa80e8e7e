//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Collections holding entities look them up by `id()`, never by comparing
/// attribute values.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Copy + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
