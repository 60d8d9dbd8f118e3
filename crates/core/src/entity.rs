//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Persisted collections are keyed by this identity when updating or deleting a
/// single record.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug + core::fmt::Display;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
