//! Entity trait: identity + continuity across snapshots.

/// Entity marker + minimal interface.
///
/// Catalog snapshots are refetched wholesale; two records with the same id
/// describe the same product even when their attributes differ between
/// snapshots.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
