//! Value object trait: equality by value, not identity.
//!
//! Value objects are domain objects that have **no identity** - they are defined entirely
//! by their attribute values. Two value objects with the same values are considered equal.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. To "modify" one,
/// build a new one.
///
/// - **Value Object**: No identity (a `Price` of 10 equals any other `Price` of 10)
/// - **Entity**: Has identity (two products with the same id are the same product)
///
/// ```ignore
/// #[derive(Debug, Clone, Copy, PartialEq)]
/// struct Price(f64);
///
/// impl ValueObject for Price {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
