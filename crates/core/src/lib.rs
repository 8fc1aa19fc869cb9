//! `storefront-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives shared by the catalog and the
//! shop filter engine (no IO, no async, no backend concerns).

pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{CategoryId, ProductId};
pub use value_object::ValueObject;
