//! Catalog read models.
//!
//! Products and categories as the storefront backend returns them, plus the
//! admin-side product draft validation. Pure data + deterministic rules (no IO).

pub mod category;
pub mod draft;
pub mod price;
pub mod product;

pub use category::Category;
pub use draft::{NewProduct, ProductDraft};
pub use price::Price;
pub use product::Product;
