//! Infrastructure layer: catalog backend adapters and configuration.

pub mod catalog;
pub mod config;

pub use catalog::InMemoryCatalog;
pub use config::{ConfigError, ShopConfig};
