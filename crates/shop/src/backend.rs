//! Catalog backend port.
//!
//! The engine never talks to a transport directly. Whatever serves products
//! (HTTP API, in-memory fixture, cache) implements [`CatalogBackend`].

use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use storefront_catalog::{Category, Product};
use storefront_core::CategoryId;

/// Backend-side product filter.
///
/// `categories` is matched with OR semantics by the backend. Brand and price
/// are never sent: they narrow the snapshot locally, and the brand selector is
/// populated from the unnarrowed snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductFilter {
    pub categories: BTreeSet<CategoryId>,
}

impl ProductFilter {
    pub fn new(categories: impl IntoIterator<Item = CategoryId>) -> Self {
        Self {
            categories: categories.into_iter().collect(),
        }
    }
}

/// Which product listing a retrieval asks for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProductQuery {
    /// Full, unfiltered catalog.
    All,
    /// Backend-filtered listing.
    Filtered(ProductFilter),
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BackendError {
    #[error("catalog backend unavailable: {0}")]
    Unavailable(String),
    #[error("catalog backend timed out")]
    Timeout,
    #[error("failed to decode catalog response: {0}")]
    Decode(String),
}

/// Read operations the shop needs from the catalog backend.
#[async_trait]
pub trait CatalogBackend: Send + Sync {
    async fn fetch_all_products(&self) -> Result<Vec<Product>, BackendError>;

    async fn fetch_products_by_filter(
        &self,
        filter: &ProductFilter,
    ) -> Result<Vec<Product>, BackendError>;

    async fn fetch_categories(&self) -> Result<Vec<Category>, BackendError>;

    /// Run a [`ProductQuery`] against the matching read operation.
    async fn fetch(&self, query: &ProductQuery) -> Result<Vec<Product>, BackendError> {
        match query {
            ProductQuery::All => self.fetch_all_products().await,
            ProductQuery::Filtered(filter) => self.fetch_products_by_filter(filter).await,
        }
    }
}

#[async_trait]
impl<B> CatalogBackend for Arc<B>
where
    B: CatalogBackend + ?Sized,
{
    async fn fetch_all_products(&self) -> Result<Vec<Product>, BackendError> {
        (**self).fetch_all_products().await
    }

    async fn fetch_products_by_filter(
        &self,
        filter: &ProductFilter,
    ) -> Result<Vec<Product>, BackendError> {
        (**self).fetch_products_by_filter(filter).await
    }

    async fn fetch_categories(&self) -> Result<Vec<Category>, BackendError> {
        (**self).fetch_categories().await
    }
}
