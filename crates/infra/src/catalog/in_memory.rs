use std::sync::RwLock;

use async_trait::async_trait;

use storefront_catalog::{Category, Product};
use storefront_core::Entity;
use storefront_shop::{BackendError, CatalogBackend, ProductFilter};

/// In-memory catalog backend for tests/dev.
///
/// Listing order is insertion order, matching what the shop renders.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    products: RwLock<Vec<Product>>,
    categories: RwLock<Vec<Category>>,
}

impl InMemoryCatalog {
    pub fn new(products: Vec<Product>, categories: Vec<Category>) -> Self {
        Self {
            products: RwLock::new(products),
            categories: RwLock::new(categories),
        }
    }

    /// Build from backend JSON documents (arrays of products and categories).
    pub fn from_json(products: &str, categories: &str) -> Result<Self, BackendError> {
        let products: Vec<Product> =
            serde_json::from_str(products).map_err(|e| BackendError::Decode(e.to_string()))?;
        let categories: Vec<Category> =
            serde_json::from_str(categories).map_err(|e| BackendError::Decode(e.to_string()))?;
        Ok(Self::new(products, categories))
    }

    /// Insert or replace a product (by id); new products go last.
    pub fn upsert_product(&self, product: Product) {
        if let Ok(mut products) = self.products.write() {
            match products.iter_mut().find(|p| p.id() == product.id()) {
                Some(existing) => *existing = product,
                None => products.push(product),
            }
        }
    }

    pub fn set_categories(&self, categories: Vec<Category>) {
        if let Ok(mut guard) = self.categories.write() {
            *guard = categories;
        }
    }

    pub fn len(&self) -> usize {
        self.products.read().map(|p| p.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned() -> BackendError {
    BackendError::Unavailable("in-memory catalog lock poisoned".to_string())
}

#[async_trait]
impl CatalogBackend for InMemoryCatalog {
    async fn fetch_all_products(&self) -> Result<Vec<Product>, BackendError> {
        let products = self.products.read().map_err(|_| poisoned())?;
        Ok(products.clone())
    }

    async fn fetch_products_by_filter(
        &self,
        filter: &ProductFilter,
    ) -> Result<Vec<Product>, BackendError> {
        let products = self.products.read().map_err(|_| poisoned())?;
        let matched: Vec<Product> = products
            .iter()
            .filter(|p| filter.categories.is_empty() || filter.categories.contains(&p.category))
            .cloned()
            .collect();
        tracing::debug!(categories = filter.categories.len(), matched = matched.len(), "filtered catalog");
        Ok(matched)
    }

    async fn fetch_categories(&self) -> Result<Vec<Category>, BackendError> {
        let categories = self.categories.read().map_err(|_| poisoned())?;
        Ok(categories.clone())
    }
}
