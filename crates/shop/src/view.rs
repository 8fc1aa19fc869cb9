//! Read-only snapshot handed to the presentation layer.

use serde::Serialize;

use storefront_catalog::{Category, Product};
use storefront_core::CategoryId;

use crate::retrieval::RetrievalFailure;
use crate::selection::FilterMode;

/// Everything a shop page needs to render, in one serializable value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShopView {
    pub products: Vec<Product>,
    pub product_count: usize,
    pub categories: Vec<Category>,
    pub brands: Vec<String>,
    pub selected_categories: Vec<CategoryId>,
    pub selected_brand: Option<String>,
    pub price_query: String,
    pub mode: FilterMode,
    pub loading: bool,
    pub failure: Option<RetrievalFailure>,
}

impl ShopView {
    /// Nothing to show and nothing on the way: the "no products" state.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty() && !self.loading
    }
}
