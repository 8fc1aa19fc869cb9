use serde::{Deserialize, Serialize};

use storefront_core::{CategoryId, Entity, ProductId};

use crate::price::Price;

/// Product read model (catalog snapshot entry).
///
/// Wire form follows the backend documents: camelCase keys, `_id` accepted for
/// the identifier, and `brand` may be missing entirely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(alias = "_id")]
    pub id: ProductId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    pub price: Price,
    pub category: CategoryId,
    #[serde(default)]
    pub count_in_stock: u32,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
}

impl Product {
    /// Minimal product; the remaining attributes start empty.
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        price: impl Into<Price>,
        category: impl Into<CategoryId>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            brand: None,
            price: price.into(),
            category: category.into(),
            count_in_stock: 0,
            description: String::new(),
            image: String::new(),
        }
    }

    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    pub fn with_stock(mut self, count: u32) -> Self {
        self.count_in_stock = count;
        self
    }

    pub fn brand(&self) -> Option<&str> {
        self.brand.as_deref()
    }

    /// Exact brand match; products without a brand never match.
    pub fn has_brand(&self, brand: &str) -> bool {
        self.brand.as_deref() == Some(brand)
    }

    pub fn in_stock(&self) -> bool {
        self.count_in_stock > 0
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
