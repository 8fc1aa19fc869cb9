//! Admin product form validation.
//!
//! The admin console collects every field as free text. A draft is only turned
//! into a submittable [`NewProduct`] once all required fields are present and
//! the numeric ones parse.

use serde::{Deserialize, Serialize};

use storefront_core::{CategoryId, DomainError, DomainResult};

use crate::price::Price;

/// Raw admin form input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub price: String,
    pub category: String,
    pub quantity: String,
    pub brand: String,
    #[serde(default)]
    pub count_in_stock: u32,
    #[serde(default)]
    pub image: Option<String>,
}

/// Validated product ready to hand to the backend's create operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: Price,
    pub category: CategoryId,
    pub quantity: u32,
    pub brand: String,
    pub count_in_stock: u32,
    pub image: Option<String>,
}

impl ProductDraft {
    pub fn validate(&self) -> DomainResult<NewProduct> {
        let required = [
            &self.name,
            &self.price,
            &self.description,
            &self.category,
            &self.quantity,
            &self.brand,
        ];
        if required.iter().any(|field| field.trim().is_empty()) {
            return Err(DomainError::validation("please fill in all required fields"));
        }

        let price: f64 = self
            .price
            .trim()
            .parse()
            .map_err(|_| DomainError::validation(format!("price is not a number: {}", self.price)))?;
        if !price.is_finite() || price < 0.0 {
            return Err(DomainError::validation("price must be a non-negative amount"));
        }

        let quantity: u32 = self.quantity.trim().parse().map_err(|_| {
            DomainError::validation(format!("quantity is not a whole number: {}", self.quantity))
        })?;

        let category: CategoryId = self.category.parse()?;

        Ok(NewProduct {
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            price: Price::new(price),
            category,
            quantity,
            brand: self.brand.trim().to_string(),
            count_in_stock: self.count_in_stock,
            image: self.image.clone().filter(|i| !i.trim().is_empty()),
        })
    }
}
