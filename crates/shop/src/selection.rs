//! Shopper selection state.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use storefront_core::CategoryId;

/// Operating mode, implied by the category selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterMode {
    /// No category selected; the result is computed locally from the full catalog.
    Unfiltered,
    /// At least one category selected; the backend performs the matching.
    CategoryFiltered,
}

/// What the shopper has picked so far.
///
/// Fields are read-only outside this crate; [`crate::ShopEngine`] is the only
/// writer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionState {
    pub(crate) categories: BTreeSet<CategoryId>,
    pub(crate) brand: Option<String>,
    pub(crate) price_query: String,
}

impl SelectionState {
    pub fn categories(&self) -> &BTreeSet<CategoryId> {
        &self.categories
    }

    pub fn brand(&self) -> Option<&str> {
        self.brand.as_deref()
    }

    pub fn price_query(&self) -> &str {
        &self.price_query
    }

    pub fn mode(&self) -> FilterMode {
        if self.categories.is_empty() {
            FilterMode::Unfiltered
        } else {
            FilterMode::CategoryFiltered
        }
    }

    /// Adds or removes `category`. Returns whether membership changed.
    pub(crate) fn toggle_category(&mut self, category: CategoryId, included: bool) -> bool {
        if included {
            self.categories.insert(category)
        } else {
            self.categories.remove(&category)
        }
    }
}
