//! Filter state & result engine.
//!
//! ## Modes
//!
//! - **Unfiltered** (no category selected): the result is computed locally
//!   from the full catalog snapshot.
//! - **Category-filtered**: the backend matches categories; its response is
//!   the base catalog.
//!
//! ## Policies
//!
//! Under [`FilterPolicy::Baseline`] brand and price do not compose: whichever
//! was touched last decides the result, selecting a brand discards the price
//! filter, and a category response is shown exactly as received.
//! [`FilterPolicy::Composed`] ANDs the price predicate and the selected brand
//! over the base catalog in every mode.
//!
//! The derived result is always rebuilt from a snapshot, never patched.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use storefront_catalog::{Category, Product};
use storefront_core::CategoryId;

use crate::backend::{BackendError, ProductFilter, ProductQuery};
use crate::price::price_matches;
use crate::retrieval::{
    ApplyOutcome, RetrievalFailure, RetrievalRequest, RetrievalResponse, RetrievalSequence,
};
use crate::selection::{FilterMode, SelectionState};
use crate::view::ShopView;

/// How brand and price selections combine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterPolicy {
    /// Last filter action wins; category responses are not narrowed locally.
    #[default]
    Baseline,
    /// Price AND brand over the base catalog, in both modes.
    Composed,
}

/// Which local filter was touched last (only consulted by the baseline policy).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterAction {
    #[default]
    Price,
    Brand,
}

#[derive(Debug, Clone, Default)]
pub struct ShopEngine {
    policy: FilterPolicy,
    selection: SelectionState,
    /// Latest `ProductQuery::All` response.
    full_catalog: Vec<Product>,
    /// Latest applied response (full or backend-filtered).
    base_catalog: Vec<Product>,
    categories: Vec<Category>,
    derived: Vec<Product>,
    last_action: FilterAction,
    retrievals: RetrievalSequence,
    failure: Option<RetrievalFailure>,
}

impl ShopEngine {
    pub fn new(policy: FilterPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn policy(&self) -> FilterPolicy {
        self.policy
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn mode(&self) -> FilterMode {
        self.selection.mode()
    }

    /// Products to display.
    pub fn derived(&self) -> &[Product] {
        &self.derived
    }

    /// Snapshot the derived result is computed from.
    pub fn base_catalog(&self) -> &[Product] {
        &self.base_catalog
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn last_action(&self) -> FilterAction {
        self.last_action
    }

    pub fn retrieval_failure(&self) -> Option<&RetrievalFailure> {
        self.failure.as_ref()
    }

    /// True while the most recently issued retrieval has not been answered.
    pub fn is_loading(&self) -> bool {
        self.retrievals.in_flight()
    }

    /// Mount-time retrieval for the current selection.
    ///
    /// A fresh engine asks for the full catalog; with categories selected the
    /// backend-filtered listing is requested instead.
    pub fn start(&mut self) -> RetrievalRequest {
        let req = self.retrievals.issue(self.selection_query());
        tracing::debug!(seq = req.seq, query = ?req.query, "requesting catalog");
        req
    }

    /// Include or exclude a category. Always asks for a fresh retrieval.
    ///
    /// Going back to an empty selection recomputes from the full catalog
    /// right away; the `All` request only refreshes that snapshot.
    pub fn set_category_selection(&mut self, category: CategoryId, included: bool) -> RetrievalRequest {
        let changed = self.selection.toggle_category(category.clone(), included);
        self.last_action = FilterAction::Price;
        tracing::debug!(%category, included, changed, mode = ?self.mode(), "category selection updated");

        if self.mode() == FilterMode::Unfiltered {
            self.base_catalog = self.full_catalog.clone();
            self.refresh_derived();
        }

        let query = self.selection_query();
        self.retrievals.issue(query)
    }

    /// Single-choice brand selection.
    pub fn set_brand_selection(&mut self, brand: impl Into<String>) {
        let brand = brand.into();
        tracing::debug!(%brand, "brand selected");
        self.selection.brand = Some(brand);
        self.last_action = FilterAction::Brand;

        match self.policy {
            // Unconditional overwrite, in either mode.
            FilterPolicy::Baseline => self.derived = self.brand_filtered(),
            FilterPolicy::Composed => self.refresh_derived(),
        }
    }

    pub fn set_price_query(&mut self, text: impl Into<String>) {
        self.selection.price_query = text.into();
        tracing::debug!(query = %self.selection.price_query, "price query updated");

        match (self.policy, self.mode()) {
            (FilterPolicy::Baseline, FilterMode::Unfiltered) => {
                self.last_action = FilterAction::Price;
                self.refresh_derived();
            }
            (FilterPolicy::Baseline, FilterMode::CategoryFiltered) => {}
            (FilterPolicy::Composed, _) => self.refresh_derived(),
        }
    }

    /// Distinct brands of the base catalog, in first-occurrence order.
    pub fn unique_brands(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.base_catalog
            .iter()
            .filter_map(Product::brand)
            .filter(|brand| seen.insert(*brand))
            .map(str::to_string)
            .collect()
    }

    /// Back to the initial selection; snapshots are dropped and refetched.
    ///
    /// The category list is reference data and is kept. Sequence numbers keep
    /// counting, so answers to pre-reset requests are discarded.
    pub fn reset(&mut self) -> RetrievalRequest {
        self.selection = SelectionState::default();
        self.full_catalog.clear();
        self.base_catalog.clear();
        self.derived.clear();
        self.last_action = FilterAction::Price;
        self.failure = None;

        let req = self.retrievals.issue(ProductQuery::All);
        tracing::info!(seq = req.seq, "filters reset");
        req
    }

    /// Apply a backend answer; only the latest issued request is honored.
    pub fn apply_retrieval(&mut self, response: RetrievalResponse) -> ApplyOutcome {
        let RetrievalResponse { seq, query, result } = response;

        if !self.retrievals.is_current(seq) {
            let latest = self.retrievals.latest();
            tracing::warn!(seq, latest, "discarding stale catalog response");
            return ApplyOutcome::Stale { latest };
        }
        self.retrievals.settle();

        match result {
            Ok(products) => {
                tracing::info!(seq, count = products.len(), ?query, "catalog response applied");
                if query == ProductQuery::All {
                    self.full_catalog = products.clone();
                }
                self.base_catalog = products;
                self.failure = None;
                self.last_action = FilterAction::Price;
                self.refresh_derived();
                ApplyOutcome::Applied
            }
            Err(err) => {
                tracing::warn!(seq, ?query, error = %err, "catalog retrieval failed; keeping last result");
                self.failure = Some(RetrievalFailure::new(seq, query, &err));
                ApplyOutcome::Failed
            }
        }
    }

    /// Store the category list for the category selector.
    pub fn apply_categories(&mut self, result: Result<Vec<Category>, BackendError>) {
        match result {
            Ok(categories) => {
                tracing::debug!(count = categories.len(), "categories loaded");
                self.categories = categories;
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to load categories; keeping previous list");
            }
        }
    }

    pub fn view(&self) -> ShopView {
        ShopView {
            product_count: self.derived.len(),
            products: self.derived.clone(),
            categories: self.categories.clone(),
            brands: self.unique_brands(),
            selected_categories: self.selection.categories.iter().cloned().collect(),
            selected_brand: self.selection.brand.clone(),
            price_query: self.selection.price_query.clone(),
            mode: self.mode(),
            loading: self.is_loading(),
            failure: self.failure.clone(),
        }
    }

    fn selection_query(&self) -> ProductQuery {
        match self.mode() {
            FilterMode::Unfiltered => ProductQuery::All,
            FilterMode::CategoryFiltered => ProductQuery::Filtered(ProductFilter::new(
                self.selection.categories.iter().cloned(),
            )),
        }
    }

    fn refresh_derived(&mut self) {
        self.derived = match (self.policy, self.mode(), self.last_action) {
            (FilterPolicy::Composed, _, _) => self.composed(),
            (FilterPolicy::Baseline, FilterMode::CategoryFiltered, _) => self.base_catalog.clone(),
            (FilterPolicy::Baseline, FilterMode::Unfiltered, FilterAction::Price) => {
                self.price_filtered()
            }
            (FilterPolicy::Baseline, FilterMode::Unfiltered, FilterAction::Brand) => {
                self.brand_filtered()
            }
        };
    }

    fn price_filtered(&self) -> Vec<Product> {
        let query = self.selection.price_query.as_str();
        self.base_catalog
            .iter()
            .filter(|p| price_matches(p.price, query))
            .cloned()
            .collect()
    }

    fn brand_filtered(&self) -> Vec<Product> {
        let Some(brand) = self.selection.brand.as_deref() else {
            return self.base_catalog.clone();
        };
        self.base_catalog
            .iter()
            .filter(|p| p.has_brand(brand))
            .cloned()
            .collect()
    }

    fn composed(&self) -> Vec<Product> {
        let query = self.selection.price_query.as_str();
        let brand = self.selection.brand.as_deref();
        self.base_catalog
            .iter()
            .filter(|p| price_matches(p.price, query))
            .filter(|p| brand.is_none_or(|b| p.has_brand(b)))
            .cloned()
            .collect()
    }
}
