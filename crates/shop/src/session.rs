//! Async driver pairing a [`ShopEngine`] with a [`CatalogBackend`].
//!
//! Each operation runs its retrieval to completion before returning, so a
//! session never has overlapping requests of its own. Callers that need
//! overlap drive the engine's request/response API directly.

use storefront_core::CategoryId;

use crate::backend::CatalogBackend;
use crate::engine::{FilterPolicy, ShopEngine};
use crate::retrieval::{ApplyOutcome, RetrievalRequest};
use crate::view::ShopView;

pub struct ShopSession<B> {
    engine: ShopEngine,
    backend: B,
}

impl<B: CatalogBackend> ShopSession<B> {
    pub fn new(backend: B, policy: FilterPolicy) -> Self {
        Self {
            engine: ShopEngine::new(policy),
            backend,
        }
    }

    pub fn engine(&self) -> &ShopEngine {
        &self.engine
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn view(&self) -> ShopView {
        self.engine.view()
    }

    /// Load categories and the listing for the current selection.
    pub async fn start(&mut self) -> ApplyOutcome {
        self.load_categories().await;
        let req = self.engine.start();
        self.run(req).await
    }

    pub async fn toggle_category(&mut self, category: CategoryId, included: bool) -> ApplyOutcome {
        let req = self.engine.set_category_selection(category, included);
        self.run(req).await
    }

    pub fn select_brand(&mut self, brand: impl Into<String>) {
        self.engine.set_brand_selection(brand);
    }

    pub fn set_price_query(&mut self, text: impl Into<String>) {
        self.engine.set_price_query(text);
    }

    /// Clear every filter and reload categories and the full catalog.
    pub async fn reset(&mut self) -> ApplyOutcome {
        let req = self.engine.reset();
        self.load_categories().await;
        self.run(req).await
    }

    async fn load_categories(&mut self) {
        let categories = self.backend.fetch_categories().await;
        self.engine.apply_categories(categories);
    }

    async fn run(&mut self, req: RetrievalRequest) -> ApplyOutcome {
        let result = self.backend.fetch(&req.query).await;
        self.engine.apply_retrieval(req.respond(result))
    }
}
