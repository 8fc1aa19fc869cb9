use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::mpsc;

use storefront_catalog::{Category, Product};
use storefront_core::CategoryId;
use storefront_infra::{InMemoryCatalog, ShopConfig};
use storefront_shop::{
    ApplyOutcome, BackendError, CatalogBackend, FilterMode, FilterPolicy, ProductFilter,
    RetrievalResponse, ShopEngine, ShopSession,
};

fn storefront() -> Arc<InMemoryCatalog> {
    Arc::new(InMemoryCatalog::new(
        vec![
            Product::new("1", "Anvil", 105.0, "tools").with_brand("Acme"),
            Product::new("2", "Zip tie", 10.0, "hardware").with_brand("Zeta"),
            Product::new("3", "Hammer", 24.99, "tools").with_brand("Acme"),
            Product::new("4", "Rope", 12.0, "outdoor"),
            Product::new("5", "Tent", 210.0, "outdoor").with_brand("Zeta"),
        ],
        vec![
            Category::new("tools", "Tools"),
            Category::new("hardware", "Hardware"),
            Category::new("outdoor", "Outdoor"),
        ],
    ))
}

fn ids(products: &[Product]) -> Vec<&str> {
    products.iter().map(|p| p.id.as_str()).collect()
}

/// Delegates to an inner backend but can be switched into failure mode.
struct Flaky {
    inner: Arc<InMemoryCatalog>,
    failing: AtomicBool,
}

impl Flaky {
    fn new(inner: Arc<InMemoryCatalog>) -> Self {
        Self {
            inner,
            failing: AtomicBool::new(false),
        }
    }

    fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), BackendError> {
        if self.failing.load(Ordering::SeqCst) {
            Err(BackendError::Unavailable("connection refused".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl CatalogBackend for Flaky {
    async fn fetch_all_products(&self) -> Result<Vec<Product>, BackendError> {
        self.check()?;
        self.inner.fetch_all_products().await
    }

    async fn fetch_products_by_filter(
        &self,
        filter: &ProductFilter,
    ) -> Result<Vec<Product>, BackendError> {
        self.check()?;
        self.inner.fetch_products_by_filter(filter).await
    }

    async fn fetch_categories(&self) -> Result<Vec<Category>, BackendError> {
        self.check()?;
        self.inner.fetch_categories().await
    }
}

/// Single-category queries answer slowly, multi-category ones immediately.
struct Laggy {
    inner: Arc<InMemoryCatalog>,
}

#[async_trait]
impl CatalogBackend for Laggy {
    async fn fetch_all_products(&self) -> Result<Vec<Product>, BackendError> {
        self.inner.fetch_all_products().await
    }

    async fn fetch_products_by_filter(
        &self,
        filter: &ProductFilter,
    ) -> Result<Vec<Product>, BackendError> {
        if filter.categories.len() == 1 {
            tokio::time::sleep(Duration::from_millis(80)).await;
        }
        self.inner.fetch_products_by_filter(filter).await
    }

    async fn fetch_categories(&self) -> Result<Vec<Category>, BackendError> {
        self.inner.fetch_categories().await
    }
}

#[tokio::test]
async fn browsing_flow_with_baseline_policy() {
    storefront_observability::init_for_tests();

    let mut session = ShopSession::new(storefront(), FilterPolicy::Baseline);
    assert_eq!(session.start().await, ApplyOutcome::Applied);
    assert_eq!(session.view().categories.len(), 3);
    assert_eq!(session.view().brands, ["Acme", "Zeta"]);

    session.set_price_query("10");
    assert_eq!(ids(&session.view().products), ["1", "2", "5"]);

    session.select_brand("Zeta");
    assert_eq!(ids(&session.view().products), ["2", "5"]);

    session.toggle_category(CategoryId::new("outdoor"), true).await;
    let view = session.view();
    assert_eq!(view.mode, FilterMode::CategoryFiltered);
    // Backend answer verbatim: brand and price are not reapplied.
    assert_eq!(ids(&view.products), ["4", "5"]);
    assert_eq!(view.brands, ["Zeta"]);

    session.toggle_category(CategoryId::new("tools"), true).await;
    assert_eq!(ids(&session.view().products), ["1", "3", "4", "5"]);

    session.toggle_category(CategoryId::new("outdoor"), false).await;
    session.toggle_category(CategoryId::new("tools"), false).await;
    let view = session.view();
    assert_eq!(view.mode, FilterMode::Unfiltered);
    assert_eq!(ids(&view.products), ["1", "2", "5"]);

    assert_eq!(session.reset().await, ApplyOutcome::Applied);
    let view = session.view();
    assert_eq!(view.product_count, 5);
    assert_eq!(view.price_query, "");
    assert_eq!(view.selected_brand, None);
}

#[tokio::test]
async fn composed_policy_from_config() {
    storefront_observability::init_for_tests();

    let config = ShopConfig::from_lookup(|key| {
        (key == "STOREFRONT_FILTER_POLICY").then(|| "composed".to_string())
    })
    .unwrap();

    let mut session = ShopSession::new(storefront(), config.filter_policy);
    assert_eq!(session.engine().policy(), FilterPolicy::Composed);
    session.start().await;

    session.set_price_query("10");
    session.select_brand("Zeta");
    assert_eq!(ids(&session.view().products), ["2", "5"]);

    session.toggle_category(CategoryId::new("outdoor"), true).await;
    assert_eq!(ids(&session.view().products), ["5"]);
}

#[tokio::test]
async fn reset_reloads_categories_and_catalog() {
    storefront_observability::init_for_tests();

    let mut session = ShopSession::new(storefront(), FilterPolicy::Baseline);
    session.start().await;
    session.toggle_category(CategoryId::new("tools"), true).await;

    session.backend().set_categories(vec![Category::new("garden", "Garden")]);
    session
        .backend()
        .upsert_product(Product::new("6", "Spade", 18.0, "garden").with_brand("Nova"));

    assert_eq!(session.reset().await, ApplyOutcome::Applied);
    let view = session.view();
    assert_eq!(view.mode, FilterMode::Unfiltered);
    assert_eq!(view.categories.len(), 1);
    assert_eq!(view.categories[0].name, "Garden");
    assert_eq!(view.product_count, 6);
    assert_eq!(view.brands, ["Acme", "Zeta", "Nova"]);
}

#[tokio::test]
async fn restart_keeps_the_category_listing() {
    storefront_observability::init_for_tests();

    let mut session = ShopSession::new(storefront(), FilterPolicy::Baseline);
    session.start().await;
    session.toggle_category(CategoryId::new("outdoor"), true).await;

    assert_eq!(session.start().await, ApplyOutcome::Applied);
    let view = session.view();
    assert_eq!(view.mode, FilterMode::CategoryFiltered);
    assert_eq!(ids(&view.products), ["4", "5"]);
    assert_eq!(view.brands, ["Zeta"]);
}

#[tokio::test]
async fn backend_outage_keeps_last_good_result() {
    storefront_observability::init_for_tests();

    let backend = Arc::new(Flaky::new(storefront()));
    let mut session = ShopSession::new(backend.clone(), FilterPolicy::Baseline);
    session.start().await;

    backend.set_failing(true);
    let outcome = session.toggle_category(CategoryId::new("tools"), true).await;
    assert_eq!(outcome, ApplyOutcome::Failed);

    let view = session.view();
    assert_eq!(view.product_count, 5);
    let failure = view.failure.expect("failure flag set");
    assert!(failure.message.contains("connection refused"));
    assert!(!view.loading);

    backend.set_failing(false);
    session.toggle_category(CategoryId::new("tools"), true).await;
    let view = session.view();
    assert!(view.failure.is_none());
    assert_eq!(ids(&view.products), ["1", "3"]);
}

#[tokio::test]
async fn first_load_failure_shows_no_products() {
    storefront_observability::init_for_tests();

    let backend = Arc::new(Flaky::new(storefront()));
    backend.set_failing(true);

    let mut session = ShopSession::new(backend.clone(), FilterPolicy::Baseline);
    assert_eq!(session.start().await, ApplyOutcome::Failed);
    assert!(session.view().is_empty());
    assert!(session.view().categories.is_empty());

    backend.set_failing(false);
    assert_eq!(session.reset().await, ApplyOutcome::Applied);
    assert_eq!(session.view().product_count, 5);
}

#[tokio::test]
async fn overlapping_requests_resolve_to_the_latest() {
    storefront_observability::init_for_tests();

    let backend = Arc::new(Laggy { inner: storefront() });
    let mut engine = ShopEngine::new(FilterPolicy::Baseline);
    let req = engine.start();
    let result = backend.fetch(&req.query).await;
    engine.apply_retrieval(req.respond(result));

    // Rapid toggles: the first (single-category) request answers last.
    let first = engine.set_category_selection(CategoryId::new("tools"), true);
    let second = engine.set_category_selection(CategoryId::new("outdoor"), true);

    let (tx, mut rx) = mpsc::unbounded_channel::<RetrievalResponse>();
    for req in [first.clone(), second.clone()] {
        let backend = backend.clone();
        let tx = tx.clone();
        tokio::spawn(async move {
            let result = backend.fetch(&req.query).await;
            let _ = tx.send(req.respond(result));
        });
    }
    drop(tx);

    let mut outcomes = Vec::new();
    while let Some(response) = rx.recv().await {
        outcomes.push((response.seq, engine.apply_retrieval(response)));
    }

    assert_eq!(
        outcomes,
        [
            (second.seq, ApplyOutcome::Applied),
            (first.seq, ApplyOutcome::Stale { latest: second.seq }),
        ]
    );
    assert_eq!(ids(engine.derived()), ["1", "3", "4", "5"]);
    assert!(!engine.is_loading());
}

#[tokio::test]
async fn stale_filtered_answer_cannot_override_return_to_unfiltered() {
    storefront_observability::init_for_tests();

    let backend = Arc::new(Laggy { inner: storefront() });
    let mut engine = ShopEngine::new(FilterPolicy::Baseline);
    let req = engine.start();
    let result = backend.fetch(&req.query).await;
    engine.apply_retrieval(req.respond(result));

    let slow = engine.set_category_selection(CategoryId::new("tools"), true);
    let refresh = engine.set_category_selection(CategoryId::new("tools"), false);
    assert_eq!(ids(engine.derived()), ["1", "2", "3", "4", "5"]);

    let (slow_result, refresh_result) =
        tokio::join!(backend.fetch(&slow.query), backend.fetch(&refresh.query));
    assert_eq!(engine.apply_retrieval(refresh.respond(refresh_result)), ApplyOutcome::Applied);
    assert!(matches!(
        engine.apply_retrieval(slow.respond(slow_result)),
        ApplyOutcome::Stale { .. }
    ));
    assert_eq!(engine.derived().len(), 5);
}
