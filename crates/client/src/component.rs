//! The product listing component: fetch-on-mount, filtering, add-to-cart.
//!
//! State lives behind a mutex shared with the in-flight load future. Every
//! mutation is a short synchronous critical section; the only suspension point
//! is the catalog fetch itself.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use rand::SeedableRng;
use rand::rngs::StdRng;
use storefront_core::{
    Catalog, CategoryFilter, DomainError, FilterState, Product, ProductId, RawProduct, enrich_all,
};
use storefront_events::CartDispatcher;
use thiserror::Error;

use crate::cancel::CancelToken;
use crate::fetch::{CatalogSource, FetchError, fetch_cancellable};
use crate::render::{self, CardAction, ProductsView};

#[derive(Debug, Error)]
pub enum ComponentError {
    /// `mount` was called a second time; one fetch per mount.
    #[error("component is already mounted")]
    AlreadyMounted,
    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// How the mount-time load settled. Reported to the host for logging only;
/// the component never propagates failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded { count: usize },
    Failed(FetchError),
    Cancelled,
}

/// Loading flag plus catalog/filtered view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductsState {
    loading: bool,
    filter: FilterState,
}

impl ProductsState {
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn catalog(&self) -> &Catalog {
        self.filter.catalog()
    }

    pub fn filtered(&self) -> &[Product] {
        self.filter.filtered()
    }
}

#[derive(Debug, Default)]
struct Shared {
    state: Mutex<ProductsState>,
    token: CancelToken,
    mounted: AtomicBool,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, ProductsState> {
        // Poisoning is ignored: state is plain data.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Product listing component.
///
/// Dropping the component cancels any in-flight fetch.
pub struct ProductsComponent {
    shared: Arc<Shared>,
    source: Arc<dyn CatalogSource>,
    dispatcher: CartDispatcher,
    rng: StdRng,
}

impl ProductsComponent {
    /// Create a component with entropy-seeded mock enrichment.
    pub fn new(source: Arc<dyn CatalogSource>, dispatcher: CartDispatcher) -> Self {
        Self::with_rng(source, dispatcher, StdRng::from_entropy())
    }

    /// Create a component with an explicit generator for mock enrichment.
    pub fn with_rng(source: Arc<dyn CatalogSource>, dispatcher: CartDispatcher, rng: StdRng) -> Self {
        Self {
            shared: Arc::new(Shared::default()),
            source,
            dispatcher,
            rng,
        }
    }

    /// Begin the mount-time load.
    ///
    /// Sets the loading flag and returns the future that performs the single
    /// catalog fetch; the host drives it (`tokio::spawn`, `spawn_local`, ...).
    /// Results are committed only if the component has not been unmounted.
    pub fn mount(&self) -> Result<impl Future<Output = LoadOutcome> + use<>, ComponentError> {
        if self.shared.mounted.swap(true, Ordering::SeqCst) {
            return Err(ComponentError::AlreadyMounted);
        }

        self.shared.lock().loading = true;
        tracing::debug!("products component mounted");

        let shared = self.shared.clone();
        let source = self.source.clone();
        let mut rng = self.rng.clone();

        Ok(async move {
            let fetched = fetch_cancellable(source.as_ref(), &shared.token).await;
            settle(&shared, fetched, &mut rng)
        })
    }

    /// Spawn the mount-time load on the current tokio runtime.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn spawn_mount(&self) -> Result<tokio::task::JoinHandle<LoadOutcome>, ComponentError> {
        let load = self.mount()?;
        Ok(tokio::spawn(load))
    }

    /// Tear down: cancel the in-flight fetch, whether or not it completed.
    pub fn unmount(&self) {
        self.shared.token.cancel();
        tracing::debug!("products component unmounted");
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> ProductsState {
        self.shared.lock().clone()
    }

    pub fn is_loading(&self) -> bool {
        self.shared.lock().loading
    }

    /// Derive the current view.
    pub fn view(&self) -> ProductsView {
        let state = self.shared.lock();
        render::render(state.loading, state.filtered())
    }

    /// "All" button.
    pub fn show_all(&self) {
        self.shared.lock().filter.show_all();
    }

    /// Category button.
    pub fn filter_by_category(&self, category: &str) {
        self.shared.lock().filter.filter_by_category(category);
    }

    /// Any filter-bar button.
    pub fn apply_filter(&self, filter: CategoryFilter) {
        self.shared.lock().filter.apply(filter);
    }

    /// Press the action button of the displayed card for `id`.
    ///
    /// Returns `Ok(true)` when the product was dispatched to the cart and
    /// `Ok(false)` when the card's action is the disabled out-of-stock button.
    /// Products not currently displayed cannot be pressed.
    pub fn press_card_action(&self, id: ProductId) -> Result<bool, ComponentError> {
        let product = {
            let state = self.shared.lock();
            if state.loading {
                return Err(DomainError::not_found(id.to_string()).into());
            }
            state
                .filtered()
                .iter()
                .find(|p| p.id() == id)
                .cloned()
                .ok_or_else(|| DomainError::not_found(id.to_string()))?
        };

        match render::render_card(&product).action {
            CardAction::AddToCart => {
                self.dispatcher.add_to_cart(&product);
                Ok(true)
            }
            CardAction::OutOfStock => Ok(false),
        }
    }

    /// Non-UI dispatch path. Stock is not checked.
    pub fn add_to_cart(&self, product: &Product) {
        self.dispatcher.add_to_cart(product);
    }
}

impl Drop for ProductsComponent {
    fn drop(&mut self) {
        self.shared.token.cancel();
    }
}

impl core::fmt::Debug for ProductsComponent {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ProductsComponent")
            .field("shared", &self.shared)
            .finish_non_exhaustive()
    }
}

/// Commit the fetch result, unless the component was torn down meanwhile.
fn settle(
    shared: &Shared,
    fetched: Option<Result<Vec<RawProduct>, FetchError>>,
    rng: &mut StdRng,
) -> LoadOutcome {
    let Some(result) = fetched else {
        tracing::debug!("catalog fetch cancelled");
        return LoadOutcome::Cancelled;
    };

    let mut state = shared.lock();
    if shared.token.is_cancelled() {
        tracing::debug!("catalog fetch settled after unmount; ignoring");
        return LoadOutcome::Cancelled;
    }

    match result {
        Ok(raws) => {
            let products = enrich_all(raws, rng);
            let count = products.len();
            state.filter = FilterState::new(Catalog::new(products));
            state.loading = false;
            tracing::info!(count, "catalog loaded");
            LoadOutcome::Loaded { count }
        }
        Err(e) => {
            state.loading = false;
            tracing::error!(error = %e, "catalog fetch failed");
            LoadOutcome::Failed(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use rust_decimal::Decimal;
    use std::sync::atomic::AtomicUsize;
    use std::time::Duration;
    use storefront_core::{Category, Variant};
    use storefront_events::{ADDED_TO_CART, InMemoryCart, RecordingNotifier};
    use tokio::sync::Notify;

    /// Source that counts calls and resolves once `release` is notified.
    struct GatedSource {
        records: Result<Vec<RawProduct>, FetchError>,
        release: Notify,
        gated: bool,
        calls: AtomicUsize,
    }

    impl GatedSource {
        fn ready(records: Result<Vec<RawProduct>, FetchError>) -> Arc<Self> {
            Arc::new(Self {
                records,
                release: Notify::new(),
                gated: false,
                calls: AtomicUsize::new(0),
            })
        }

        fn gated(records: Vec<RawProduct>) -> Arc<Self> {
            Arc::new(Self {
                records: Ok(records),
                release: Notify::new(),
                gated: true,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl CatalogSource for GatedSource {
        async fn fetch_products(&self) -> Result<Vec<RawProduct>, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.gated {
                self.release.notified().await;
            }
            self.records.clone()
        }
    }

    struct Harness {
        component: ProductsComponent,
        source: Arc<GatedSource>,
        cart: Arc<InMemoryCart>,
        notifier: Arc<RecordingNotifier>,
    }

    fn harness(source: Arc<GatedSource>) -> Harness {
        let cart = Arc::new(InMemoryCart::new());
        let notifier = Arc::new(RecordingNotifier::new());
        let dispatcher = CartDispatcher::new(cart.clone(), notifier.clone());
        let component =
            ProductsComponent::with_rng(source.clone(), dispatcher, StdRng::seed_from_u64(11));
        Harness {
            component,
            source,
            cart,
            notifier,
        }
    }

    fn raw(id: u64, category: &str) -> RawProduct {
        RawProduct {
            id: ProductId::new(id),
            title: format!("Product {id}"),
            price: Decimal::new(5000 + id as i64, 2),
            description: format!("Description of product {id}"),
            category: Category::new(category),
            image: format!("https://example.test/{id}.jpg"),
        }
    }

    fn four_products() -> Vec<RawProduct> {
        vec![
            raw(1, Category::MENS_CLOTHING),
            raw(2, Category::JEWELERY),
            raw(3, Category::MENS_CLOTHING),
            raw(4, Category::JEWELERY),
        ]
    }

    fn ids(products: &[Product]) -> Vec<u64> {
        products.iter().map(|p| p.id().get()).collect()
    }

    #[test]
    fn new_component_is_idle_and_empty() {
        let h = harness(GatedSource::ready(Ok(vec![])));
        let state = h.component.state();
        assert!(!state.is_loading());
        assert!(state.catalog().is_empty());
    }

    #[tokio::test]
    async fn mount_sets_loading_until_load_settles() {
        let h = harness(GatedSource::ready(Ok(four_products())));

        let load = h.component.mount().unwrap();
        assert!(h.component.is_loading());
        assert!(h.component.view().is_loading());

        assert_eq!(load.await, LoadOutcome::Loaded { count: 4 });
        assert!(!h.component.is_loading());
    }

    #[tokio::test]
    async fn successful_load_populates_catalog_and_view() {
        let h = harness(GatedSource::ready(Ok(four_products())));
        h.component.mount().unwrap().await;

        let state = h.component.state();
        assert_eq!(state.catalog().len(), 4);
        assert_eq!(state.filtered(), state.catalog().products());
        for product in state.filtered() {
            assert!(product.stock().units() <= 10);
            assert_eq!(product.variants(), &Variant::ALL);
        }
        assert_eq!(h.component.view().cards().len(), 4);
    }

    #[tokio::test]
    async fn mount_fetches_exactly_once() {
        let h = harness(GatedSource::ready(Ok(four_products())));
        h.component.mount().unwrap().await;

        assert!(matches!(h.component.mount(), Err(ComponentError::AlreadyMounted)));
        assert_eq!(h.source.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn filter_then_show_all_round_trips_in_fetch_order() {
        let h = harness(GatedSource::ready(Ok(four_products())));
        h.component.mount().unwrap().await;

        h.component.filter_by_category(Category::JEWELERY);
        assert_eq!(ids(h.component.state().filtered()), [2, 4]);

        h.component.show_all();
        assert_eq!(ids(h.component.state().filtered()), [1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn filter_with_no_matches_shows_empty_grid() {
        let h = harness(GatedSource::ready(Ok(four_products())));
        h.component.mount().unwrap().await;

        h.component.filter_by_category(Category::ELECTRONICS);
        assert!(h.component.view().cards().is_empty());
        assert_eq!(h.component.state().catalog().len(), 4);
    }

    #[tokio::test]
    async fn failed_fetch_clears_loading_and_leaves_catalog_empty() {
        let h = harness(GatedSource::ready(Err(FetchError::Network("refused".to_string()))));

        let outcome = h.component.mount().unwrap().await;

        assert_eq!(outcome, LoadOutcome::Failed(FetchError::Network("refused".to_string())));
        let state = h.component.state();
        assert!(!state.is_loading());
        assert!(state.catalog().is_empty());
        assert!(h.component.view().cards().is_empty());
    }

    #[tokio::test]
    async fn unmount_before_response_leaves_state_untouched() {
        let h = harness(GatedSource::gated(four_products()));

        let task = h.component.spawn_mount().unwrap();
        tokio::task::yield_now().await;
        let before = h.component.state();

        h.component.unmount();
        h.source.release.notify_waiters();

        let outcome = tokio::time::timeout(Duration::from_secs(1), task)
            .await
            .expect("load should settle after unmount")
            .unwrap();

        assert_eq!(outcome, LoadOutcome::Cancelled);
        assert_eq!(h.component.state(), before);
        assert!(h.component.is_loading());
        assert!(h.component.state().catalog().is_empty());
    }

    #[tokio::test]
    async fn result_arriving_after_unmount_is_discarded() {
        let h = harness(GatedSource::ready(Ok(four_products())));

        let load = h.component.mount().unwrap();
        h.component.unmount();

        assert_eq!(load.await, LoadOutcome::Cancelled);
        assert!(h.component.state().catalog().is_empty());
    }

    #[tokio::test]
    async fn dropping_component_cancels_load() {
        let h = harness(GatedSource::gated(four_products()));
        let task = h.component.spawn_mount().unwrap();
        tokio::task::yield_now().await;

        drop(h.component);

        let outcome = tokio::time::timeout(Duration::from_secs(1), task)
            .await
            .expect("load should settle after drop")
            .unwrap();
        assert_eq!(outcome, LoadOutcome::Cancelled);
    }

    fn forty_products() -> Vec<RawProduct> {
        (1..=40).map(|id| raw(id, Category::JEWELERY)).collect()
    }

    #[tokio::test]
    async fn in_stock_card_dispatches_to_cart_and_notifies() {
        let h = harness(GatedSource::ready(Ok(forty_products())));
        h.component.mount().unwrap().await;

        let id = h
            .component
            .state()
            .filtered()
            .iter()
            .find(|p| p.is_purchasable())
            .map(|p| p.id())
            .expect("seeded catalog has an in-stock product");

        assert!(h.component.press_card_action(id).unwrap());
        assert_eq!(h.cart.quantity_of(id), 1);
        assert_eq!(h.notifier.messages(), [ADDED_TO_CART]);
    }

    #[tokio::test]
    async fn out_of_stock_card_never_reaches_cart() {
        let h = harness(GatedSource::ready(Ok(forty_products())));
        h.component.mount().unwrap().await;

        let state = h.component.state();
        let sold_out = state
            .filtered()
            .iter()
            .find(|p| !p.is_purchasable())
            .expect("seeded catalog has an out-of-stock product");

        let card = h
            .component
            .view()
            .cards()
            .iter()
            .find(|c| c.id == sold_out.id())
            .cloned()
            .unwrap();
        assert_eq!(card.action, CardAction::OutOfStock);

        assert!(!h.component.press_card_action(sold_out.id()).unwrap());
        assert!(h.cart.is_empty());
        assert!(h.notifier.messages().is_empty());
    }

    #[tokio::test]
    async fn hidden_products_cannot_be_pressed() {
        let h = harness(GatedSource::ready(Ok(four_products())));
        h.component.mount().unwrap().await;
        h.component.filter_by_category(Category::JEWELERY);

        let err = h.component.press_card_action(ProductId::new(1)).unwrap_err();
        assert!(matches!(err, ComponentError::Domain(DomainError::NotFound(_))));
    }

    #[tokio::test]
    async fn direct_add_to_cart_skips_stock_check() {
        let h = harness(GatedSource::ready(Ok(vec![])));
        let product = storefront_core::enrich_with_stock(
            raw(9, Category::ELECTRONICS),
            storefront_core::Stock::OUT_OF_STOCK,
        );

        h.component.add_to_cart(&product);

        assert_eq!(h.cart.quantity_of(ProductId::new(9)), 1);
    }
}
