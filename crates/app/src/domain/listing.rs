//! Product listing controller.
//!
//! Coalesces rapid filter edits with a debounce timer and publishes fetch results through a
//! `watch` channel. Every criteria change bumps a generation counter; a fetch only publishes if
//! its generation is still current when it completes, so a slow, superseded response can never
//! overwrite a newer one.

use std::{sync::Arc, time::Duration};

use tokio::{sync::watch, task::JoinHandle, time::sleep};
use tracing::{debug, warn};
use vitrine::{
    filters::FilterCriteria,
    prices::Price,
    products::{Category, Metal, Product},
};

use crate::domain::products::ProductSource;

/// Debounce applied to criteria changes unless configured otherwise.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// What the listing currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingState {
    /// A fetch is scheduled or in flight.
    Loading,

    /// Products matching the current criteria.
    Ready(Vec<Product>),

    /// The last fetch failed.
    Failed(String),
}

/// A published listing state, tagged with the criteria generation it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingSnapshot {
    pub generation: u64,
    pub criteria: FilterCriteria,
    pub state: ListingState,
}

pub struct ProductListing {
    source: Arc<dyn ProductSource>,
    debounce: Duration,
    state: Arc<watch::Sender<ListingSnapshot>>,
    timer: Option<JoinHandle<()>>,
}

impl std::fmt::Debug for ProductListing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProductListing")
            .field("debounce", &self.debounce)
            .field("snapshot", &*self.state.borrow())
            .finish_non_exhaustive()
    }
}

impl ProductListing {
    /// Create a listing with empty criteria. Nothing is fetched until the first
    /// [`refresh`](Self::refresh) or criteria change.
    pub fn new(source: Arc<dyn ProductSource>, debounce: Duration) -> Self {
        let (state, _) = watch::channel(ListingSnapshot {
            generation: 0,
            criteria: FilterCriteria::default(),
            state: ListingState::Loading,
        });

        Self {
            source,
            debounce,
            state: Arc::new(state),
            timer: None,
        }
    }

    /// Observe published states.
    pub fn subscribe(&self) -> watch::Receiver<ListingSnapshot> {
        self.state.subscribe()
    }

    /// The latest published snapshot.
    pub fn snapshot(&self) -> ListingSnapshot {
        self.state.borrow().clone()
    }

    pub fn criteria(&self) -> FilterCriteria {
        self.state.borrow().criteria.clone()
    }

    /// Replace the criteria and schedule a debounced fetch, cancelling any pending timer.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        self.schedule(criteria, self.debounce);
    }

    /// Fetch the current criteria again, without waiting for the debounce.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub fn refresh(&mut self) {
        self.schedule(self.criteria(), Duration::ZERO);
    }

    pub fn set_max_price(&mut self, max_price: Option<Price>) {
        let mut criteria = self.criteria();
        criteria.max_price = max_price;
        self.set_criteria(criteria);
    }

    pub fn toggle_metal(&mut self, metal: Metal) {
        let mut criteria = self.criteria();
        criteria.toggle_metal(metal);
        self.set_criteria(criteria);
    }

    pub fn toggle_category(&mut self, category: Category) {
        let mut criteria = self.criteria();
        criteria.toggle_category(category);
        self.set_criteria(criteria);
    }

    fn schedule(&mut self, criteria: FilterCriteria, delay: Duration) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }

        let mut generation = 0;

        self.state.send_modify(|snapshot| {
            snapshot.generation += 1;
            snapshot.criteria = criteria.clone();
            snapshot.state = ListingState::Loading;
            generation = snapshot.generation;
        });

        debug!(generation, ?delay, "scheduled product fetch");

        let source = Arc::clone(&self.source);
        let state = Arc::clone(&self.state);

        // Only the timer is cancellable; once it fires, the fetch runs to completion and the
        // generation check decides whether its result is used.
        self.timer = Some(tokio::spawn(async move {
            sleep(delay).await;
            tokio::spawn(fetch_and_publish(source, state, criteria, generation));
        }));
    }
}

impl Drop for ProductListing {
    fn drop(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}

async fn fetch_and_publish(
    source: Arc<dyn ProductSource>,
    state: Arc<watch::Sender<ListingSnapshot>>,
    criteria: FilterCriteria,
    generation: u64,
) {
    let result = source.get_all(&criteria).await;

    let published = state.send_if_modified(|snapshot| {
        if snapshot.generation != generation {
            return false;
        }

        snapshot.state = match &result {
            Ok(products) => ListingState::Ready(products.clone()),
            Err(error) => ListingState::Failed(error.to_string()),
        };

        true
    });

    match result {
        Err(error) if published => warn!(generation, %error, "product fetch failed"),
        _ if !published => debug!(generation, "discarded stale product fetch"),
        _ => debug!(generation, "published product fetch"),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Mutex, PoisonError,
        atomic::{AtomicUsize, Ordering},
    };

    use async_trait::async_trait;
    use testresult::TestResult;
    use vitrine::{
        filters::filter_products,
        products::{Category, Metal, ProductId},
    };

    use crate::domain::products::{
        ProductsServiceError,
        data::{NewProduct, ProductUpdate},
    };

    use super::*;

    /// Product source whose fetch latency depends on the requested price ceiling.
    struct DelayedSource {
        catalog: Vec<Product>,
        calls: AtomicUsize,
        requested: Mutex<Vec<FilterCriteria>>,
    }

    impl DelayedSource {
        fn new() -> Self {
            let product = |id: &str, price: u64, metal: Metal| Product {
                id: ProductId::new(id),
                name: id.to_string(),
                description: String::new(),
                price: Price::new(price),
                images: Vec::new(),
                metal,
                category: Category::Rings,
                sizes: None,
                stock: 1,
            };

            Self {
                catalog: vec![
                    product("cheap", 100, Metal::Silver),
                    product("mid", 500, Metal::Gold),
                    product("dear", 900, Metal::Platinum),
                ],
                calls: AtomicUsize::new(0),
                requested: Mutex::default(),
            }
        }

        fn latency(criteria: &FilterCriteria) -> Duration {
            match criteria.max_price {
                Some(price) if price.minor_units() >= 1000 => Duration::from_millis(2000),
                _ => Duration::from_millis(10),
            }
        }
    }

    #[async_trait]
    impl ProductSource for DelayedSource {
        async fn get_all(
            &self,
            criteria: &FilterCriteria,
        ) -> Result<Vec<Product>, ProductsServiceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.requested
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(criteria.clone());

            sleep(Self::latency(criteria)).await;

            if criteria.max_price == Some(Price::new(1)) {
                return Err(ProductsServiceError::UnexpectedResponse("boom".to_string()));
            }

            Ok(filter_products(&self.catalog, criteria))
        }

        async fn get_by_id(
            &self,
            _id: &ProductId,
        ) -> Result<Option<Product>, ProductsServiceError> {
            Ok(None)
        }

        async fn get_featured(&self) -> Result<Vec<Product>, ProductsServiceError> {
            Ok(Vec::new())
        }

        async fn add_product(&self, _product: NewProduct) -> Result<Product, ProductsServiceError> {
            Err(ProductsServiceError::InvalidData("read only".to_string()))
        }

        async fn update_product(
            &self,
            _id: &ProductId,
            _update: ProductUpdate,
        ) -> Result<Product, ProductsServiceError> {
            Err(ProductsServiceError::NotFound)
        }

        async fn delete_product(&self, _id: &ProductId) -> Result<(), ProductsServiceError> {
            Err(ProductsServiceError::NotFound)
        }
    }

    fn ids(state: &ListingState) -> Vec<&str> {
        match state {
            ListingState::Ready(products) => products.iter().map(|p| p.id.as_str()).collect(),
            _ => Vec::new(),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn rapid_edits_coalesce_into_one_fetch() -> TestResult {
        let source = Arc::new(DelayedSource::new());
        let mut listing = ProductListing::new(source.clone(), DEFAULT_DEBOUNCE);
        let mut rx = listing.subscribe();

        listing.toggle_metal(Metal::Gold);
        sleep(Duration::from_millis(100)).await;
        listing.toggle_metal(Metal::Silver);
        sleep(Duration::from_millis(100)).await;
        listing.set_max_price(Some(Price::new(400)));

        let snapshot = rx
            .wait_for(|s| matches!(s.state, ListingState::Ready(_)))
            .await?
            .clone();

        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
        assert_eq!(snapshot.generation, 3);
        assert_eq!(ids(&snapshot.state), ["cheap"]);

        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn nothing_is_fetched_before_the_debounce_elapses() {
        let source = Arc::new(DelayedSource::new());
        let mut listing = ProductListing::new(source.clone(), DEFAULT_DEBOUNCE);

        listing.toggle_category(Category::Rings);
        sleep(Duration::from_millis(299)).await;

        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
        assert_eq!(listing.snapshot().state, ListingState::Loading);
    }

    #[tokio::test(start_paused = true)]
    async fn stale_responses_are_discarded() -> TestResult {
        let source = Arc::new(DelayedSource::new());
        let mut listing = ProductListing::new(source.clone(), DEFAULT_DEBOUNCE);
        let mut rx = listing.subscribe();

        // Slow fetch goes out first.
        listing.set_max_price(Some(Price::new(5000)));
        sleep(Duration::from_millis(350)).await;
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);

        // A newer, fast fetch overtakes it.
        listing.set_max_price(Some(Price::new(200)));

        let snapshot = rx
            .wait_for(|s| matches!(s.state, ListingState::Ready(_)))
            .await?
            .clone();

        assert_eq!(ids(&snapshot.state), ["cheap"]);

        // Let the slow fetch finish; it must not replace the newer result.
        sleep(Duration::from_millis(3000)).await;

        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
        assert_eq!(listing.snapshot().generation, 2);
        assert_eq!(ids(&listing.snapshot().state), ["cheap"]);

        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn refresh_skips_the_debounce() -> TestResult {
        let source = Arc::new(DelayedSource::new());
        let mut listing = ProductListing::new(source.clone(), Duration::from_secs(60));
        let mut rx = listing.subscribe();

        listing.refresh();

        let snapshot = rx
            .wait_for(|s| matches!(s.state, ListingState::Ready(_)))
            .await?
            .clone();

        assert_eq!(ids(&snapshot.state), ["cheap", "mid", "dear"]);

        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn failures_are_published() -> TestResult {
        let source = Arc::new(DelayedSource::new());
        let mut listing = ProductListing::new(source, DEFAULT_DEBOUNCE);
        let mut rx = listing.subscribe();

        listing.set_max_price(Some(Price::new(1)));

        let snapshot = rx
            .wait_for(|s| matches!(s.state, ListingState::Failed(_)))
            .await?
            .clone();

        assert!(matches!(snapshot.state, ListingState::Failed(message) if message.contains("boom")));

        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn toggling_updates_criteria_immediately() {
        let source = Arc::new(DelayedSource::new());
        let mut listing = ProductListing::new(source.clone(), DEFAULT_DEBOUNCE);

        listing.toggle_metal(Metal::Gold);
        listing.toggle_metal(Metal::Gold);
        listing.toggle_category(Category::Earrings);

        let criteria = listing.criteria();

        assert!(criteria.metals().is_empty());
        assert_eq!(criteria.categories(), [Category::Earrings]);

        sleep(Duration::from_millis(400)).await;

        let requested = source
            .requested
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();

        assert_eq!(requested, [criteria]);
    }
}
