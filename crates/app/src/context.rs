//! App Context

use std::{sync::Arc, time::Duration};

use rusty_money::iso::Currency;
use thiserror::Error;
use tracing::{debug, info};
use vitrine::{
    fixtures::{Fixture, FixtureError},
    prices::{UnknownCurrencyError, currency_from_code},
};

use crate::{
    config::storefront::StorefrontConfig,
    domain::{
        admin::AdminDashboard,
        cart::CartEngine,
        checkout::Checkout,
        listing::{DEFAULT_DEBOUNCE, ProductListing},
        orders::{HttpOrderSource, InMemoryOrderSource, OrderSource},
        products::{HttpProductSource, InMemoryProductSource, ProductSource},
    },
    storage::{FileStore, KeyValueStore},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to load fixtures: {0}")]
    Fixture(#[from] FixtureError),

    #[error(transparent)]
    Currency(#[from] UnknownCurrencyError),
}

/// Explicitly wired collaborators. Everything that needs a source or the store receives it from
/// here rather than looking it up.
#[derive(Clone)]
pub struct AppContext {
    pub products: Arc<dyn ProductSource>,
    pub orders: Arc<dyn OrderSource>,
    pub store: Arc<dyn KeyValueStore>,
    pub currency: &'static Currency,
    pub debounce: Duration,
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("currency", &self.currency.iso_alpha_code)
            .field("debounce", &self.debounce)
            .finish_non_exhaustive()
    }
}

impl AppContext {
    /// Build application context from configuration.
    ///
    /// With an API base URL, products and orders come from the REST backend. Otherwise the
    /// fixture catalog is served from memory and orders are kept in the data directory.
    ///
    /// # Errors
    ///
    /// Returns an error when the fixture set cannot be loaded or the currency is unknown.
    pub fn from_config(config: &StorefrontConfig) -> Result<Self, AppInitError> {
        let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(&config.data_dir));

        let mut context = if let Some(base_url) = &config.api_base_url {
            info!(%base_url, "using remote catalog");

            Self {
                products: Arc::new(HttpProductSource::new(base_url)),
                orders: Arc::new(HttpOrderSource::new(base_url)),
                store,
                currency: currency_from_code(&config.currency)?,
                debounce: DEFAULT_DEBOUNCE,
            }
        } else {
            let fixture = match &config.fixtures_dir {
                Some(dir) => {
                    let mut fixture = Fixture::with_base_path(dir);
                    fixture
                        .load_products(&config.fixture_set)?
                        .load_orders(&config.fixture_set)?;
                    fixture
                }
                None => Fixture::bundled()?,
            };

            Self::in_memory(fixture, store)?
        };

        context.debounce = config.filter_debounce();

        Ok(context)
    }

    /// Serve a fixture catalog from memory. Orders previously saved to `store` replace the
    /// fixture orders, and every order change is written back before it is applied.
    ///
    /// # Errors
    ///
    /// Returns an error if the fixture has no products (and so no currency).
    pub fn in_memory(fixture: Fixture, store: Arc<dyn KeyValueStore>) -> Result<Self, AppInitError> {
        let currency = fixture.currency()?;
        let (products, fixture_orders) = fixture.into_catalog();

        debug!(products = products.len(), "seeded in-memory catalog");

        Ok(Self {
            products: Arc::new(InMemoryProductSource::new(products)),
            orders: Arc::new(InMemoryOrderSource::persistent(
                Arc::clone(&store),
                fixture_orders,
            )),
            store,
            currency,
            debounce: DEFAULT_DEBOUNCE,
        })
    }

    /// The cart engine, restored from the store.
    pub fn cart_engine(&self) -> CartEngine {
        CartEngine::restore(Arc::clone(&self.store))
    }

    pub fn listing(&self) -> ProductListing {
        ProductListing::new(Arc::clone(&self.products), self.debounce)
    }

    pub fn dashboard(&self) -> AdminDashboard {
        AdminDashboard::new(Arc::clone(&self.products), Arc::clone(&self.orders))
    }

    pub fn checkout(&self) -> Checkout {
        Checkout::new(Arc::clone(&self.orders))
    }
}
