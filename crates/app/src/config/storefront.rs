//! Storefront Config

use std::{path::PathBuf, time::Duration};

use clap::Args;

/// Catalog backend and local state settings.
#[derive(Debug, Clone, Args)]
pub struct StorefrontConfig {
    /// Base URL of the storefront REST API. When unset, the bundled catalog is served from
    /// memory.
    #[arg(long, env = "VITRINE_API_BASE_URL")]
    pub api_base_url: Option<String>,

    /// Directory for persisted client state (cart, local orders).
    #[arg(long, env = "VITRINE_DATA_DIR", default_value = ".vitrine")]
    pub data_dir: PathBuf,

    /// Fixture set seeding the in-memory catalog.
    #[arg(long, env = "VITRINE_FIXTURE_SET", default_value = vitrine::fixtures::BUNDLED_SET)]
    pub fixture_set: String,

    /// Directory containing fixture sets. When unset, the set compiled into the binary is used.
    #[arg(long, env = "VITRINE_FIXTURES_DIR")]
    pub fixtures_dir: Option<PathBuf>,

    /// Currency code for prices served by a remote backend.
    #[arg(long, env = "VITRINE_CURRENCY", default_value = "USD")]
    pub currency: String,

    /// Delay before a filter change triggers a fetch, in milliseconds.
    #[arg(long, env = "VITRINE_FILTER_DEBOUNCE_MS", default_value_t = 300_u64)]
    pub filter_debounce_ms: u64,
}

impl StorefrontConfig {
    #[must_use]
    pub fn filter_debounce(&self) -> Duration {
        Duration::from_millis(self.filter_debounce_ms)
    }
}
