//! Application configuration

use clap::Args;

use crate::config::{observability::LoggingConfig, storefront::StorefrontConfig};

pub mod observability;
pub mod storefront;

/// Vitrine configuration shared by every command.
#[derive(Debug, Args)]
pub struct AppConfig {
    /// Catalog backend and local state settings.
    #[command(flatten)]
    pub storefront: StorefrontConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,
}
