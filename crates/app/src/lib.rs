//! Storefront application layer: persistence, catalog backends and the controllers that drive
//! the cart and product listings.

pub mod config;
pub mod context;
pub mod domain;
pub mod observability;
pub mod storage;
