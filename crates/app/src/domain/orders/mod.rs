//! Orders

pub mod errors;
mod http;
mod memory;
pub mod service;

pub use errors::OrdersServiceError;
pub use http::HttpOrderSource;
pub use memory::{InMemoryOrderSource, ORDERS_STORAGE_KEY};
pub use service::*;
