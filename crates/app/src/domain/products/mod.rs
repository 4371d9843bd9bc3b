//! Products

pub mod data;
pub mod errors;
mod http;
mod memory;
pub mod service;

pub use errors::ProductsServiceError;
pub use http::HttpProductSource;
pub use memory::InMemoryProductSource;
pub use service::*;
