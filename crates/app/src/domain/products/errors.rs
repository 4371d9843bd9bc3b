//! Products service errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProductsServiceError {
    #[error("product not found")]
    NotFound,

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected response from product backend: {0}")]
    UnexpectedResponse(String),
}
