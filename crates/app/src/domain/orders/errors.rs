//! Orders service errors.

use thiserror::Error;

use crate::storage::StorageError;

#[derive(Debug, Error)]
pub enum OrdersServiceError {
    #[error("order not found")]
    NotFound,

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected response from order backend: {0}")]
    UnexpectedResponse(String),

    #[error("failed to save orders: {0}")]
    Storage(#[from] StorageError),
}
