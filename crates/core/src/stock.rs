//! Stock checks
//!
//! The reducer never looks at stock. Callers validate against [`Product::stock`] before
//! dispatching an `ADD_ITEM`.

use thiserror::Error;

use crate::products::Product;

/// Reasons a requested quantity cannot be added.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum StockError {
    /// Quantities start at one.
    #[error("quantity must be at least 1, got {0}")]
    InvalidQuantity(i64),

    /// More units were requested than are in stock.
    #[error("only {available} in stock, {requested} requested")]
    InsufficientStock {
        /// Units requested
        requested: u32,
        /// Units in stock
        available: u32,
    },
}

/// Validate a quantity before adding it to a cart.
///
/// # Errors
///
/// - [`StockError::InvalidQuantity`]: the quantity is below one.
/// - [`StockError::InsufficientStock`]: the quantity exceeds the product's stock.
pub fn check_stock(product: &Product, quantity: i64) -> Result<u32, StockError> {
    let requested = u32::try_from(quantity)
        .ok()
        .filter(|q| *q >= 1)
        .ok_or(StockError::InvalidQuantity(quantity))?;

    if requested > product.stock {
        return Err(StockError::InsufficientStock {
            requested,
            available: product.stock,
        });
    }

    Ok(requested)
}

/// Clamp a quantity picker value into `1..=stock`. Out-of-stock products still clamp to 1.
pub fn clamp_quantity(product: &Product, requested: i64) -> u32 {
    let max = i64::from(product.stock.max(1));

    u32::try_from(requested.clamp(1, max)).unwrap_or(1)
}

/// The size preselected on a product page.
pub fn default_size(product: &Product) -> Option<&str> {
    product.sizes().first().map(String::as_str)
}
