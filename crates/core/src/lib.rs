//! Vitrine
//!
//! Vitrine is the storefront core for a jewellery shop: a pure cart reducer with derived totals,
//! and a filter/sort pipeline over product and order collections.

pub mod cart;
pub mod filters;
pub mod fixtures;
pub mod orders;
pub mod prelude;
pub mod prices;
pub mod products;
pub mod receipt;
pub mod sorting;
pub mod stock;
