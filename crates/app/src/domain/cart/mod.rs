//! Cart

mod engine;

pub use engine::{CART_STORAGE_KEY, CartEngine};
