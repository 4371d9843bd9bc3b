//! Vitrine Domain Concerns

pub mod admin;
pub mod cart;
pub mod checkout;
pub mod listing;
pub mod orders;
pub mod products;
