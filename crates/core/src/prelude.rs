//! Vitrine prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartAction, CartLine, LineId, reduce},
    filters::{FilterCriteria, filter_products},
    fixtures::{Fixture, FixtureError},
    orders::{NewOrder, Order, OrderId, OrderStatus},
    prices::{Price, UnknownCurrencyError, currency_from_code},
    products::{Category, Metal, Product, ProductId, UnknownVariantError},
    receipt::{Receipt, ReceiptError},
    sorting::{SortConfig, SortDirection, SortValue, Sortable, sort_records},
    stock::{StockError, check_stock, clamp_quantity, default_size},
};
