//! Cart engine.

use std::sync::Arc;

use tracing::{debug, warn};
use vitrine::{
    cart::{Cart, CartAction, LineId},
    prices::Price,
    products::Product,
    stock::{StockError, check_stock, default_size},
};

use crate::storage::{self, KeyValueStore};

/// Storage key the cart is persisted under.
pub const CART_STORAGE_KEY: &str = "vitrine_cart";

/// Owns the live cart and mirrors every transition to storage.
///
/// Transitions are applied in dispatch order. Persisting is best-effort: a failed write is logged
/// and the in-memory state still advances.
pub struct CartEngine {
    cart: Cart,
    store: Arc<dyn KeyValueStore>,
}

impl std::fmt::Debug for CartEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartEngine")
            .field("cart", &self.cart)
            .finish_non_exhaustive()
    }
}

impl CartEngine {
    /// Restore the cart persisted in `store`, or start empty.
    pub fn restore(store: Arc<dyn KeyValueStore>) -> Self {
        let cart: Cart = storage::load_or_default(store.as_ref(), CART_STORAGE_KEY);

        debug!(lines = cart.len(), count = cart.count(), "restored cart");

        Self { cart, store }
    }

    /// Apply `action` and persist the resulting state.
    pub fn dispatch(&mut self, action: &CartAction) -> &Cart {
        self.cart = self.cart.apply(action);
        self.persist();

        &self.cart
    }

    pub fn add_item(&mut self, product: &Product, quantity: u32, size: Option<&str>) -> &Cart {
        self.dispatch(&CartAction::add_item(product, quantity, size))
    }

    pub fn remove_item(&mut self, id: impl Into<LineId>) -> &Cart {
        self.dispatch(&CartAction::remove_item(id))
    }

    pub fn update_quantity(&mut self, id: impl Into<LineId>, quantity: i64) -> &Cart {
        self.dispatch(&CartAction::update_quantity(id, quantity))
    }

    pub fn clear(&mut self) -> &Cart {
        self.dispatch(&CartAction::ClearCart)
    }

    /// Add a product after validating the quantity against its stock.
    ///
    /// Stock is per product, so units already in the cart in any size count towards the limit.
    /// When the product is sized and no size is given, the first listed size is used.
    ///
    /// # Errors
    ///
    /// Returns a [`StockError`] if the quantity is below one or the cart would hold more units
    /// than are in stock.
    #[tracing::instrument(
        name = "cart.engine.add_product_checked",
        skip(self, product),
        fields(product = %product.id),
        err
    )]
    pub fn add_product_checked(
        &mut self,
        product: &Product,
        quantity: i64,
        size: Option<&str>,
    ) -> Result<(), StockError> {
        let requested = check_stock(product, quantity)?;
        let size = size.filter(|s| !s.is_empty()).or_else(|| default_size(product));

        let in_cart = self.units_in_cart(product, size);
        let combined = in_cart.saturating_add(requested);

        if combined > product.stock {
            return Err(StockError::InsufficientStock {
                requested: combined,
                available: product.stock,
            });
        }

        self.add_item(product, requested, size);

        Ok(())
    }

    /// Units of `product` across every line built from it, whatever the size.
    fn units_in_cart(&self, product: &Product, size: Option<&str>) -> u32 {
        let mut ids = vec![LineId::for_product(&product.id, None)];

        for label in product.sizes().iter().map(String::as_str).chain(size) {
            let id = LineId::for_product(&product.id, Some(label));

            if !ids.contains(&id) {
                ids.push(id);
            }
        }

        ids.iter()
            .filter_map(|id| self.cart.line(id))
            .fold(0, |total: u32, line| total.saturating_add(line.quantity))
    }

    #[must_use]
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Total units across all lines.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.cart.count()
    }

    /// Cart subtotal.
    #[must_use]
    pub fn total(&self) -> Price {
        self.cart.total()
    }

    fn persist(&self) {
        if let Err(error) = storage::save(self.store.as_ref(), CART_STORAGE_KEY, &self.cart) {
            warn!(%error, "failed to persist cart");
        }
    }
}
