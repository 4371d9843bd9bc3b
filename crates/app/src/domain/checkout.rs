//! Checkout.
//!
//! Turns the live cart into a stored order. Payment is out of scope; the order total is the cart
//! subtotal.

use std::sync::Arc;

use jiff::{Zoned, civil::Date};
use thiserror::Error;
use tracing::info;
use vitrine::orders::{NewOrder, Order, OrderStatus};

use crate::domain::{
    cart::CartEngine,
    orders::{OrderSource, OrdersServiceError},
};

#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("cannot check out an empty cart")]
    EmptyCart,

    #[error("customer name is required")]
    MissingName,

    #[error("invalid email address: {0:?}")]
    InvalidEmail(String),

    #[error("failed to store order: {0}")]
    Orders(#[from] OrdersServiceError),
}

/// Shipping contact collected at checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    pub name: String,
    pub email: Option<String>,
}

impl Customer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: None,
        }
    }

    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    fn validate(&self) -> Result<(), CheckoutError> {
        if self.name.trim().is_empty() {
            return Err(CheckoutError::MissingName);
        }

        match &self.email {
            Some(email) if !is_plausible_email(email) => {
                Err(CheckoutError::InvalidEmail(email.clone()))
            }
            _ => Ok(()),
        }
    }
}

/// `local@domain.tld` with no whitespace.
fn is_plausible_email(email: &str) -> bool {
    if email.is_empty() || email.chars().any(char::is_whitespace) {
        return false;
    }

    email.match_indices('@').any(|(at, _)| {
        at > 0
            && email.get(at + 1..).is_some_and(|domain| {
                domain
                    .match_indices('.')
                    .any(|(dot, _)| dot > 0 && dot + 1 < domain.len())
            })
    })
}

#[derive(Clone)]
pub struct Checkout {
    orders: Arc<dyn OrderSource>,
}

impl std::fmt::Debug for Checkout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Checkout").finish_non_exhaustive()
    }
}

impl Checkout {
    pub fn new(orders: Arc<dyn OrderSource>) -> Self {
        Self { orders }
    }

    /// Place an order for the cart's contents, dated today, then empty the cart.
    ///
    /// # Errors
    ///
    /// Returns a [`CheckoutError`] if the cart is empty, the customer details are invalid, or
    /// the order cannot be stored. The cart is left untouched on error.
    pub async fn place_order(
        &self,
        cart: &mut CartEngine,
        customer: &Customer,
    ) -> Result<Order, CheckoutError> {
        self.place_order_on(cart, customer, Zoned::now().date())
            .await
    }

    /// [`place_order`](Self::place_order) with an explicit order date.
    ///
    /// # Errors
    ///
    /// See [`place_order`](Self::place_order).
    #[tracing::instrument(name = "checkout.place_order", skip(self, cart, customer), err)]
    pub async fn place_order_on(
        &self,
        cart: &mut CartEngine,
        customer: &Customer,
        date: Date,
    ) -> Result<Order, CheckoutError> {
        if cart.cart().is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        customer.validate()?;

        let order = self
            .orders
            .create_order(NewOrder {
                customer_name: customer.name.trim().to_string(),
                items: cart.cart().lines().to_vec(),
                total: cart.total(),
                status: OrderStatus::Pending,
                date,
            })
            .await?;

        cart.clear();

        info!(order = %order.id, total = %order.total, "order placed");

        Ok(order)
    }
}
