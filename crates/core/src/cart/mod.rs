//! Cart
//!
//! The cart is an ordered sequence of lines, at most one per product and size. Counts and totals
//! are derived from the lines on every read and never stored.

use std::fmt;

use rusty_money::{Money, iso::Currency};
use serde::{Deserialize, Serialize};

use crate::{
    prices::Price,
    products::{Product, ProductId},
};

mod actions;
mod reducer;

pub use actions::CartAction;
pub use reducer::reduce;

/// Cart line identifier: the product id, suffixed with `-{size}` when a size is chosen.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineId(String);

impl LineId {
    /// Variant key for a product and optional size. An empty size counts as no size.
    pub fn for_product(product: &ProductId, size: Option<&str>) -> Self {
        match size {
            Some(size) if !size.is_empty() => Self(format!("{product}-{size}")),
            _ => Self(product.as_str().to_string()),
        }
    }

    /// Wrap an existing line identifier, e.g. one received from a UI event.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LineId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// A single cart entry for one product variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Variant key
    pub id: LineId,

    /// Product name at the time it was added
    pub name: String,

    /// Unit price at the time it was added
    pub price: Price,

    /// Primary product image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Units of this variant, never zero while the line is in a cart
    pub quantity: u32,

    /// Selected size label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
}

impl CartLine {
    /// Snapshot a product into a new line.
    pub fn from_product(product: &Product, quantity: u32, size: Option<&str>) -> Self {
        let size = size.filter(|size| !size.is_empty());

        Self {
            id: LineId::for_product(&product.id, size),
            name: product.name.clone(),
            price: product.price,
            image: product.primary_image().map(str::to_string),
            quantity,
            size: size.map(str::to_string),
        }
    }

    /// Unit price times quantity.
    pub fn line_total(&self) -> Price {
        self.price.times(self.quantity)
    }
}

/// Cart state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<CartLine>", into = "Vec<CartLine>")]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cart from lines of unknown provenance (e.g. restored from storage).
    ///
    /// Zero-quantity lines are dropped and repeated ids are merged into the first occurrence,
    /// so the result always satisfies the cart invariants.
    pub fn from_lines(lines: impl IntoIterator<Item = CartLine>) -> Self {
        let mut merged: Vec<CartLine> = Vec::new();

        for line in lines.into_iter().filter(|line| line.quantity > 0) {
            match merged.iter_mut().find(|existing| existing.id == line.id) {
                Some(existing) => {
                    existing.quantity = existing.quantity.saturating_add(line.quantity);
                }
                None => merged.push(line),
            }
        }

        Self { lines: merged }
    }

    /// Apply an action, returning the next state. `self` is left untouched.
    #[must_use]
    pub fn apply(&self, action: &CartAction) -> Self {
        reduce(self, action)
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Look up a line by its variant key.
    pub fn line(&self, id: &LineId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.id == *id)
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of all line quantities.
    pub fn count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Sum of unit price times quantity over all lines. Subtotal only: no tax or shipping.
    pub fn total(&self) -> Price {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// The total as money in the given currency.
    pub fn subtotal_money(&self, currency: &'static Currency) -> Money<'static, Currency> {
        self.total().to_money(currency)
    }
}

impl From<Vec<CartLine>> for Cart {
    fn from(lines: Vec<CartLine>) -> Self {
        Self::from_lines(lines)
    }
}

impl From<Cart> for Vec<CartLine> {
    fn from(cart: Cart) -> Self {
        cart.lines
    }
}
