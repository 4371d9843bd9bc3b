//! Receipt
//!
//! Tabular rendering of a cart for terminals and order confirmations.

use std::io;

use rusty_money::{Money, iso::Currency};
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::cart::{Cart, CartLine};

/// Errors that can occur when writing a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// The output could not be written.
    #[error("failed to write receipt: {0}")]
    Io(#[from] io::Error),
}

/// A priced snapshot of a cart.
#[derive(Debug, Clone)]
pub struct Receipt<'a> {
    lines: &'a [CartLine],
    count: u64,
    subtotal: Money<'static, Currency>,
    currency: &'static Currency,
}

impl<'a> Receipt<'a> {
    /// Snapshot `cart`, pricing it in `currency`.
    #[must_use]
    pub fn for_cart(cart: &'a Cart, currency: &'static Currency) -> Self {
        Self {
            lines: cart.lines(),
            count: cart.count(),
            subtotal: cart.subtotal_money(currency),
            currency,
        }
    }

    /// Total number of units.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Sum of all line totals.
    #[must_use]
    pub fn subtotal(&self) -> Money<'static, Currency> {
        self.subtotal
    }

    /// Currency used for all monetary values.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Writes the receipt table and summary.
    ///
    /// # Errors
    ///
    /// Returns an error if the output cannot be written.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), ReceiptError> {
        if self.lines.is_empty() {
            writeln!(out, "Your cart is empty.")?;

            return Ok(());
        }

        let mut builder = Builder::default();

        builder.push_record(["Line", "Item", "Size", "Qty", "Unit Price", "Line Total"]);

        for line in self.lines {
            builder.push_record([
                line.id.to_string(),
                line.name.clone(),
                line.size.clone().unwrap_or_default(),
                line.quantity.to_string(),
                format!("{}", line.price.to_money(self.currency)),
                format!("{}", line.line_total().to_money(self.currency)),
            ]);
        }

        let mut table = builder.build();

        table.with(Style::modern_rounded());
        table.modify(Rows::first(), Color::BOLD);
        table.modify(Columns::new(3..6), Alignment::right());

        writeln!(out, "\n{table}")?;
        writeln!(out, " Items:    {}", self.count)?;
        writeln!(out, " Subtotal: {}", self.subtotal)?;
        writeln!(out)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso;
    use testresult::TestResult;

    use crate::{
        cart::CartAction,
        prices::Price,
        products::{Category, Metal, Product, ProductId},
    };

    use super::*;

    fn cart() -> Cart {
        let ring = Product {
            id: ProductId::new("p1"),
            name: "Diamond Ring".to_string(),
            description: String::new(),
            price: Price::new(125_000),
            images: Vec::new(),
            metal: Metal::Gold,
            category: Category::Rings,
            sizes: Some(vec!["7".to_string()]),
            stock: 3,
        };

        Cart::new().apply(&CartAction::add_item(&ring, 2, Some("7")))
    }

    #[test]
    fn receipt_totals_match_cart() {
        let cart = cart();
        let receipt = Receipt::for_cart(&cart, iso::USD);

        assert_eq!(receipt.count(), 2);
        assert_eq!(receipt.subtotal(), Money::from_minor(250_000, iso::USD));
        assert_eq!(receipt.currency(), iso::USD);
    }

    #[test]
    fn write_to_lists_every_line() -> TestResult {
        let cart = cart();
        let mut out = Vec::new();

        Receipt::for_cart(&cart, iso::USD).write_to(&mut out)?;

        let text = String::from_utf8(out)?;

        assert!(text.contains("Diamond Ring"));
        assert!(text.contains("p1-7"));
        assert!(text.contains("Items:    2"));
        assert!(text.contains("2,500.00"));

        Ok(())
    }

    #[test]
    fn empty_cart_prints_placeholder() -> TestResult {
        let cart = Cart::new();
        let mut out = Vec::new();

        Receipt::for_cart(&cart, iso::GBP).write_to(&mut out)?;

        assert_eq!(String::from_utf8(out)?, "Your cart is empty.\n");

        Ok(())
    }
}
