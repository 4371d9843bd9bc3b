//! Prices

use std::{fmt, iter::Sum, ops::Deref};

use rusty_money::{
    Money,
    iso::{Currency, EUR, GBP, USD},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Currency code lookup error.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown currency code: {0}")]
pub struct UnknownCurrencyError(pub String);

/// Represents a price in pence/cents.
///
/// The engine never looks at the currency; it only sums and multiplies minor units.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Price {
    value: u64,
}

impl Price {
    /// A price of nothing.
    pub const ZERO: Price = Price { value: 0 };

    /// Creates a new Price
    pub const fn new(value: u64) -> Self {
        Price { value }
    }

    /// Returns the amount in minor units.
    pub const fn minor_units(self) -> u64 {
        self.value
    }

    /// Price of `quantity` units at this unit price, saturating at `u64::MAX`.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Price {
            value: self.value.saturating_mul(u64::from(quantity)),
        }
    }

    /// Adds two prices, saturating at `u64::MAX`.
    #[must_use]
    pub const fn saturating_add(self, other: Price) -> Self {
        Price {
            value: self.value.saturating_add(other.value),
        }
    }

    /// Converts the price into money of the given currency for display.
    pub fn to_money(self, currency: &Currency) -> Money<'_, Currency> {
        Money::from_minor(i64::try_from(self.value).unwrap_or(i64::MAX), currency)
    }
}

impl Deref for Price {
    type Target = u64;

    fn deref(&self) -> &Self::Target {
        &self.value
    }
}

impl From<u64> for Price {
    fn from(value: u64) -> Self {
        Price::new(value)
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Price::ZERO, Price::saturating_add)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.value / 100, self.value % 100)
    }
}

/// Look up one of the supported storefront currencies by ISO code.
///
/// # Errors
///
/// Returns [`UnknownCurrencyError`] for codes other than GBP, USD and EUR.
pub fn currency_from_code(code: &str) -> Result<&'static Currency, UnknownCurrencyError> {
    match code.trim().to_ascii_uppercase().as_str() {
        "GBP" => Ok(GBP),
        "USD" => Ok(USD),
        "EUR" => Ok(EUR),
        _ => Err(UnknownCurrencyError(code.to_string())),
    }
}
