//! Fixtures
//!
//! YAML catalog fixture sets used to seed in-memory product and order repositories.

use std::{fs, path::PathBuf};

use rusty_money::iso::Currency;
use thiserror::Error;

use crate::{
    orders::Order,
    products::{Product, ProductId},
};

pub mod orders;
pub mod products;

/// Name of the fixture set compiled into the crate.
pub const BUNDLED_SET: &str = "jewelry";

const BUNDLED_PRODUCTS: &str = include_str!("../../fixtures/products/jewelry.yml");
const BUNDLED_ORDERS: &str = include_str!("../../fixtures/orders/jewelry.yml");

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Currency mismatch between products
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),

    /// No products loaded yet
    #[error("No products loaded yet; currency unknown")]
    NoCurrency,

    /// Product not found
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Two products share an id
    #[error("Duplicate product id: {0}")]
    DuplicateProduct(String),

    /// Invalid order data
    #[error("Invalid order data: {0}")]
    InvalidOrderData(String),
}

/// Fixture
#[derive(Debug)]
pub struct Fixture {
    /// Base path for fixture files
    base_path: PathBuf,

    /// Products in file order
    products: Vec<Product>,

    /// Orders in file order
    orders: Vec<Order>,

    /// Currency for the fixture set
    currency: Option<&'static Currency>,
}

impl Fixture {
    /// Create a new empty fixture with default base path
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new empty fixture with custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            products: Vec::new(),
            orders: Vec::new(),
            currency: None,
        }
    }

    /// The fixture set compiled into the crate, needing no files at runtime.
    ///
    /// # Errors
    ///
    /// Returns an error if the embedded YAML is invalid.
    pub fn bundled() -> Result<Self, FixtureError> {
        let mut fixture = Self::new();

        fixture
            .load_products_str(BUNDLED_PRODUCTS)?
            .load_orders_str(BUNDLED_ORDERS)?;

        Ok(fixture)
    }

    /// Load products from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or if there are currency mismatches.
    pub fn load_products(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("products").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;

        self.load_products_str(&contents)
    }

    /// Load products from YAML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML cannot be parsed, a price is invalid, an id repeats, or
    /// currencies differ.
    pub fn load_products_str(&mut self, contents: &str) -> Result<&mut Self, FixtureError> {
        let fixture: products::ProductsFixture = serde_norway::from_str(contents)?;

        for product_fixture in fixture.products {
            // Parse to get currency first (before creating Product)
            let (_minor_units, currency) = products::parse_price(&product_fixture.price)?;

            // Validate currency consistency
            if let Some(existing_currency) = self.currency {
                if existing_currency != currency {
                    return Err(FixtureError::CurrencyMismatch(
                        existing_currency.iso_alpha_code.to_string(),
                        currency.iso_alpha_code.to_string(),
                    ));
                }
            } else {
                self.currency = Some(currency);
            }

            if self.products.iter().any(|p| p.id.as_str() == product_fixture.id) {
                return Err(FixtureError::DuplicateProduct(product_fixture.id));
            }

            let product: Product = product_fixture.try_into()?;

            self.products.push(product);
        }

        Ok(self)
    }

    /// Load orders from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or if referenced products don't exist.
    pub fn load_orders(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("orders").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;

        self.load_orders_str(&contents)
    }

    /// Load orders from YAML text. Products must be loaded first.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML cannot be parsed or an order line is invalid.
    pub fn load_orders_str(&mut self, contents: &str) -> Result<&mut Self, FixtureError> {
        let fixture: orders::OrdersFixture = serde_norway::from_str(contents)?;

        for order_fixture in fixture.orders {
            let order = order_fixture.into_order(|id| self.product(id))?;

            self.orders.push(order);
        }

        Ok(self)
    }

    /// Load products and orders for a named fixture set
    ///
    /// # Errors
    ///
    /// Returns an error if either file fails to load.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        let mut fixture = Self::new();

        fixture.load_products(name)?.load_orders(name)?;

        Ok(fixture)
    }

    /// Get a product by its id
    ///
    /// # Errors
    ///
    /// Returns an error if the product is not found.
    pub fn product(&self, id: &str) -> Result<&Product, FixtureError> {
        self.products
            .iter()
            .find(|p| p.id == ProductId::from(id))
            .ok_or_else(|| FixtureError::ProductNotFound(id.to_string()))
    }

    /// Get all products
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Get all orders
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// Get the currency of the fixture set
    ///
    /// # Errors
    ///
    /// Returns an error if no products have been loaded.
    pub fn currency(&self) -> Result<&'static Currency, FixtureError> {
        self.currency.ok_or(FixtureError::NoCurrency)
    }

    /// Consume the fixture, returning its products and orders.
    pub fn into_catalog(self) -> (Vec<Product>, Vec<Order>) {
        (self.products, self.orders)
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}
