//! Order Fixtures

use jiff::civil::Date;
use serde::Deserialize;

use crate::{
    cart::{Cart, CartAction},
    fixtures::FixtureError,
    orders::{Order, OrderId, OrderStatus},
    products::Product,
};

/// Wrapper for orders in YAML
#[derive(Debug, Deserialize)]
pub struct OrdersFixture {
    /// Orders in file order
    pub orders: Vec<OrderFixture>,
}

/// Order Fixture
#[derive(Debug, Deserialize)]
pub struct OrderFixture {
    /// Order id
    pub id: String,

    /// Customer display name
    pub customer: String,

    /// Fulfilment status
    #[serde(default)]
    pub status: OrderStatus,

    /// Date placed, `YYYY-MM-DD`
    pub date: Date,

    /// Ordered lines
    pub items: Vec<OrderItemFixture>,
}

/// A line in an order fixture, referencing a product by id.
#[derive(Debug, Deserialize)]
pub struct OrderItemFixture {
    /// Product id
    pub product: String,

    /// Chosen size
    #[serde(default)]
    pub size: Option<String>,

    /// Units ordered
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

const fn default_quantity() -> u32 {
    1
}

impl OrderFixture {
    /// Build the order by adding each item to an empty cart, so lines and total follow the same
    /// rules as a checkout.
    ///
    /// # Errors
    ///
    /// Returns an error if an item references an unknown product, has a zero quantity, or the
    /// order has no items.
    pub fn into_order<'a, F>(self, lookup: F) -> Result<Order, FixtureError>
    where
        F: Fn(&str) -> Result<&'a Product, FixtureError>,
    {
        if self.items.is_empty() {
            return Err(FixtureError::InvalidOrderData(format!(
                "order {} has no items",
                self.id
            )));
        }

        let mut cart = Cart::new();

        for item in &self.items {
            if item.quantity == 0 {
                return Err(FixtureError::InvalidOrderData(format!(
                    "order {} has a zero quantity line for {}",
                    self.id, item.product
                )));
            }

            let product = lookup(&item.product)?;

            cart = cart.apply(&CartAction::add_item(
                product,
                item.quantity,
                item.size.as_deref(),
            ));
        }

        let total = cart.total();

        Ok(Order {
            id: OrderId::new(self.id),
            customer_name: self.customer,
            items: cart.into(),
            total,
            status: self.status,
            date: self.date,
        })
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        prices::Price,
        products::{Category, Metal, ProductId},
    };

    use super::*;

    fn ring() -> Product {
        Product {
            id: ProductId::new("p1"),
            name: "Ring".to_string(),
            description: String::new(),
            price: Price::new(1000),
            images: Vec::new(),
            metal: Metal::Gold,
            category: Category::Rings,
            sizes: Some(vec!["6".to_string(), "7".to_string()]),
            stock: 5,
        }
    }

    fn lookup<'a>(product: &'a Product) -> impl Fn(&str) -> Result<&'a Product, FixtureError> {
        move |id| {
            if product.id.as_str() == id {
                Ok(product)
            } else {
                Err(FixtureError::ProductNotFound(id.to_string()))
            }
        }
    }

    #[test]
    fn repeated_items_merge_into_one_line() -> TestResult {
        let product = ring();
        let fixture: OrderFixture = serde_norway::from_str(
            r#"
id: o-1
customer: Ada
status: shipped
date: "2024-03-02"
items:
  - product: p1
    size: "7"
  - product: p1
    size: "7"
    quantity: 2
  - product: p1
"#,
        )?;

        let order = fixture.into_order(lookup(&product))?;

        assert_eq!(order.items.len(), 2);
        assert_eq!(order.items.first().map(|l| l.quantity), Some(3));
        assert_eq!(order.total, Price::new(4000));
        assert_eq!(order.status, OrderStatus::Shipped);
        assert_eq!(order.date, Date::constant(2024, 3, 2));

        Ok(())
    }

    #[test]
    fn unknown_product_is_rejected() -> TestResult {
        let product = ring();
        let fixture: OrderFixture = serde_norway::from_str(
            r#"
id: o-2
customer: Ada
date: "2024-03-02"
items:
  - product: missing
"#,
        )?;

        let result = fixture.into_order(lookup(&product));

        assert!(matches!(result, Err(FixtureError::ProductNotFound(id)) if id == "missing"));

        Ok(())
    }

    #[test]
    fn empty_order_is_rejected() -> TestResult {
        let product = ring();
        let fixture: OrderFixture = serde_norway::from_str(
            r#"
id: o-3
customer: Ada
date: "2024-03-02"
items: []
"#,
        )?;

        let result = fixture.into_order(lookup(&product));

        assert!(matches!(result, Err(FixtureError::InvalidOrderData(_))));

        Ok(())
    }
}
