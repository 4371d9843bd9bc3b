//! Admin dashboard.

use std::sync::Arc;

use vitrine::{
    filters::FilterCriteria,
    orders::{Order, OrderId, OrderStatus},
    products::Product,
    sorting::{SortConfig, sort_records},
};

use crate::domain::{
    orders::{OrderSource, OrdersServiceError},
    products::{ProductSource, ProductsServiceError},
};

/// Product and order tables with click-to-sort columns.
pub struct AdminDashboard {
    products: Arc<dyn ProductSource>,
    orders: Arc<dyn OrderSource>,
    product_rows: Vec<Product>,
    order_rows: Vec<Order>,
    product_sort: Option<SortConfig>,
    order_sort: Option<SortConfig>,
}

impl std::fmt::Debug for AdminDashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminDashboard")
            .field("products", &self.product_rows.len())
            .field("orders", &self.order_rows.len())
            .field("product_sort", &self.product_sort)
            .field("order_sort", &self.order_sort)
            .finish_non_exhaustive()
    }
}

impl AdminDashboard {
    pub fn new(products: Arc<dyn ProductSource>, orders: Arc<dyn OrderSource>) -> Self {
        Self {
            products,
            orders,
            product_rows: Vec::new(),
            order_rows: Vec::new(),
            product_sort: None,
            order_sort: None,
        }
    }

    /// Reload both tables. Sort selections are kept.
    ///
    /// # Errors
    ///
    /// Returns an error if either source fails.
    #[tracing::instrument(name = "admin.dashboard.load", skip(self), err)]
    pub async fn load(&mut self) -> Result<(), AdminError> {
        self.product_rows = self.products.get_all(&FilterCriteria::default()).await?;
        self.order_rows = self.orders.get_all().await?;

        Ok(())
    }

    /// Column click on the products table.
    pub fn sort_products(&mut self, key: &str) -> &SortConfig {
        self.product_sort
            .insert(SortConfig::toggled(self.product_sort.as_ref(), key))
    }

    /// Column click on the orders table.
    pub fn sort_orders(&mut self, key: &str) -> &SortConfig {
        self.order_sort
            .insert(SortConfig::toggled(self.order_sort.as_ref(), key))
    }

    pub fn set_product_sort(&mut self, sort: Option<SortConfig>) {
        self.product_sort = sort;
    }

    pub fn set_order_sort(&mut self, sort: Option<SortConfig>) {
        self.order_sort = sort;
    }

    #[must_use]
    pub fn products(&self) -> Vec<Product> {
        sort_records(&self.product_rows, self.product_sort.as_ref())
    }

    #[must_use]
    pub fn orders(&self) -> Vec<Order> {
        sort_records(&self.order_rows, self.order_sort.as_ref())
    }

    /// Change an order's status through the order source and patch the local row.
    ///
    /// # Errors
    ///
    /// Returns [`OrdersServiceError::NotFound`] for an unknown order, or the source's error.
    #[tracing::instrument(name = "admin.dashboard.update_order_status", skip(self), fields(order = %id), err)]
    pub async fn update_order_status(
        &mut self,
        id: &OrderId,
        status: OrderStatus,
    ) -> Result<Order, OrdersServiceError> {
        let updated = self.orders.update_status(id, status).await?;

        if let Some(row) = self.order_rows.iter_mut().find(|row| row.id == *id) {
            *row = updated.clone();
        }

        Ok(updated)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AdminError {
    #[error(transparent)]
    Products(#[from] ProductsServiceError),

    #[error(transparent)]
    Orders(#[from] OrdersServiceError),
}

#[cfg(test)]
mod tests {
    use jiff::civil::Date;
    use testresult::TestResult;
    use vitrine::{
        prices::Price,
        products::{Category, Metal, ProductId},
        sorting::SortDirection,
    };

    use crate::domain::{orders::MockOrderSource, products::MockProductSource};

    use super::*;

    fn product(id: &str, price: u64) -> Product {
        Product {
            id: ProductId::new(id),
            name: id.to_string(),
            description: String::new(),
            price: Price::new(price),
            images: Vec::new(),
            metal: Metal::Gold,
            category: Category::Rings,
            sizes: None,
            stock: 1,
        }
    }

    fn order(id: &str, customer: &str, status: OrderStatus, day: i8) -> Order {
        Order {
            id: OrderId::new(id),
            customer_name: customer.to_string(),
            items: Vec::new(),
            total: Price::new(100),
            status,
            date: Date::constant(2024, 3, day),
        }
    }

    async fn dashboard(orders: MockOrderSource) -> TestResult<AdminDashboard> {
        let mut products = MockProductSource::new();

        products
            .expect_get_all()
            .returning(|_| Ok(vec![product("b", 300), product("a", 100), product("c", 200)]));

        let mut dashboard = AdminDashboard::new(Arc::new(products), Arc::new(orders));
        dashboard.load().await?;

        Ok(dashboard)
    }

    fn listed_orders() -> MockOrderSource {
        let mut orders = MockOrderSource::new();

        orders.expect_get_all().returning(|| {
            Ok(vec![
                order("o1", "Zoe", OrderStatus::Pending, 3),
                order("o2", "Amir", OrderStatus::Delivered, 1),
                order("o3", "Mei", OrderStatus::Shipped, 2),
            ])
        });

        orders
    }

    #[tokio::test]
    async fn unsorted_tables_keep_source_order() -> TestResult {
        let dashboard = dashboard(listed_orders()).await?;

        let ids: Vec<String> = dashboard
            .products()
            .iter()
            .map(|p| p.id.to_string())
            .collect();

        assert_eq!(ids, ["b", "a", "c"]);

        Ok(())
    }

    #[tokio::test]
    async fn clicking_a_column_twice_flips_direction() -> TestResult {
        let mut dashboard = dashboard(listed_orders()).await?;

        assert_eq!(dashboard.sort_products("price").direction, SortDirection::Ascending);

        let prices: Vec<u64> = dashboard.products().iter().map(|p| p.price.minor_units()).collect();
        assert_eq!(prices, [100, 200, 300]);

        assert_eq!(dashboard.sort_products("price").direction, SortDirection::Descending);

        let prices: Vec<u64> = dashboard.products().iter().map(|p| p.price.minor_units()).collect();
        assert_eq!(prices, [300, 200, 100]);

        assert_eq!(dashboard.sort_products("name").direction, SortDirection::Ascending);

        Ok(())
    }

    #[tokio::test]
    async fn orders_sort_by_date_and_customer() -> TestResult {
        let mut dashboard = dashboard(listed_orders()).await?;

        dashboard.sort_orders("date");
        let ids: Vec<String> = dashboard.orders().iter().map(|o| o.id.to_string()).collect();
        assert_eq!(ids, ["o2", "o3", "o1"]);

        dashboard.sort_orders("customerName");
        let names: Vec<String> = dashboard.orders().into_iter().map(|o| o.customer_name).collect();
        assert_eq!(names, ["Amir", "Mei", "Zoe"]);

        Ok(())
    }

    #[tokio::test]
    async fn status_update_patches_local_row() -> TestResult {
        let mut orders = listed_orders();

        orders
            .expect_update_status()
            .withf(|id, status| id.as_str() == "o1" && *status == OrderStatus::Shipped)
            .times(1)
            .returning(|_, status| Ok(order("o1", "Zoe", status, 3)));

        let mut dashboard = dashboard(orders).await?;

        dashboard
            .update_order_status(&OrderId::new("o1"), OrderStatus::Shipped)
            .await?;

        let status = dashboard
            .orders()
            .into_iter()
            .find(|o| o.id.as_str() == "o1")
            .map(|o| o.status);

        assert_eq!(status, Some(OrderStatus::Shipped));

        Ok(())
    }

    #[tokio::test]
    async fn unknown_order_update_surfaces_not_found() -> TestResult {
        let mut orders = listed_orders();

        orders
            .expect_update_status()
            .returning(|_, _| Err(OrdersServiceError::NotFound));

        let mut dashboard = dashboard(orders).await?;

        let result = dashboard
            .update_order_status(&OrderId::new("nope"), OrderStatus::Delivered)
            .await;

        assert!(matches!(result, Err(OrdersServiceError::NotFound)));
        assert_eq!(dashboard.orders().len(), 3);

        Ok(())
    }
}
