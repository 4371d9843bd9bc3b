//! Orders service.

use async_trait::async_trait;
use mockall::automock;
use vitrine::orders::{NewOrder, Order, OrderId, OrderStatus};

use crate::domain::orders::errors::OrdersServiceError;

#[automock]
#[async_trait]
pub trait OrderSource: Send + Sync {
    /// Retrieves all orders, oldest first.
    async fn get_all(&self) -> Result<Vec<Order>, OrdersServiceError>;

    /// Retrieve a single order, `None` when there is no such order.
    async fn get_by_id(&self, id: &OrderId) -> Result<Option<Order>, OrdersServiceError>;

    /// Moves an order to `status`.
    async fn update_status(
        &self,
        id: &OrderId,
        status: OrderStatus,
    ) -> Result<Order, OrdersServiceError>;

    /// Stores a new order, assigning it an id.
    async fn create_order(&self, order: NewOrder) -> Result<Order, OrdersServiceError>;
}
