//! In-memory order repository.

use std::sync::{Arc, PoisonError, RwLock};

use async_trait::async_trait;
use tracing::{debug, info};
use uuid::Uuid;
use vitrine::orders::{NewOrder, Order, OrderId, OrderStatus};

use crate::{
    domain::orders::{errors::OrdersServiceError, service::OrderSource},
    storage::{self, KeyValueStore},
};

/// Storage key for orders kept by a persistent in-memory source.
pub const ORDERS_STORAGE_KEY: &str = "vitrine_orders";

/// Orders held in memory. Each instance owns its own data.
///
/// A persistent source writes every change through to its store before applying it, so a failed
/// write leaves both the store and the in-memory orders unchanged.
#[derive(Default)]
pub struct InMemoryOrderSource {
    orders: RwLock<Vec<Order>>,
    store: Option<Arc<dyn KeyValueStore>>,
}

impl std::fmt::Debug for InMemoryOrderSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryOrderSource")
            .field("orders", &self.orders)
            .field("persistent", &self.store.is_some())
            .finish()
    }
}

impl InMemoryOrderSource {
    #[must_use]
    pub fn new(orders: Vec<Order>) -> Self {
        Self {
            orders: RwLock::new(orders),
            store: None,
        }
    }

    /// Orders saved in `store`, or `seed` when nothing has been saved yet.
    pub fn persistent(store: Arc<dyn KeyValueStore>, seed: Vec<Order>) -> Self {
        let saved: Vec<Order> = storage::load_or_default(store.as_ref(), ORDERS_STORAGE_KEY);
        let orders = if saved.is_empty() { seed } else { saved };

        debug!(orders = orders.len(), "restored orders");

        Self {
            orders: RwLock::new(orders),
            store: Some(store),
        }
    }

    fn commit(&self, orders: &mut Vec<Order>, next: Vec<Order>) -> Result<(), OrdersServiceError> {
        if let Some(store) = &self.store {
            storage::save(store.as_ref(), ORDERS_STORAGE_KEY, &next)?;
        }

        *orders = next;

        Ok(())
    }
}

#[async_trait]
impl OrderSource for InMemoryOrderSource {
    async fn get_all(&self) -> Result<Vec<Order>, OrdersServiceError> {
        Ok(self
            .orders
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    async fn get_by_id(&self, id: &OrderId) -> Result<Option<Order>, OrdersServiceError> {
        Ok(self
            .orders
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|order| order.id == *id)
            .cloned())
    }

    #[tracing::instrument(name = "orders.memory.update_status", skip(self), fields(order = %id), err)]
    async fn update_status(
        &self,
        id: &OrderId,
        status: OrderStatus,
    ) -> Result<Order, OrdersServiceError> {
        let mut orders = self.orders.write().unwrap_or_else(PoisonError::into_inner);
        let mut next = orders.clone();

        let order = next
            .iter_mut()
            .find(|order| order.id == *id)
            .ok_or(OrdersServiceError::NotFound)?;

        order.status = status;
        let updated = order.clone();

        self.commit(&mut orders, next)?;

        Ok(updated)
    }

    #[tracing::instrument(name = "orders.memory.create_order", skip(self, order), err)]
    async fn create_order(&self, order: NewOrder) -> Result<Order, OrdersServiceError> {
        if order.items.is_empty() {
            return Err(OrdersServiceError::InvalidData(
                "an order needs at least one item".to_string(),
            ));
        }

        let created = order.with_id(OrderId::new(Uuid::now_v7().to_string()));

        let mut orders = self.orders.write().unwrap_or_else(PoisonError::into_inner);
        let mut next = orders.clone();
        next.push(created.clone());

        self.commit(&mut orders, next)?;

        info!(order = %created.id, total = %created.total, "order created");

        Ok(created)
    }
}
