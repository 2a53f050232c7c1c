//! Order repository.

use std::sync::Arc;

use bookstore_core::{Order, OrderId};
use tokio::sync::RwLock;

/// Repository for placed orders. Read-only over the API.
#[derive(Clone, Default)]
pub struct OrderRepository {
    orders: Arc<RwLock<Vec<Order>>>,
}

impl OrderRepository {
    #[must_use]
    pub fn new(orders: Vec<Order>) -> Self {
        Self {
            orders: Arc::new(RwLock::new(orders)),
        }
    }

    /// Get an order by id.
    pub async fn get(&self, id: OrderId) -> Option<Order> {
        self.orders.read().await.iter().find(|o| o.id == id).cloned()
    }
}
