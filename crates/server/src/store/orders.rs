//! In-memory order store.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use officebar_core::{OrderId, OrderStatus, Price, UserId};
use tokio::sync::RwLock;

use crate::models::{LineItem, Order};

/// Process-lifetime storage for orders.
///
/// IDs come from a monotonic counter starting at 1, so they are unique even
/// when orders are created concurrently.
pub struct OrderStore {
    orders: RwLock<Vec<Order>>,
    next_id: AtomicU64,
}

impl Default for OrderStore {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            orders: RwLock::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Store a new order under the next counter ID.
    ///
    /// Creation always succeeds; there is nothing to validate at this layer.
    pub async fn create(
        &self,
        user_id: UserId,
        user_name: String,
        items: Vec<LineItem>,
        total_price: Price,
    ) -> Order {
        let id = OrderId::new(self.next_id.fetch_add(1, Ordering::Relaxed));
        let order = Order::new(id, user_id, user_name, items, total_price);
        self.orders.write().await.push(order.clone());
        order
    }

    pub async fn find_by_id(&self, id: OrderId) -> Option<Order> {
        self.orders
            .read()
            .await
            .iter()
            .find(|order| order.id == id)
            .cloned()
    }

    /// All orders placed by one user, oldest first.
    pub async fn find_by_user(&self, user_id: UserId) -> Vec<Order> {
        self.orders
            .read()
            .await
            .iter()
            .filter(|order| order.user_id == user_id)
            .cloned()
            .collect()
    }

    /// All orders, newest first.
    ///
    /// Sorts by creation time rather than insertion position, so the result
    /// stays correct even if insertion order ever diverges from time order.
    pub async fn list_all(&self) -> Vec<Order> {
        let mut orders = self.orders.read().await.clone();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        orders
    }

    /// Move an order to a new status, refreshing its `updated_at` stamp.
    ///
    /// Returns the updated order, or `None` when no order with that ID
    /// exists.
    pub async fn update_status(&self, id: OrderId, status: OrderStatus) -> Option<Order> {
        let mut orders = self.orders.write().await;
        let order = orders.iter_mut().find(|order| order.id == id)?;
        order.status = status;
        order.updated_at = Utc::now();
        Some(order.clone())
    }

    /// Number of stored orders.
    pub async fn count(&self) -> usize {
        self.orders.read().await.len()
    }
}
