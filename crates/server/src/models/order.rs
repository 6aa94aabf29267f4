//! Orders and their line items.

use chrono::{DateTime, Utc};
use officebar_core::{OrderId, OrderStatus, Price, UserId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One drink line within an order, as submitted by the client cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub drink_id: String,
    pub drink_name: String,
    pub quantity: u32,
    pub price: Price,
}

impl LineItem {
    /// Total for this line (unit price times quantity).
    #[must_use]
    pub fn line_total(&self) -> Price {
        Price::new(self.price.amount() * Decimal::from(self.quantity))
    }
}

/// A placed order.
///
/// New orders start in [`OrderStatus::Pending`]; `updated_at` only moves
/// when the status changes.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub user_name: String,
    pub items: Vec<LineItem>,
    pub total_price: Price,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Create a pending order stamped with the current time.
    #[must_use]
    pub fn new(
        id: OrderId,
        user_id: UserId,
        user_name: String,
        items: Vec<LineItem>,
        total_price: Price,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            user_id,
            user_name,
            items,
            total_price,
            status: OrderStatus::default(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Sum of all line totals.
    #[must_use]
    pub fn total_of(items: &[LineItem]) -> Price {
        Price::new(items.iter().map(|item| item.line_total().amount()).sum())
    }

    /// One-line description, e.g. `Kim Lee ordered: 2x Latte, 1x Espresso`.
    #[must_use]
    pub fn summary(&self) -> String {
        let items_list = self
            .items
            .iter()
            .map(|item| format!("{}x {}", item.quantity, item.drink_name))
            .collect::<Vec<_>>()
            .join(", ");
        format!("{} ordered: {items_list}", self.user_name)
    }
}
