//! Registered employee accounts.

use chrono::{DateTime, Utc};
use officebar_core::{Email, OrderId, Price, UserId};
use serde::Serialize;

use crate::models::order::LineItem;

/// A registered employee.
///
/// Implements `Debug` manually to redact the password hash.
#[derive(Clone)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Login email, unique across all accounts.
    pub email: Email,
    /// Argon2 password hash in PHC string format.
    pub password_hash: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// Orders placed by this user, oldest first.
    pub order_history: Vec<OrderHistoryEntry>,
    /// Drink IDs the user marked as favorites.
    pub favorites: Vec<String>,
}

impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("password_hash", &"[REDACTED]")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("created_at", &self.created_at)
            .field("order_history", &self.order_history)
            .field("favorites", &self.favorites)
            .finish()
    }
}

impl User {
    /// Create a fresh account with an empty order history.
    #[must_use]
    pub fn new(email: Email, password_hash: String, first_name: String, last_name: String) -> Self {
        Self {
            id: UserId::new(),
            email,
            password_hash,
            first_name,
            last_name,
            created_at: Utc::now(),
            order_history: Vec::new(),
            favorites: Vec::new(),
        }
    }

    /// Display name used in tokens, order records and notifications.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Append an order to this user's history.
    pub fn record_order(&mut self, entry: OrderHistoryEntry) {
        self.order_history.push(entry);
    }
}

/// A compact record of one placed order, embedded in the user profile.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderHistoryEntry {
    pub order_id: OrderId,
    pub timestamp: DateTime<Utc>,
    pub items: Vec<LineItem>,
    pub total_price: Price,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User::new(
            Email::parse("kim@office.test").unwrap(),
            "$argon2id$fake-hash".to_string(),
            "Kim".to_string(),
            "Lee".to_string(),
        )
    }

    #[test]
    fn test_full_name() {
        assert_eq!(sample_user().full_name(), "Kim Lee");
    }

    #[test]
    fn test_record_order_appends() {
        let mut user = sample_user();
        assert!(user.order_history.is_empty());

        user.record_order(OrderHistoryEntry {
            order_id: OrderId::new(1),
            timestamp: Utc::now(),
            items: vec![],
            total_price: Price::zero(),
        });

        assert_eq!(user.order_history.len(), 1);
        assert_eq!(user.order_history[0].order_id, OrderId::new(1));
    }

    #[test]
    fn test_debug_redacts_password_hash() {
        let user = sample_user();
        let debug_output = format!("{user:?}");

        assert!(debug_output.contains("kim@office.test"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("fake-hash"));
    }
}
