//! In-memory user store.

use officebar_core::{Email, UserId};
use thiserror::Error;
use tokio::sync::RwLock;

use crate::models::{OrderHistoryEntry, User};

/// Returned by [`UserStore::create`] when the email is already registered.
#[derive(Debug, Error)]
#[error("email already registered")]
pub struct DuplicateEmail;

/// Process-lifetime storage for registered users.
#[derive(Default)]
pub struct UserStore {
    users: RwLock<Vec<User>>,
}

impl UserStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new account.
    ///
    /// The duplicate check and the insert happen under a single write lock,
    /// so two concurrent signups with the same email cannot both succeed.
    pub async fn create(
        &self,
        email: Email,
        password_hash: String,
        first_name: String,
        last_name: String,
    ) -> Result<User, DuplicateEmail> {
        let mut users = self.users.write().await;

        if users.iter().any(|user| user.email == email) {
            return Err(DuplicateEmail);
        }

        let user = User::new(email, password_hash, first_name, last_name);
        users.push(user.clone());
        Ok(user)
    }

    pub async fn find_by_email(&self, email: &Email) -> Option<User> {
        self.users
            .read()
            .await
            .iter()
            .find(|user| &user.email == email)
            .cloned()
    }

    pub async fn find_by_id(&self, id: UserId) -> Option<User> {
        self.users
            .read()
            .await
            .iter()
            .find(|user| user.id == id)
            .cloned()
    }

    /// Append an order to a user's history.
    ///
    /// Returns `false` when no user with that ID exists.
    pub async fn record_order(&self, id: UserId, entry: OrderHistoryEntry) -> bool {
        let mut users = self.users.write().await;
        match users.iter_mut().find(|user| user.id == id) {
            Some(user) => {
                user.record_order(entry);
                true
            }
            None => false,
        }
    }

    /// Number of registered users.
    pub async fn count(&self) -> usize {
        self.users.read().await.len()
    }
}
