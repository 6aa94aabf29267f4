//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::menu::Menu;
use crate::notify::Notifier;
use crate::services::auth::TokenSigner;
use crate::store::{OrderStore, UserStore};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like the in-memory stores and the notification
/// channels.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AppConfig,
    users: UserStore,
    orders: OrderStore,
    menu: Menu,
    tokens: TokenSigner,
    notifier: Notifier,
}

impl AppState {
    /// Create a new application state.
    ///
    /// Builds the stores, the token signer, and the notification channels
    /// from configuration. Stores start empty; the menu is fixed.
    #[must_use]
    pub fn new(config: AppConfig) -> Self {
        let tokens = TokenSigner::new(config.token_secret.clone());
        let notifier = Notifier::from_config(&config);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                users: UserStore::new(),
                orders: OrderStore::new(),
                menu: Menu::standard(),
                tokens,
                notifier,
            }),
        }
    }

    /// Get a reference to the application configuration.
    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    /// Get a reference to the user store.
    #[must_use]
    pub fn users(&self) -> &UserStore {
        &self.inner.users
    }

    /// Get a reference to the order store.
    #[must_use]
    pub fn orders(&self) -> &OrderStore {
        &self.inner.orders
    }

    /// Get a reference to the drink menu.
    #[must_use]
    pub fn menu(&self) -> &Menu {
        &self.inner.menu
    }

    /// Get a reference to the token signer.
    #[must_use]
    pub fn tokens(&self) -> &TokenSigner {
        &self.inner.tokens
    }

    /// Get a reference to the notification fan-out.
    #[must_use]
    pub fn notifier(&self) -> &Notifier {
        &self.inner.notifier
    }
}
