//! HTTP route tree.
//!
//! ```text
//! /api
//! ├── /health                 GET   liveness probe
//! ├── /status                 GET   notification channel flags
//! ├── /auth
//! │   ├── /signup             POST  register a new employee
//! │   ├── /login              POST  log in
//! │   └── /me                 GET   current profile           (token)
//! ├── /menu
//! │   ├── /                   GET   full menu
//! │   ├── /category/{name}    GET   drinks in one category
//! │   └── /drink/{drink_id}   GET   one drink
//! └── /orders
//!     ├── /create             POST  place an order            (token)
//!     ├── /my-orders          GET   caller's orders           (token)
//!     ├── /admin/all          GET   every order               (token)
//!     └── /{order_id}         GET   one order                 (token)
//! ```
//!
//! Anything outside the tree falls through to a JSON 404.

use axum::{
    Router,
    http::{Method, Uri},
    routing::{get, post},
};

use crate::error::AppError;
use crate::state::AppState;

pub mod auth;
pub mod menu;
pub mod orders;
pub mod system;

fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(auth::signup))
        .route("/login", post(auth::login))
        .route("/me", get(auth::me))
}

fn menu_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(menu::full_menu))
        .route("/category/{category}", get(menu::category))
        .route("/drink/{drink_id}", get(menu::drink))
}

fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/create", post(orders::create))
        .route("/my-orders", get(orders::my_orders))
        .route("/admin/all", get(orders::admin_all))
        .route("/{order_id}", get(orders::detail))
}

/// Build the full application router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest(
            "/api",
            Router::new()
                .route("/health", get(system::health))
                .route("/status", get(system::status))
                .nest("/auth", auth_routes())
                .nest("/menu", menu_routes())
                .nest("/orders", order_routes()),
        )
        .fallback(not_found)
}

/// JSON 404 for unmatched paths.
async fn not_found(method: Method, uri: Uri) -> AppError {
    AppError::NotFound(format!("Cannot {method} {}", uri.path()))
}
