//! HTTP middleware and extractors.

pub mod auth;
pub mod json;

pub use auth::RequireAuth;
pub use json::ApiJson;
