//! Domain models for users and orders.

pub mod order;
pub mod user;

pub use order::{LineItem, Order};
pub use user::{OrderHistoryEntry, User};
