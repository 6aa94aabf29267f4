//! In-memory stores guarded by async locks.
//!
//! Accounts and orders live for the lifetime of the process; nothing is
//! persisted. Each store owns its collection behind a `tokio::sync::RwLock`
//! so handlers can share it through [`AppState`](crate::state::AppState).

pub mod orders;
pub mod users;

pub use orders::OrderStore;
pub use users::{DuplicateEmail, UserStore};
