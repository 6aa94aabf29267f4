//! OfficeBar Core - Shared types library.
//!
//! This crate provides common types used across all OfficeBar components:
//! - `server` - HTTP API serving the office beverage ordering workflow
//! - `integration-tests` - End-to-end tests driving the API over HTTP
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no database access,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, emails, and statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
