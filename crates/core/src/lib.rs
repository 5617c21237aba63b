//! MiniMart Core - Shared types library.
//!
//! This crate provides common types used across all MiniMart components:
//! - `storefront` - Shopper-facing state engine (catalog, cart, orders)
//! - `admin` - Back-office inventory and staff management
//! - `cli` - Command-line tools for browsing and diagnostics
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no HTTP clients.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, categories, and statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
