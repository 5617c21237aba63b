//! MiniMart Storefront state engine.
//!
//! This crate holds everything the shopper surface needs that is not UI:
//! the product catalog with its ingestion boundary and query pipeline, the
//! cart/wishlist/order-history stores, the auth session, transient
//! notifications, and the flows that tie them to the REST backend.
//!
//! # Architecture
//!
//! Stores are plain synchronous structs; [`state::AppState`] constructs
//! them once at startup and hands out access (dependency injection, no
//! ambient globals). Network calls are the only suspension points, and
//! store mutations apply after a request settles - never optimistically.
//! A backend outage degrades (seed catalog, pending-sync orders, guest
//! login) instead of making the shop unusable.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod backend;
pub mod catalog;
pub mod config;
pub mod notify;
pub mod session;
pub mod state;
pub mod stores;
