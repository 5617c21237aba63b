//! Mutable shopper-side stores.
//!
//! Plain synchronous structs; [`crate::state::AppState`] owns one of each
//! and injects them where needed. Every mutation is synchronous with the
//! triggering action - the stores themselves never touch the network.

pub mod cart;
pub mod orders;
pub mod wishlist;

pub use cart::{CartLine, CartStore};
pub use orders::{Order, OrderHistoryStore, OrderLine, ShippingInfo};
pub use wishlist::WishlistStore;
