//! REST backend client.
//!
//! The engine talks to one external collaborator: a thin CRUD backend over
//! products, orders, auth, and branches. [`BackendApi`] is the seam - the
//! flows in [`crate::state`] are generic over it, [`RestBackend`] speaks
//! the real HTTP contract, and [`InMemoryBackend`] serves development and
//! tests without a network.

mod memory;
mod rest;
pub mod types;

pub use memory::InMemoryBackend;
pub use rest::RestBackend;
pub use types::{
    ApiMessage, Branch, CreatedProduct, Credentials, LoginResponse, OrderItemPayload,
    OrderLineRecord, OrderRecord, OrderSubmission, ProductPayload, RawProduct, RawUser,
    Registration,
};

use minimart_core::{BackendOrderId, ProductId};
use thiserror::Error;

/// Errors from backend operations.
///
/// The distinction matters to callers: `Transport` failures trigger the
/// offline fallbacks (seed catalog, pending-sync orders, guest login),
/// while `Rejected` carries a human-readable message the backend chose to
/// send and is surfaced to the user as-is.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The backend could not be reached, timed out, or closed early.
    #[error("backend unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with a non-success status and a message.
    #[error("backend rejected the request: {message}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Human-readable message from the response body.
        message: String,
    },

    /// The response arrived but did not match the expected shape.
    #[error("malformed backend response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Simulated outage (in-memory backend only).
    #[error("backend offline")]
    Offline,
}

impl BackendError {
    /// Whether this failure means the backend never usefully answered.
    ///
    /// Decode failures count: the original client treated an unparseable
    /// response the same as an unreachable backend.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Decode(_) | Self::Offline)
    }
}

/// Operations the REST backend exposes to the engine.
///
/// Implementations are used through generic bounds, not trait objects, so
/// the methods can be plain `async fn`.
#[allow(async_fn_in_trait)]
pub trait BackendApi {
    /// Fetch the full product list.
    async fn fetch_products(&self) -> Result<Vec<RawProduct>, BackendError>;

    /// Create a product; returns the ID the backend assigned.
    async fn create_product(&self, payload: &ProductPayload) -> Result<ProductId, BackendError>;

    /// Update an existing product wholesale.
    async fn update_product(
        &self,
        id: ProductId,
        payload: &ProductPayload,
    ) -> Result<(), BackendError>;

    /// Delete a product by ID.
    async fn delete_product(&self, id: ProductId) -> Result<(), BackendError>;

    /// Submit a checkout.
    async fn submit_order(&self, order: &OrderSubmission) -> Result<(), BackendError>;

    /// Log in with username and password.
    async fn login(&self, credentials: &Credentials) -> Result<RawUser, BackendError>;

    /// Register a new account.
    async fn register(&self, registration: &Registration) -> Result<(), BackendError>;

    /// Fetch all recorded orders (admin view).
    async fn fetch_orders(&self) -> Result<Vec<OrderRecord>, BackendError>;

    /// Fetch the line items of one order (admin view).
    async fn fetch_order_lines(
        &self,
        id: BackendOrderId,
    ) -> Result<Vec<OrderLineRecord>, BackendError>;

    /// Fetch the branch list (admin view).
    async fn fetch_branches(&self) -> Result<Vec<Branch>, BackendError>;
}
