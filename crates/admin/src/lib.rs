//! MiniMart back-office state.
//!
//! Everything an admin session needs on top of the storefront engine:
//! catalog CRUD with a staged dialog form ([`inventory::InventoryManager`]),
//! a local staff directory ([`staff::StaffDirectory`]), and read-only record
//! views over orders, branches, and customers ([`records::BackOffice`]).
//!
//! The admin surface reuses the storefront's [`AppState`] as its catalog
//! and backend handle; nothing here talks to the backend directly except
//! through the same [`BackendApi`] seam.
//!
//! [`AppState`]: minimart_storefront::state::AppState
//! [`BackendApi`]: minimart_storefront::backend::BackendApi

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod inventory;
pub mod records;
pub mod staff;

use thiserror::Error;

use minimart_core::ProductId;
use minimart_storefront::backend::BackendError;

/// Errors from back-office operations.
#[derive(Debug, Error)]
pub enum AdminError {
    /// No dialog form is currently staged.
    #[error("no product form is open")]
    NoOpenForm,
    /// The staged form has a blank product name.
    #[error("product name is required")]
    MissingName,
    /// The staged price does not parse as a number.
    #[error("invalid price: {0:?}")]
    InvalidPrice(String),
    /// The staged stock quantity does not parse as a whole number.
    #[error("invalid stock quantity: {0:?}")]
    InvalidQuantity(String),
    /// The referenced product is not in the catalog.
    #[error("no product with id {0}")]
    UnknownProduct(ProductId),
    /// No delete is pending confirmation.
    #[error("no delete is pending")]
    NoPendingDelete,
    /// The backend refused or never received the request.
    #[error(transparent)]
    Backend(#[from] BackendError),
}
