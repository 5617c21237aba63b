//! Status and role enums for various entities.

use serde::{Deserialize, Serialize};

/// Role of a logged-in user.
///
/// Drives the hard branch at the top of the view tree: an admin bypasses
/// the shopper surface entirely for the back-office surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    #[default]
    Shopper,
    Admin,
}

impl UserRole {
    /// Parse the role token the legacy backend sends (`"ADMIN"`, `"user"`).
    ///
    /// Anything that is not recognizably an admin is a shopper.
    #[must_use]
    pub fn from_wire(token: &str) -> Self {
        if token.eq_ignore_ascii_case("admin") {
            Self::Admin
        } else {
            Self::Shopper
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Shopper => write!(f, "shopper"),
            Self::Admin => write!(f, "admin"),
        }
    }
}

/// Sync status of a locally recorded order.
///
/// Checkout always records an order locally; `PendingSync` marks the ones
/// whose backend submission never settled successfully, so a reconciliation
/// job (or a test) can tell them apart from real confirmations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// The backend accepted the order.
    Confirmed,
    /// Recorded locally while the backend was unreachable.
    PendingSync,
}

/// Severity of a user-facing notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    #[default]
    Success,
    Error,
    Info,
}
