//! Read-only back-office record views: orders, branches, customers.

use tracing::{instrument, warn};

use minimart_core::{BackendOrderId, CustomerId};
use minimart_storefront::backend::{BackendApi, Branch, OrderLineRecord, OrderRecord};

use crate::AdminError;

/// A customer record.
///
/// The legacy backend has no customer endpoint; the list is seeded locally
/// like the staff roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    pub id: CustomerId,
    pub full_name: String,
    pub phone: String,
    pub address: String,
}

/// Read-only views over backend records for the admin surface.
#[derive(Debug, Clone)]
pub struct BackOffice {
    branches: Vec<Branch>,
    customers: Vec<Customer>,
}

impl BackOffice {
    /// Create the views with the seeded customer list and no branches yet.
    #[must_use]
    pub fn new() -> Self {
        Self {
            branches: Vec::new(),
            customers: seed_customers(),
        }
    }

    /// The last successfully fetched branch list.
    #[must_use]
    pub fn branches(&self) -> &[Branch] {
        &self.branches
    }

    /// The seeded customer list.
    #[must_use]
    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    /// Fetch the branch list.
    ///
    /// On failure the last known list is kept, so the view keeps showing
    /// something across a backend blip.
    ///
    /// # Errors
    ///
    /// Returns the backend's error; the held list is untouched.
    #[instrument(skip(self, backend))]
    pub async fn refresh_branches<B: BackendApi>(
        &mut self,
        backend: &B,
    ) -> Result<&[Branch], AdminError> {
        match backend.fetch_branches().await {
            Ok(branches) => {
                self.branches = branches;
                Ok(&self.branches)
            }
            Err(e) => {
                warn!(error = %e, held = self.branches.len(), "branch fetch failed");
                Err(e.into())
            }
        }
    }

    /// Fetch all orders the backend has recorded.
    ///
    /// # Errors
    ///
    /// Returns the backend's error.
    pub async fn fetch_orders<B: BackendApi>(
        &self,
        backend: &B,
    ) -> Result<Vec<OrderRecord>, AdminError> {
        Ok(backend.fetch_orders().await?)
    }

    /// Fetch the line items of one order.
    ///
    /// # Errors
    ///
    /// Returns the backend's error.
    pub async fn fetch_order_lines<B: BackendApi>(
        &self,
        backend: &B,
        id: BackendOrderId,
    ) -> Result<Vec<OrderLineRecord>, AdminError> {
        Ok(backend.fetch_order_lines(id).await?)
    }
}

impl Default for BackOffice {
    fn default() -> Self {
        Self::new()
    }
}

fn seed_customers() -> Vec<Customer> {
    let seeded = [
        (1, "Dang Thu Ha", "0912 000 001", "5 Nguyen Trai"),
        (2, "Bui Van Long", "0912 000 002", "23 Le Loi"),
        (3, "Ngo Thi Thanh", "0912 000 003", "104 Tran Phu"),
    ];
    seeded
        .into_iter()
        .map(|(id, full_name, phone, address)| Customer {
            id: CustomerId::new(id),
            full_name: full_name.to_string(),
            phone: phone.to_string(),
            address: address.to_string(),
        })
        .collect()
}
