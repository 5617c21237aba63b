//! In-memory backend for development and hermetic tests.
//!
//! Serves the seed catalog, records orders and registrations, and can
//! simulate an outage so the offline fallbacks are exercisable without
//! pulling a network cable.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use chrono::Utc;

use minimart_core::{BackendOrderId, BranchId, ProductId, UserId, UserRole};

use crate::catalog::seed;

use super::types::{
    Branch, Credentials, OrderLineRecord, OrderRecord, OrderSubmission, ProductPayload,
    RawProduct, RawUser, Registration,
};
use super::{BackendApi, BackendError};

/// An in-memory stand-in for the REST backend.
///
/// Clone-able handle over shared state, like the real client.
#[derive(Clone, Default)]
pub struct InMemoryBackend {
    inner: Arc<MemoryInner>,
}

#[derive(Default)]
struct MemoryInner {
    offline: AtomicBool,
    state: Mutex<MemoryState>,
}

struct MemoryState {
    products: Vec<RawProduct>,
    next_product_id: i32,
    orders: Vec<(OrderRecord, Vec<OrderLineRecord>)>,
    next_order_id: i32,
    usernames: Vec<String>,
    branches: Vec<Branch>,
}

impl Default for MemoryState {
    fn default() -> Self {
        let products: Vec<RawProduct> = seed::seed_products()
            .into_iter()
            .map(|product| RawProduct {
                id: product.id.as_i32(),
                ten_mat_hang: Some(product.name),
                mo_ta: product.description,
                don_gia: Some(product.unit_price.amount),
                so_luong_ton: Some(i64::from(product.stock_quantity)),
                don_vi_tinh: product.unit,
                image_url: product.image,
                category: product.category,
                ..RawProduct::default()
            })
            .collect();
        let next_product_id = products.iter().map(|p| p.id).max().unwrap_or(0) + 1;

        Self {
            products,
            next_product_id,
            orders: Vec::new(),
            next_order_id: 1,
            usernames: Vec::new(),
            branches: vec![
                Branch {
                    id: BranchId::new(1),
                    name: "MiniMart Central".to_string(),
                    address: Some("12 Market Street".to_string()),
                    phone: Some("0123 456 789".to_string()),
                },
                Branch {
                    id: BranchId::new(2),
                    name: "MiniMart Riverside".to_string(),
                    address: Some("88 River Road".to_string()),
                    phone: Some("0123 456 790".to_string()),
                },
            ],
        }
    }
}

impl InMemoryBackend {
    /// Create a backend pre-loaded with the seed catalog and two branches.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate (or end) a backend outage.
    ///
    /// While offline every operation fails with a transport-class error.
    pub fn set_offline(&self, offline: bool) {
        self.inner.offline.store(offline, Ordering::SeqCst);
    }

    /// Number of orders the backend has accepted.
    #[must_use]
    pub fn accepted_orders(&self) -> usize {
        self.lock_state().orders.len()
    }

    fn check_online(&self) -> Result<(), BackendError> {
        if self.inner.offline.load(Ordering::SeqCst) {
            return Err(BackendError::Offline);
        }
        Ok(())
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, MemoryState> {
        self.inner
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl BackendApi for InMemoryBackend {
    async fn fetch_products(&self) -> Result<Vec<RawProduct>, BackendError> {
        self.check_online()?;
        Ok(self.lock_state().products.clone())
    }

    async fn create_product(&self, payload: &ProductPayload) -> Result<ProductId, BackendError> {
        self.check_online()?;
        let mut state = self.lock_state();
        let id = state.next_product_id;
        state.next_product_id += 1;
        state.products.push(RawProduct {
            id,
            ten_mat_hang: Some(payload.name.clone()),
            mo_ta: payload.description.clone(),
            don_gia: Some(payload.unit_price),
            so_luong_ton: Some(i64::from(payload.stock_quantity)),
            image_url: payload.image_url.clone(),
            ..RawProduct::default()
        });
        Ok(ProductId::new(id))
    }

    async fn update_product(
        &self,
        id: ProductId,
        payload: &ProductPayload,
    ) -> Result<(), BackendError> {
        self.check_online()?;
        let mut state = self.lock_state();
        let Some(record) = state.products.iter_mut().find(|p| p.id == id.as_i32()) else {
            return Err(BackendError::Rejected {
                status: 404,
                message: format!("no product with id {id}"),
            });
        };
        record.ten_mat_hang = Some(payload.name.clone());
        record.mo_ta = payload.description.clone();
        record.don_gia = Some(payload.unit_price);
        record.so_luong_ton = Some(i64::from(payload.stock_quantity));
        record.image_url = payload.image_url.clone();
        Ok(())
    }

    async fn delete_product(&self, id: ProductId) -> Result<(), BackendError> {
        self.check_online()?;
        self.lock_state().products.retain(|p| p.id != id.as_i32());
        Ok(())
    }

    async fn submit_order(&self, order: &OrderSubmission) -> Result<(), BackendError> {
        self.check_online()?;
        let mut state = self.lock_state();
        let id = state.next_order_id;
        state.next_order_id += 1;
        let lines = order
            .items
            .iter()
            .map(|item| OrderLineRecord {
                product_id: item.product_id,
                quantity: item.quantity,
                price: Some(item.price),
                product_name: None,
            })
            .collect();
        state.orders.push((
            OrderRecord {
                id: BackendOrderId::new(id),
                full_name: order.full_name.clone(),
                address: order.address.clone(),
                phone: order.phone.clone(),
                total_price: Some(order.total_price),
                created_at: Some(Utc::now()),
            },
            lines,
        ));
        Ok(())
    }

    async fn login(&self, credentials: &Credentials) -> Result<RawUser, BackendError> {
        self.check_online()?;
        if credentials.username.is_empty() {
            return Err(BackendError::Rejected {
                status: 401,
                message: "unknown user".to_string(),
            });
        }
        // Any non-empty username logs in; "admin" gets the admin role.
        let role = if credentials.username == "admin" {
            UserRole::Admin
        } else {
            UserRole::Shopper
        };
        Ok(RawUser {
            id: UserId::new(1),
            username: credentials.username.clone(),
            email: Some(format!("{}@example.com", credentials.username)),
            full_name: Some(credentials.username.clone()),
            role: Some(role.to_string()),
        })
    }

    async fn register(&self, registration: &Registration) -> Result<(), BackendError> {
        self.check_online()?;
        let mut state = self.lock_state();
        if state.usernames.iter().any(|u| u == &registration.username) {
            return Err(BackendError::Rejected {
                status: 409,
                message: "username already taken".to_string(),
            });
        }
        state.usernames.push(registration.username.clone());
        Ok(())
    }

    async fn fetch_orders(&self) -> Result<Vec<OrderRecord>, BackendError> {
        self.check_online()?;
        Ok(self
            .lock_state()
            .orders
            .iter()
            .map(|(record, _)| record.clone())
            .collect())
    }

    async fn fetch_order_lines(
        &self,
        id: BackendOrderId,
    ) -> Result<Vec<OrderLineRecord>, BackendError> {
        self.check_online()?;
        self.lock_state()
            .orders
            .iter()
            .find(|(record, _)| record.id == id)
            .map(|(_, lines)| lines.clone())
            .ok_or(BackendError::Rejected {
                status: 404,
                message: format!("no order with id {id}"),
            })
    }

    async fn fetch_branches(&self) -> Result<Vec<Branch>, BackendError> {
        self.check_online()?;
        Ok(self.lock_state().branches.clone())
    }
}
