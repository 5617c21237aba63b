//! Application state shared across the whole session.
//!
//! Every store is constructed exactly once here and reached through this
//! handle (dependency injection) - there is no ambient global state. The
//! async flows that touch the backend also live here so the stores
//! themselves stay synchronous and pure.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use thiserror::Error;
use tracing::{info, instrument, warn};

use minimart_core::{OrderStatus, ProductId, Severity, UserRole};

use crate::backend::{
    BackendApi, BackendError, Credentials, OrderItemPayload, OrderSubmission, Registration,
    RestBackend,
};
use crate::catalog::{CatalogSource, Product, ProductCatalog, ingest, seed};
use crate::config::StorefrontConfig;
use crate::notify::NotificationCenter;
use crate::session::{AuthSession, UserIdentity};
use crate::stores::{CartStore, Order, OrderHistoryStore, ShippingInfo, WishlistStore};

/// Errors from the checkout flow.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Nothing in the cart to order.
    #[error("cart is empty")]
    EmptyCart,
    /// Checkout requires a logged-in user.
    #[error("not logged in")]
    NotAuthenticated,
    /// A required shipping field is blank.
    #[error("missing shipping field: {0}")]
    MissingField(&'static str),
    /// The backend looked at the order and said no. The cart is kept.
    #[error("order rejected: {0}")]
    Rejected(String),
}

/// Errors from the login and registration flows.
#[derive(Debug, Error)]
pub enum AuthError {
    /// A username is required even for the offline fallback identity.
    #[error("username is required")]
    MissingUsername,
    /// The backend rejected the credentials or registration.
    #[error("{0}")]
    Rejected(String),
    /// Registration could not reach the backend. Unlike login, this is an
    /// error: claiming success without an account existing anywhere would
    /// be a lie.
    #[error("registration failed: {0}")]
    Backend(#[from] BackendError),
}

/// Application state shared across the session.
///
/// Cheaply cloneable via `Arc`; generic over the backend so flows can be
/// driven by [`RestBackend`] in production and the in-memory backend in
/// tests and demos.
pub struct AppState<B = RestBackend> {
    inner: Arc<AppStateInner<B>>,
}

impl<B> Clone for AppState<B> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

struct AppStateInner<B> {
    config: StorefrontConfig,
    backend: B,
    catalog: RwLock<ProductCatalog>,
    cart: Mutex<CartStore>,
    wishlist: Mutex<WishlistStore>,
    orders: Mutex<OrderHistoryStore>,
    session: Mutex<AuthSession>,
    notifications: NotificationCenter,
    fetch_seq: AtomicU64,
}

impl AppState<RestBackend> {
    /// Create the application state with the HTTP backend.
    ///
    /// # Errors
    ///
    /// Returns a `reqwest` error if the HTTP client cannot be built.
    pub fn new(config: StorefrontConfig) -> Result<Self, reqwest::Error> {
        let backend = RestBackend::new(&config)?;
        Ok(Self::with_backend(config, backend))
    }
}

impl<B: BackendApi> AppState<B> {
    /// Create the application state with an explicit backend.
    #[must_use]
    pub fn with_backend(config: StorefrontConfig, backend: B) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                backend,
                catalog: RwLock::new(ProductCatalog::new()),
                cart: Mutex::new(CartStore::new()),
                wishlist: Mutex::new(WishlistStore::new()),
                orders: Mutex::new(OrderHistoryStore::new()),
                session: Mutex::new(AuthSession::new()),
                notifications: NotificationCenter::new(),
                fetch_seq: AtomicU64::new(0),
            }),
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the backend client.
    #[must_use]
    pub fn backend(&self) -> &B {
        &self.inner.backend
    }

    /// Read access to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> RwLockReadGuard<'_, ProductCatalog> {
        self.inner
            .catalog
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Exclusive access to the cart.
    #[must_use]
    pub fn cart(&self) -> MutexGuard<'_, CartStore> {
        lock(&self.inner.cart)
    }

    /// Exclusive access to the wishlist.
    #[must_use]
    pub fn wishlist(&self) -> MutexGuard<'_, WishlistStore> {
        lock(&self.inner.wishlist)
    }

    /// Exclusive access to the order history.
    #[must_use]
    pub fn orders(&self) -> MutexGuard<'_, OrderHistoryStore> {
        lock(&self.inner.orders)
    }

    /// Exclusive access to the auth session.
    #[must_use]
    pub fn session(&self) -> MutexGuard<'_, AuthSession> {
        lock(&self.inner.session)
    }

    /// Get a reference to the notification center.
    #[must_use]
    pub fn notifications(&self) -> &NotificationCenter {
        &self.inner.notifications
    }

    fn catalog_write(&self) -> RwLockWriteGuard<'_, ProductCatalog> {
        self.inner
            .catalog
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }

    // =========================================================================
    // Catalog flows
    // =========================================================================

    /// Fetch the catalog from the backend and replace it wholesale.
    ///
    /// A transport failure falls back to the built-in seed list - the shop
    /// never blocks on a backend outage. Overlapping refreshes are
    /// sequenced: a response that lost the race to a later fetch is
    /// discarded. Returns the catalog source after this call settled.
    #[instrument(skip(self))]
    pub async fn refresh_catalog(&self) -> CatalogSource {
        let seq = self.inner.fetch_seq.fetch_add(1, Ordering::SeqCst) + 1;

        let (products, source) = match self.inner.backend.fetch_products().await {
            Ok(raw) => (ingest::normalize_all(raw), CatalogSource::Remote),
            Err(e) => {
                warn!(error = %e, "catalog fetch failed, serving built-in seed list");
                (seed::seed_products(), CatalogSource::Fallback)
            }
        };

        let mut catalog = self.catalog_write();
        if catalog.replace(seq, products, source) {
            info!(seq, count = catalog.len(), source = ?source, "catalog replaced");
        }
        catalog.source()
    }

    /// Remove one product from the local catalog (admin delete).
    ///
    /// Cart and wishlist handles to it keep their last-known snapshot.
    pub fn remove_product(&self, id: ProductId) -> bool {
        self.catalog_write().remove(id)
    }

    // =========================================================================
    // Shopper flows
    // =========================================================================

    /// Add a catalog product to the cart. Returns `false` when the ID is
    /// not in the catalog.
    pub fn add_to_cart(&self, id: ProductId, quantity: u32) -> bool {
        let Some(product) = self.catalog().get(id) else {
            return false;
        };
        let name = product.name.clone();
        self.cart().add(product, quantity);
        self.inner
            .notifications
            .post(format!("Added {name} to cart"), Severity::Success);
        true
    }

    /// Toggle a catalog product on the wishlist. Returns the resulting
    /// membership, or `None` when the ID is not in the catalog.
    pub fn toggle_wishlist(&self, id: ProductId) -> Option<bool> {
        let product = self.catalog().get(id)?;
        Some(self.wishlist().toggle(product))
    }

    /// Check out the current cart.
    ///
    /// Snapshots the cart, submits to the backend, and records the order
    /// locally either way: `Confirmed` when the backend accepted it,
    /// `PendingSync` when the backend was unreachable (availability over
    /// consistency - the shopper is not blocked by an outage). A rejection
    /// the backend chose to send keeps the cart intact and records
    /// nothing.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError`] for an empty cart, anonymous session,
    /// blank shipping field, or a backend-reported rejection.
    #[instrument(skip(self, shipping))]
    pub async fn checkout(&self, shipping: ShippingInfo) -> Result<Order, CheckoutError> {
        if !self.session().is_authenticated() {
            return Err(CheckoutError::NotAuthenticated);
        }
        validate_shipping(&shipping)?;

        // Snapshot under the lock, then release it across the await.
        let (lines, total) = {
            let cart = self.cart();
            if cart.is_empty() {
                return Err(CheckoutError::EmptyCart);
            }
            (cart.snapshot(), cart.total_price())
        };

        let submission = OrderSubmission {
            full_name: shipping.recipient_name.clone(),
            address: shipping.address.clone(),
            phone: shipping.phone.clone(),
            total_price: total.amount,
            items: lines
                .iter()
                .map(|line| OrderItemPayload {
                    product_id: line.product_id,
                    quantity: line.quantity,
                    price: line.unit_price.amount,
                })
                .collect(),
        };

        let status = match self.inner.backend.submit_order(&submission).await {
            Ok(()) => OrderStatus::Confirmed,
            Err(e) if e.is_transport() => {
                warn!(error = %e, "backend unreachable, recording order locally");
                OrderStatus::PendingSync
            }
            Err(BackendError::Rejected { message, .. }) => {
                return Err(CheckoutError::Rejected(message));
            }
            // is_transport() covers every other variant.
            Err(e) => return Err(CheckoutError::Rejected(e.to_string())),
        };

        let order = self.orders().record(lines, total, shipping, status);
        self.cart().clear();

        match status {
            OrderStatus::Confirmed => {
                self.inner
                    .notifications
                    .post("Order placed successfully", Severity::Success);
            }
            OrderStatus::PendingSync => {
                self.inner
                    .notifications
                    .post("Order placed (offline mode)", Severity::Info);
            }
        }
        info!(order_id = %order.id, status = ?status, "order recorded");

        Ok(order)
    }

    // =========================================================================
    // Auth flows
    // =========================================================================

    /// Log in.
    ///
    /// A backend-reported rejection (wrong password) is an error. A
    /// transport failure degrades to a local guest identity so the shop
    /// stays usable offline.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::MissingUsername`] for a blank username or
    /// [`AuthError::Rejected`] when the backend refused the credentials.
    #[instrument(skip(self, credentials), fields(username = %credentials.username))]
    pub async fn login(&self, credentials: Credentials) -> Result<UserIdentity, AuthError> {
        if credentials.username.trim().is_empty() {
            return Err(AuthError::MissingUsername);
        }

        let identity = match self.inner.backend.login(&credentials).await {
            Ok(user) => UserIdentity {
                id: user.id,
                username: user.username.clone(),
                email: user.email.unwrap_or_default(),
                full_name: user.full_name.unwrap_or(user.username),
                role: user.role.as_deref().map(UserRole::from_wire).unwrap_or_default(),
            },
            Err(e) if e.is_transport() => {
                warn!(error = %e, "backend unreachable, using local guest identity");
                let guest = UserIdentity::guest(credentials.username.trim());
                self.inner
                    .notifications
                    .post("Logged in (offline mode)", Severity::Info);
                self.session().login(guest.clone());
                return Ok(guest);
            }
            Err(BackendError::Rejected { message, .. }) => {
                return Err(AuthError::Rejected(message));
            }
            Err(e) => return Err(AuthError::Rejected(e.to_string())),
        };

        self.inner.notifications.post(
            format!("Welcome back, {}", identity.full_name),
            Severity::Success,
        );
        self.session().login(identity.clone());
        Ok(identity)
    }

    /// Log out unconditionally.
    pub fn logout(&self) {
        self.session().logout();
    }

    /// Register a new account.
    ///
    /// Failures are reported as failures - including transport failures.
    /// (The system this replaces showed a success message when the backend
    /// was down without creating any account; that was a bug, not a
    /// feature.)
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`] when fields are missing or the backend
    /// rejected or never received the registration.
    #[instrument(skip(self, registration), fields(username = %registration.username))]
    pub async fn register(&self, registration: Registration) -> Result<(), AuthError> {
        if registration.username.trim().is_empty() {
            return Err(AuthError::MissingUsername);
        }

        match self.inner.backend.register(&registration).await {
            Ok(()) => {
                self.inner
                    .notifications
                    .post("Registration successful, please log in", Severity::Success);
                Ok(())
            }
            Err(BackendError::Rejected { message, .. }) => Err(AuthError::Rejected(message)),
            Err(e) => Err(AuthError::Backend(e)),
        }
    }

    /// Look up a product handle in the catalog.
    #[must_use]
    pub fn product(&self, id: ProductId) -> Option<Arc<Product>> {
        self.catalog().get(id)
    }
}

fn validate_shipping(shipping: &ShippingInfo) -> Result<(), CheckoutError> {
    if shipping.recipient_name.trim().is_empty() {
        return Err(CheckoutError::MissingField("recipient name"));
    }
    if shipping.address.trim().is_empty() {
        return Err(CheckoutError::MissingField("address"));
    }
    if shipping.phone.trim().is_empty() {
        return Err(CheckoutError::MissingField("phone"));
    }
    Ok(())
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
