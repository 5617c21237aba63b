//! End-to-end flow tests over the in-memory backend.

use rust_decimal::dec;

use minimart_core::{OrderStatus, ProductId, Severity, UserRole};
use minimart_storefront::backend::{Credentials, InMemoryBackend, Registration};
use minimart_storefront::catalog::CatalogSource;
use minimart_storefront::config::StorefrontConfig;
use minimart_storefront::state::{AppState, AuthError, CheckoutError};
use minimart_storefront::stores::ShippingInfo;

fn app() -> (AppState<InMemoryBackend>, InMemoryBackend) {
    let backend = InMemoryBackend::new();
    let app = AppState::with_backend(StorefrontConfig::default(), backend.clone());
    (app, backend)
}

fn shipping() -> ShippingInfo {
    ShippingInfo {
        recipient_name: "Linh Tran".to_string(),
        address: "12 Market Street".to_string(),
        phone: "0123 456 789".to_string(),
    }
}

async fn login_as(app: &AppState<InMemoryBackend>, username: &str) {
    app.login(Credentials {
        username: username.to_string(),
        password: "secret".to_string().into(),
    })
    .await
    .expect("login");
}

// =============================================================================
// Catalog refresh
// =============================================================================

#[tokio::test]
async fn refresh_loads_the_remote_catalog() {
    let (app, _) = app();
    let source = app.refresh_catalog().await;

    assert_eq!(source, CatalogSource::Remote);
    assert_eq!(app.catalog().len(), 11);
}

#[tokio::test]
async fn refresh_falls_back_to_seed_list_when_offline() {
    let (app, backend) = app();
    backend.set_offline(true);

    let source = app.refresh_catalog().await;

    assert_eq!(source, CatalogSource::Fallback);
    assert_eq!(app.catalog().len(), 11);
    assert!(app.catalog().contains(ProductId::new(1)));
}

#[tokio::test]
async fn later_refresh_wins_over_earlier_fallback() {
    let (app, backend) = app();
    backend.set_offline(true);
    app.refresh_catalog().await;
    assert_eq!(app.catalog().source(), CatalogSource::Fallback);

    backend.set_offline(false);
    app.refresh_catalog().await;
    assert_eq!(app.catalog().source(), CatalogSource::Remote);
}

// =============================================================================
// Cart and wishlist conveniences
// =============================================================================

#[tokio::test]
async fn add_to_cart_resolves_the_catalog_handle() {
    let (app, _) = app();
    app.refresh_catalog().await;

    assert!(app.add_to_cart(ProductId::new(4), 2));
    assert!(!app.add_to_cart(ProductId::new(999), 1));

    let cart = app.cart();
    assert_eq!(cart.total_items(), 2);
    assert!(!app.notifications().active().is_empty());
}

#[tokio::test]
async fn wishlist_toggle_reports_membership() {
    let (app, _) = app();
    app.refresh_catalog().await;

    assert_eq!(app.toggle_wishlist(ProductId::new(7)), Some(true));
    assert_eq!(app.toggle_wishlist(ProductId::new(7)), Some(false));
    assert_eq!(app.toggle_wishlist(ProductId::new(999)), None);
}

// =============================================================================
// Checkout
// =============================================================================

#[tokio::test]
async fn checkout_confirms_and_clears_the_cart() {
    let (app, backend) = app();
    app.refresh_catalog().await;
    login_as(&app, "linh").await;
    app.add_to_cart(ProductId::new(1), 1);
    app.add_to_cart(ProductId::new(4), 3);

    let order = app.checkout(shipping()).await.expect("checkout");

    assert_eq!(order.status, OrderStatus::Confirmed);
    assert_eq!(order.lines.len(), 2);
    assert!(app.cart().is_empty());
    assert_eq!(backend.accepted_orders(), 1);
    assert_eq!(app.orders().len(), 1);
}

#[tokio::test]
async fn offline_checkout_records_a_pending_sync_order() {
    let (app, backend) = app();
    app.refresh_catalog().await;
    login_as(&app, "linh").await;
    app.add_to_cart(ProductId::new(2), 1);
    backend.set_offline(true);

    let order = app.checkout(shipping()).await.expect("offline checkout");

    assert_eq!(order.status, OrderStatus::PendingSync);
    assert!(app.cart().is_empty());
    assert_eq!(backend.accepted_orders(), 0);
    assert_eq!(app.orders().len(), 1);
}

#[tokio::test]
async fn checkout_requires_a_logged_in_user() {
    let (app, _) = app();
    app.refresh_catalog().await;
    app.add_to_cart(ProductId::new(1), 1);

    let err = app.checkout(shipping()).await.expect_err("anonymous");
    assert!(matches!(err, CheckoutError::NotAuthenticated));
    assert!(!app.cart().is_empty());
}

#[tokio::test]
async fn checkout_rejects_an_empty_cart_and_blank_fields() {
    let (app, _) = app();
    app.refresh_catalog().await;
    login_as(&app, "linh").await;

    let err = app.checkout(shipping()).await.expect_err("empty cart");
    assert!(matches!(err, CheckoutError::EmptyCart));

    app.add_to_cart(ProductId::new(1), 1);
    let blank = ShippingInfo {
        recipient_name: "  ".to_string(),
        ..shipping()
    };
    let err = app.checkout(blank).await.expect_err("blank name");
    assert!(matches!(err, CheckoutError::MissingField("recipient name")));
    assert!(!app.cart().is_empty());
}

#[tokio::test]
async fn recorded_order_is_independent_of_later_cart_edits() {
    let (app, _) = app();
    app.refresh_catalog().await;
    login_as(&app, "linh").await;
    app.add_to_cart(ProductId::new(3), 2);

    let order = app.checkout(shipping()).await.expect("checkout");
    let recorded_total = order.total;

    app.add_to_cart(ProductId::new(3), 5);
    app.cart().clear();

    let history = app.orders();
    let first = history.orders().first().expect("one order");
    assert_eq!(first.total, recorded_total);
    assert_eq!(first.lines.len(), 1);
    assert_eq!(first.lines.first().expect("line").quantity, 2);
}

#[tokio::test]
async fn order_history_is_newest_first() {
    let (app, _) = app();
    app.refresh_catalog().await;
    login_as(&app, "linh").await;

    app.add_to_cart(ProductId::new(1), 1);
    app.checkout(shipping()).await.expect("first");
    app.add_to_cart(ProductId::new(2), 1);
    let second = app.checkout(shipping()).await.expect("second");

    let history = app.orders();
    assert_eq!(history.orders().first().expect("newest").id, second.id);
}

// =============================================================================
// Auth
// =============================================================================

#[tokio::test]
async fn login_populates_the_session() {
    let (app, _) = app();
    login_as(&app, "admin").await;

    let session = app.session();
    assert!(session.is_authenticated());
    assert!(session.is_admin());
    assert_eq!(
        session.current().expect("identity").role,
        UserRole::Admin
    );
}

#[tokio::test]
async fn offline_login_degrades_to_a_guest_identity() {
    let (app, backend) = app();
    backend.set_offline(true);

    let identity = app
        .login(Credentials {
            username: "linh".to_string(),
            password: "secret".to_string().into(),
        })
        .await
        .expect("guest fallback");

    assert_eq!(identity.role, UserRole::Shopper);
    assert_eq!(identity.username, "linh");
    assert!(app.session().is_authenticated());
    assert!(!app.session().is_admin());
}

#[tokio::test]
async fn blank_username_never_logs_in() {
    let (app, _) = app();
    let err = app
        .login(Credentials {
            username: "   ".to_string(),
            password: "secret".to_string().into(),
        })
        .await
        .expect_err("blank username");
    assert!(matches!(err, AuthError::MissingUsername));
    assert!(!app.session().is_authenticated());
}

#[tokio::test]
async fn registration_failures_are_reported_as_failures() {
    let (app, backend) = app();
    let registration = Registration {
        username: "linh".to_string(),
        password: "secret".to_string().into(),
        full_name: "Linh Tran".to_string(),
        email: "linh@example.com".to_string(),
    };

    app.register(registration.clone()).await.expect("first");

    // Duplicate username is a rejection.
    let err = app
        .register(registration.clone())
        .await
        .expect_err("duplicate");
    assert!(matches!(err, AuthError::Rejected(_)));

    // Unreachable backend is an error too, never a silent success.
    backend.set_offline(true);
    let err = app
        .register(Registration {
            username: "minh".to_string(),
            ..registration
        })
        .await
        .expect_err("offline");
    assert!(matches!(err, AuthError::Backend(_)));
}

#[tokio::test]
async fn logout_clears_the_session() {
    let (app, _) = app();
    login_as(&app, "linh").await;
    assert!(app.session().is_authenticated());

    app.logout();
    assert!(!app.session().is_authenticated());
}

// =============================================================================
// Notifications
// =============================================================================

#[tokio::test(start_paused = true)]
async fn checkout_toast_expires_on_its_own() {
    let (app, _) = app();
    app.refresh_catalog().await;
    login_as(&app, "linh").await;
    app.add_to_cart(ProductId::new(1), 1);
    app.checkout(shipping()).await.expect("checkout");

    assert!(app
        .notifications()
        .active()
        .iter()
        .any(|n| n.severity == Severity::Success));

    tokio::time::sleep(std::time::Duration::from_secs(4)).await;
    tokio::task::yield_now().await;
    assert!(app.notifications().active().is_empty());
}

// =============================================================================
// Catalog handles across deletion
// =============================================================================

#[tokio::test]
async fn cart_handle_survives_a_catalog_delete() {
    let (app, _) = app();
    app.refresh_catalog().await;
    app.add_to_cart(ProductId::new(5), 1);

    assert!(app.remove_product(ProductId::new(5)));
    assert!(!app.catalog().contains(ProductId::new(5)));

    let cart = app.cart();
    let line = cart.lines().first().expect("line");
    assert_eq!(line.product.id, ProductId::new(5));
    assert!(line.product.unit_price.amount > dec!(0));
}
