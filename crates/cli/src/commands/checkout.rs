//! Exercise a full checkout: login, fill the cart, place the order.

use secrecy::SecretString;
use tracing::{info, warn};

use minimart_core::ProductId;
use minimart_storefront::backend::{BackendApi, Credentials};
use minimart_storefront::state::AppState;
use minimart_storefront::stores::ShippingInfo;

/// Checkout options, as parsed from the command line.
pub struct Options {
    pub username: String,
    pub products: Vec<i32>,
    pub name: String,
    pub address: String,
    pub phone: String,
}

/// Run the whole shopper flow once and print the recorded order.
///
/// # Errors
///
/// Returns an error when login is rejected, no requested product is in the
/// catalog, or the backend rejects the order.
pub async fn run<B: BackendApi>(
    app: AppState<B>,
    options: Options,
) -> Result<(), Box<dyn std::error::Error>> {
    let source = app.refresh_catalog().await;
    info!(?source, count = app.catalog().len(), "catalog loaded");

    let password = std::env::var("MINIMART_PASSWORD").unwrap_or_default();
    let identity = app
        .login(Credentials {
            username: options.username,
            password: SecretString::from(password),
        })
        .await?;
    info!(username = %identity.username, role = %identity.role, "logged in");

    let mut added = 0_usize;
    for id in options.products {
        let id = ProductId::new(id);
        if app.add_to_cart(id, 1) {
            added += 1;
        } else {
            warn!(product_id = %id, "not in the catalog, skipping");
        }
    }
    if added == 0 {
        return Err("no requested product is in the catalog".into());
    }

    let order = app
        .checkout(ShippingInfo {
            recipient_name: options.name,
            address: options.address,
            phone: options.phone,
        })
        .await?;

    info!(
        order_id = %order.id,
        status = ?order.status,
        total = %order.total,
        lines = order.lines.len(),
        "order recorded"
    );

    Ok(())
}
