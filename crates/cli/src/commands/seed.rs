//! Show the built-in seed catalog.

use tracing::info;

use minimart_storefront::catalog::seed;

/// Print the seed list the engine serves when the backend is unreachable.
pub fn run() {
    let products = seed::seed_products();
    info!("{} seeded products", products.len());
    for product in products {
        let category = product
            .category
            .map_or_else(|| "-".to_string(), |c| c.label().to_string());
        info!(
            "  #{:<3} {:<40} {:>12}  [{category}]  stock: {}",
            product.id, product.name, product.unit_price, product.stock_quantity
        );
    }
}
