//! Browse the catalog through the listing pipeline.

use std::str::FromStr;

use tracing::info;

use minimart_core::Category;
use minimart_storefront::backend::BackendApi;
use minimart_storefront::catalog::listing::{CatalogQuery, CategoryFilter, SortMode};
use minimart_storefront::state::AppState;

/// Browse options, as parsed from the command line.
pub struct Options {
    pub category: Option<String>,
    pub search: Option<String>,
    pub sort: SortMode,
    pub page: usize,
}

/// Fetch the catalog and print one page of the filtered listing.
///
/// # Errors
///
/// Returns an error for an unrecognized category name.
pub async fn run<B: BackendApi>(
    app: AppState<B>,
    options: Options,
) -> Result<(), Box<dyn std::error::Error>> {
    let source = app.refresh_catalog().await;
    info!(?source, count = app.catalog().len(), "catalog loaded");

    let mut query = CatalogQuery::new();
    if let Some(name) = options.category {
        let category = Category::from_str(&name)
            .map_err(|_| format!("unknown category: {name}"))?;
        query.set_category(CategoryFilter::Only(category));
    }
    if let Some(search) = options.search {
        query.set_search(search);
    }
    query.set_sort(options.sort);
    query.set_page(options.page);

    let catalog = app.catalog();
    let listing = query.run(catalog.products());

    info!(
        "Page {}/{} ({} matching products)",
        listing.page, listing.total_pages, listing.total_matches
    );
    for product in &listing.items {
        let category = product
            .category
            .map_or_else(|| "-".to_string(), |c| c.label().to_string());
        info!(
            "  #{:<3} {:<40} {:>12}  [{category}]  stock: {}",
            product.id, product.name, product.unit_price, product.stock_quantity
        );
    }

    Ok(())
}
