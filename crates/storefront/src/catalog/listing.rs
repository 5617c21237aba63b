//! Catalog listing pipeline: filter, search, sort, paginate.
//!
//! The pipeline is pure - it never mutates the catalog - and runs in a
//! fixed order: category filter, text search, sort, pagination. Changing
//! any criterion resets the page to 1; page state does not survive a
//! filter change.

use std::cmp::Ordering;
use std::sync::Arc;

use minimart_core::Category;

use super::Product;

/// Number of products per page.
pub const PAGE_SIZE: usize = 8;

/// Active category tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    /// No category restriction.
    #[default]
    All,
    /// Only products in this category.
    Only(Category),
}

/// Sort mode for the product list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    /// Preserve catalog order.
    #[default]
    Default,
    /// Cheapest first; missing prices sort as zero.
    PriceAscending,
    /// Most expensive first.
    PriceDescending,
    /// Alphabetical by name, case-insensitive.
    NameAscending,
}

/// One page of listing results.
#[derive(Debug, Clone)]
pub struct ListingPage {
    /// The products on this page, cheap handles into the catalog.
    pub items: Vec<Arc<Product>>,
    /// Page actually served (the requested page, clamped).
    pub page: usize,
    /// Total pages for the current criteria.
    pub total_pages: usize,
    /// Total products matching the criteria; zero drives the
    /// "no results" message.
    pub total_matches: usize,
}

/// Listing criteria with page-reset discipline.
///
/// Mutating category, search, or sort through the setters resets the page
/// to 1. [`CatalogQuery::run`] clamps whatever page remains into range, so
/// a stale page number can never produce a phantom empty page.
#[derive(Debug, Clone, Default)]
pub struct CatalogQuery {
    category: CategoryFilter,
    search: String,
    sort: SortMode,
    page: usize,
}

impl CatalogQuery {
    /// Criteria showing everything, page 1.
    #[must_use]
    pub fn new() -> Self {
        Self {
            category: CategoryFilter::All,
            search: String::new(),
            sort: SortMode::Default,
            page: 1,
        }
    }

    /// Current category filter.
    #[must_use]
    pub const fn category(&self) -> CategoryFilter {
        self.category
    }

    /// Current search text.
    #[must_use]
    pub fn search(&self) -> &str {
        &self.search
    }

    /// Current sort mode.
    #[must_use]
    pub const fn sort(&self) -> SortMode {
        self.sort
    }

    /// Current page (1-based).
    #[must_use]
    pub const fn page(&self) -> usize {
        self.page
    }

    /// Switch category tabs; resets to page 1.
    pub fn set_category(&mut self, category: CategoryFilter) {
        self.category = category;
        self.page = 1;
    }

    /// Change the search text; resets to page 1.
    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
        self.page = 1;
    }

    /// Change the sort mode; resets to page 1.
    pub fn set_sort(&mut self, sort: SortMode) {
        self.sort = sort;
        self.page = 1;
    }

    /// Jump to a page. Zero is treated as page 1; out-of-range pages are
    /// clamped when the query runs.
    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    /// Run the pipeline over the catalog's products.
    #[must_use]
    pub fn run(&self, products: &[Arc<Product>]) -> ListingPage {
        // 1. Category filter.
        let mut matches: Vec<Arc<Product>> = products
            .iter()
            .filter(|p| match self.category {
                CategoryFilter::All => true,
                CategoryFilter::Only(category) => p.category == Some(category),
            })
            .cloned()
            .collect();

        // 2. Search: trimmed, case-insensitive substring on the name.
        let keyword = self.search.trim().to_lowercase();
        if !keyword.is_empty() {
            matches.retain(|p| p.name.to_lowercase().contains(&keyword));
        }

        // 3. Sort (stable, on the working copy only).
        match self.sort {
            SortMode::Default => {}
            SortMode::PriceAscending => {
                matches.sort_by(|a, b| a.unit_price.amount.cmp(&b.unit_price.amount));
            }
            SortMode::PriceDescending => {
                matches.sort_by(|a, b| b.unit_price.amount.cmp(&a.unit_price.amount));
            }
            SortMode::NameAscending => matches.sort_by(|a, b| compare_names(&a.name, &b.name)),
        }

        // 4. Page count and clamp.
        let total_matches = matches.len();
        let total_pages = total_matches.div_ceil(PAGE_SIZE);
        let page = self.page.clamp(1, total_pages.max(1));

        // 5. Page window.
        let start = (page - 1) * PAGE_SIZE;
        let items = matches.into_iter().skip(start).take(PAGE_SIZE).collect();

        ListingPage {
            items,
            page,
            total_pages,
            total_matches,
        }
    }
}

/// Case-insensitive name comparison, falling back to case-sensitive order
/// for ties so the sort is deterministic.
fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use rust_decimal::dec;

    use minimart_core::{CurrencyCode, Price, ProductId};

    use super::*;

    fn product(id: i32, name: &str, amount: rust_decimal::Decimal, category: Category) -> Arc<Product> {
        Arc::new(Product {
            id: ProductId::new(id),
            name: name.to_string(),
            description: None,
            unit_price: Price::new(amount, CurrencyCode::VND),
            stock_quantity: 10,
            image: None,
            category: Some(category),
            unit: None,
        })
    }

    fn sample_catalog() -> Vec<Arc<Product>> {
        vec![
            product(1, "Rice cooker", dec!(1_500_000), Category::Household),
            product(4, "Coca Cola", dec!(10_000), Category::Beverage),
            product(8, "Pepsi Cola", dec!(10_000), Category::Beverage),
        ]
    }

    #[test]
    fn category_and_search_combine() {
        let catalog = sample_catalog();
        let mut query = CatalogQuery::new();
        query.set_category(CategoryFilter::Only(Category::Beverage));
        query.set_search("coca");

        let page = query.run(&catalog);
        let ids: Vec<i32> = page.items.iter().map(|p| p.id.as_i32()).collect();
        assert_eq!(ids, vec![4]);
        assert_eq!(page.total_matches, 1);
    }

    #[test]
    fn blank_search_is_a_no_op_filter() {
        let catalog = sample_catalog();
        let mut query = CatalogQuery::new();
        query.set_search("   ");
        assert_eq!(query.run(&catalog).total_matches, 3);
    }

    #[test]
    fn search_is_case_insensitive() {
        let catalog = sample_catalog();
        let mut query = CatalogQuery::new();
        query.set_search("COLA");
        assert_eq!(query.run(&catalog).total_matches, 2);
    }

    #[test]
    fn price_sort_orders_cheapest_first_and_is_stable() {
        let catalog = sample_catalog();
        let mut query = CatalogQuery::new();
        query.set_sort(SortMode::PriceAscending);

        let page = query.run(&catalog);
        let ids: Vec<i32> = page.items.iter().map(|p| p.id.as_i32()).collect();
        // Coca (10k) and Pepsi (10k) tie; catalog order breaks the tie.
        assert_eq!(ids, vec![4, 8, 1]);
    }

    #[test]
    fn name_sort_is_case_insensitive() {
        let catalog = vec![
            product(1, "pepsi", dec!(1), Category::Beverage),
            product(2, "Coca", dec!(1), Category::Beverage),
        ];
        let mut query = CatalogQuery::new();
        query.set_sort(SortMode::NameAscending);
        let names: Vec<String> = query
            .run(&catalog)
            .items
            .iter()
            .map(|p| p.name.clone())
            .collect();
        assert_eq!(names, vec!["Coca", "pepsi"]);
    }

    #[test]
    fn sorting_does_not_mutate_the_catalog() {
        let catalog = sample_catalog();
        let mut query = CatalogQuery::new();
        query.set_sort(SortMode::PriceDescending);
        let _ = query.run(&catalog);
        let ids: Vec<i32> = catalog.iter().map(|p| p.id.as_i32()).collect();
        assert_eq!(ids, vec![1, 4, 8]);
    }

    #[test]
    fn eleven_products_paginate_into_two_pages() {
        let catalog: Vec<Arc<Product>> = (1..=11)
            .map(|i| product(i, &format!("Item {i}"), dec!(1_000), Category::Food))
            .collect();
        let mut query = CatalogQuery::new();

        let first = query.run(&catalog);
        assert_eq!(first.total_pages, 2);
        assert_eq!(first.items.len(), 8);

        query.set_page(2);
        let second = query.run(&catalog);
        assert_eq!(second.items.len(), 3);
        assert_eq!(second.page, 2);
    }

    #[test]
    fn out_of_range_page_clamps_to_the_last_page() {
        let catalog: Vec<Arc<Product>> = (1..=11)
            .map(|i| product(i, &format!("Item {i}"), dec!(1_000), Category::Food))
            .collect();
        let mut query = CatalogQuery::new();
        query.set_page(3);

        let page = query.run(&catalog);
        assert_eq!(page.page, 2);
        assert_eq!(page.items.len(), 3);
    }

    #[test]
    fn changing_criteria_resets_the_page() {
        let mut query = CatalogQuery::new();
        query.set_page(2);
        query.set_search("cola");
        assert_eq!(query.page(), 1);

        query.set_page(2);
        query.set_category(CategoryFilter::Only(Category::Beverage));
        assert_eq!(query.page(), 1);

        query.set_page(2);
        query.set_sort(SortMode::NameAscending);
        assert_eq!(query.page(), 1);
    }

    #[test]
    fn empty_result_reports_zero_matches() {
        let catalog = sample_catalog();
        let mut query = CatalogQuery::new();
        query.set_search("durian");
        let page = query.run(&catalog);
        assert_eq!(page.total_matches, 0);
        assert_eq!(page.total_pages, 0);
        assert!(page.items.is_empty());
        assert_eq!(page.page, 1);
    }
}
