//! The wishlist: set semantics over products.

use std::sync::Arc;

use minimart_core::ProductId;

use crate::catalog::Product;

/// Liked products, in the order they were first liked.
///
/// Entries hold catalog handles like cart lines do, so a product deleted
/// from the catalog still renders from last-known fields.
#[derive(Debug, Default)]
pub struct WishlistStore {
    entries: Vec<Arc<Product>>,
}

impl WishlistStore {
    /// Create an empty wishlist.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Toggle membership for a product; returns the resulting state
    /// (`true` = now present).
    pub fn toggle(&mut self, product: Arc<Product>) -> bool {
        if self.contains(product.id) {
            self.remove(product.id);
            false
        } else {
            self.entries.push(product);
            true
        }
    }

    /// Remove a product. No-op when absent.
    pub fn remove(&mut self, id: ProductId) {
        self.entries.retain(|p| p.id != id);
    }

    /// Empty the wishlist.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Whether the product is currently liked.
    #[must_use]
    pub fn contains(&self, id: ProductId) -> bool {
        self.entries.iter().any(|p| p.id == id)
    }

    /// Number of liked products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the wishlist is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in like order.
    #[must_use]
    pub fn entries(&self) -> &[Arc<Product>] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use minimart_core::Price;

    use super::*;

    fn product(id: i32) -> Arc<Product> {
        Arc::new(Product {
            id: ProductId::new(id),
            name: format!("Item {id}"),
            description: None,
            unit_price: Price::zero(),
            stock_quantity: 0,
            image: None,
            category: None,
            unit: None,
        })
    }

    #[test]
    fn toggle_is_its_own_inverse() {
        let mut wishlist = WishlistStore::new();
        let item = product(4);

        assert!(wishlist.toggle(Arc::clone(&item)));
        assert!(wishlist.contains(ProductId::new(4)));

        assert!(!wishlist.toggle(item));
        assert!(!wishlist.contains(ProductId::new(4)));
        assert!(wishlist.is_empty());
    }

    #[test]
    fn toggling_one_product_twice_leaves_others_alone() {
        let mut wishlist = WishlistStore::new();
        wishlist.toggle(product(1));
        wishlist.toggle(product(2));

        wishlist.toggle(product(1));
        wishlist.toggle(product(1));

        assert_eq!(wishlist.len(), 2);
        assert!(wishlist.contains(ProductId::new(2)));
    }

    #[test]
    fn remove_and_clear() {
        let mut wishlist = WishlistStore::new();
        wishlist.toggle(product(1));
        wishlist.toggle(product(2));

        wishlist.remove(ProductId::new(1));
        assert_eq!(wishlist.len(), 1);

        wishlist.remove(ProductId::new(99)); // absent: no-op
        assert_eq!(wishlist.len(), 1);

        wishlist.clear();
        assert!(wishlist.is_empty());
    }
}
