//! The product catalog.
//!
//! The catalog is the authoritative in-memory list of purchasable products
//! for the current session. It is populated by a backend fetch (falling
//! back to the built-in seed list) and mutated only by full replacement -
//! never patched - which keeps shopper reads and admin writes from racing
//! on partial state.

pub mod ingest;
pub mod listing;
pub mod seed;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use minimart_core::{Category, Price, ProductId};

/// A canonical catalog entry.
///
/// This is the only product shape that exists past the ingestion boundary;
/// the dual-named wire records never leave [`ingest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Stable identity.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Optional long description.
    pub description: Option<String>,
    /// Unit price; wire records without a price normalize to zero.
    pub unit_price: Price,
    /// Units in stock; wire records without a count normalize to zero.
    pub stock_quantity: u32,
    /// Absolute URL or local asset name.
    pub image: Option<String>,
    /// Category, when the producer assigned one.
    pub category: Option<Category>,
    /// Sales unit, e.g. "piece" or "bag".
    pub unit: Option<String>,
}

/// Where the current catalog contents came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogSource {
    /// Nothing loaded yet.
    Empty,
    /// Loaded from the backend.
    Remote,
    /// Backend unreachable; serving the built-in seed list.
    Fallback,
}

/// The in-memory product catalog.
///
/// Products are held behind `Arc` so cart lines and wishlist entries can
/// keep a handle to the exact product they were created from. When an
/// admin delete or a refresh drops a product from the catalog, those
/// handles keep rendering last-known fields instead of dangling.
#[derive(Debug)]
pub struct ProductCatalog {
    products: Vec<Arc<Product>>,
    source: CatalogSource,
    applied_seq: u64,
}

impl ProductCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            products: Vec::new(),
            source: CatalogSource::Empty,
            applied_seq: 0,
        }
    }

    /// All products in catalog order.
    #[must_use]
    pub fn products(&self) -> &[Arc<Product>] {
        &self.products
    }

    /// Look up a product by ID.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<Arc<Product>> {
        self.products.iter().find(|p| p.id == id).cloned()
    }

    /// Whether a product with this ID is currently in the catalog.
    #[must_use]
    pub fn contains(&self, id: ProductId) -> bool {
        self.products.iter().any(|p| p.id == id)
    }

    /// Number of products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog holds no products.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Where the current contents came from.
    #[must_use]
    pub const fn source(&self) -> CatalogSource {
        self.source
    }

    /// Replace the entire catalog with the result of fetch `seq`.
    ///
    /// Fetches carry monotonic sequence numbers; a response whose sequence
    /// is not newer than the last applied one lost the race to a later
    /// fetch and is discarded. Returns whether the replacement was applied.
    pub fn replace(&mut self, seq: u64, products: Vec<Product>, source: CatalogSource) -> bool {
        if seq <= self.applied_seq {
            debug!(seq, applied = self.applied_seq, "discarding stale catalog fetch");
            return false;
        }
        self.applied_seq = seq;
        self.products = products.into_iter().map(Arc::new).collect();
        self.source = source;
        true
    }

    /// Remove one product (admin delete), keeping the applied sequence.
    ///
    /// Existing cart/wishlist handles to the product stay valid as
    /// last-known snapshots.
    pub fn remove(&mut self, id: ProductId) -> bool {
        let before = self.products.len();
        self.products.retain(|p| p.id != id);
        self.products.len() != before
    }
}

impl Default for ProductCatalog {
    fn default() -> Self {
        Self::new()
    }
}
