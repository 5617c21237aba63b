//! The shopping cart.

use std::sync::Arc;

use minimart_core::{Price, ProductId};

use crate::catalog::Product;

use super::orders::OrderLine;

/// One cart line: a product handle and how many of it.
///
/// The handle is shared with the catalog; if the product is later deleted
/// there, the line keeps rendering from last-known fields and every
/// quantity control keeps working.
#[derive(Debug, Clone)]
pub struct CartLine {
    /// Handle into the catalog (or the last-known product after deletion).
    pub product: Arc<Product>,
    /// Always at least 1; removal is a separate explicit action.
    pub quantity: u32,
}

impl CartLine {
    /// Line total at the current quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.product.unit_price.times(self.quantity)
    }
}

/// The cart: at most one line per product ID, in insertion order.
#[derive(Debug, Default)]
pub struct CartStore {
    lines: Vec<CartLine>,
    is_open: bool,
}

impl CartStore {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            lines: Vec::new(),
            is_open: false,
        }
    }

    /// Add `quantity` of a product (clamped to at least 1).
    ///
    /// If a line for the product already exists its quantity is
    /// incremented; the cart never holds two lines for one product.
    pub fn add(&mut self, product: Arc<Product>, quantity: u32) {
        let quantity = quantity.max(1);
        if let Some(line) = self.lines.iter_mut().find(|l| l.product.id == product.id) {
            line.quantity = line.quantity.saturating_add(quantity);
        } else {
            self.lines.push(CartLine { product, quantity });
        }
    }

    /// Set an existing line's quantity, flooring at 1.
    ///
    /// Decrementing to zero keeps the line at quantity 1 - removal is the
    /// explicit [`CartStore::remove`]. No-op when the product is absent.
    pub fn set_quantity(&mut self, id: ProductId, quantity: u32) {
        if let Some(line) = self.lines.iter_mut().find(|l| l.product.id == id) {
            line.quantity = quantity.max(1);
        }
    }

    /// Remove a line entirely, whatever its quantity. No-op when absent.
    pub fn remove(&mut self, id: ProductId) {
        self.lines.retain(|l| l.product.id != id);
    }

    /// Empty the cart (called after checkout).
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Current lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Whether the cart holds no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of `unit_price * quantity` over all lines.
    #[must_use]
    pub fn total_price(&self) -> Price {
        self.lines
            .iter()
            .fold(Price::zero(), |acc, line| acc.plus(line.line_total()))
    }

    /// Sum of quantities over all lines.
    #[must_use]
    pub fn total_items(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Whether the cart drawer is open. UI state, not business logic, but
    /// other components branch on it.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.is_open
    }

    /// Toggle the cart drawer.
    pub fn toggle_open(&mut self) {
        self.is_open = !self.is_open;
    }

    /// Deep-copy the lines for an order record.
    ///
    /// The copies own their data, so clearing or mutating the cart
    /// afterwards cannot touch the recorded order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<OrderLine> {
        self.lines.iter().map(OrderLine::from_cart_line).collect()
    }
}
