//! Order history: an append-only log of completed checkouts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use minimart_core::{OrderId, OrderStatus, Price, ProductId};

use super::cart::CartLine;

/// Shipping details captured at checkout. All fields required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingInfo {
    pub recipient_name: String,
    pub address: String,
    pub phone: String,
}

/// One line of a recorded order: an owned snapshot, not a catalog handle.
///
/// The cart is cleared right after checkout, so the record must own every
/// field it will ever display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: Price,
    pub quantity: u32,
    pub image: Option<String>,
    pub unit: Option<String>,
}

impl OrderLine {
    /// Deep-copy a cart line into an order line.
    #[must_use]
    pub fn from_cart_line(line: &CartLine) -> Self {
        Self {
            product_id: line.product.id,
            name: line.product.name.clone(),
            unit_price: line.product.unit_price,
            quantity: line.quantity,
            image: line.product.image.clone(),
            unit: line.product.unit.clone(),
        }
    }

    /// Line total at the price captured at checkout.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.unit_price.times(self.quantity)
    }
}

/// A completed order. Immutable once created - financial record semantics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub created_at: DateTime<Utc>,
    pub lines: Vec<OrderLine>,
    /// Computed at checkout; never recomputed from the lines.
    pub total: Price,
    pub shipping: ShippingInfo,
    /// `Confirmed` when the backend accepted the order, `PendingSync` when
    /// it was recorded locally during an outage.
    pub status: OrderStatus,
}

/// Append-only order log, listed newest first.
#[derive(Debug, Default)]
pub struct OrderHistoryStore {
    orders: Vec<Order>,
}

impl OrderHistoryStore {
    /// Create an empty history.
    #[must_use]
    pub const fn new() -> Self {
        Self { orders: Vec::new() }
    }

    /// Record a completed checkout.
    ///
    /// Generates a fresh order ID and timestamp; the caller supplies the
    /// already-snapshotted lines and the total computed at checkout.
    /// Returns the created order.
    pub fn record(
        &mut self,
        lines: Vec<OrderLine>,
        total: Price,
        shipping: ShippingInfo,
        status: OrderStatus,
    ) -> Order {
        let order = Order {
            id: OrderId::generate(),
            created_at: Utc::now(),
            lines,
            total,
            shipping,
            status,
        };
        // Newest first; listing is then a plain slice, stable across calls.
        self.orders.insert(0, order.clone());
        order
    }

    /// The full history, newest first.
    #[must_use]
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// Number of recorded orders.
    #[must_use]
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    /// Whether no orders have been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::dec;

    use minimart_core::CurrencyCode;

    use super::*;

    fn shipping() -> ShippingInfo {
        ShippingInfo {
            recipient_name: "Nguyen Van A".to_string(),
            address: "1 Le Loi".to_string(),
            phone: "0900000000".to_string(),
        }
    }

    fn line(id: i32, quantity: u32) -> OrderLine {
        OrderLine {
            product_id: ProductId::new(id),
            name: format!("Item {id}"),
            unit_price: Price::new(dec!(10_000), CurrencyCode::VND),
            quantity,
            image: None,
            unit: None,
        }
    }

    #[test]
    fn record_appends_newest_first() {
        let mut history = OrderHistoryStore::new();
        let first = history
            .record(vec![line(1, 1)], Price::zero(), shipping(), OrderStatus::Confirmed)
            .id;
        let second = history
            .record(vec![line(2, 1)], Price::zero(), shipping(), OrderStatus::Confirmed)
            .id;

        assert_eq!(history.len(), 2);
        assert_eq!(history.orders()[0].id, second);
        assert_eq!(history.orders()[1].id, first);
    }

    #[test]
    fn listing_is_stable_across_calls() {
        let mut history = OrderHistoryStore::new();
        history.record(vec![line(1, 1)], Price::zero(), shipping(), OrderStatus::Confirmed);
        history.record(vec![line(2, 2)], Price::zero(), shipping(), OrderStatus::PendingSync);

        let first_pass: Vec<OrderId> = history.orders().iter().map(|o| o.id).collect();
        let second_pass: Vec<OrderId> = history.orders().iter().map(|o| o.id).collect();
        assert_eq!(first_pass, second_pass);
    }

    #[test]
    fn total_is_the_value_captured_at_checkout() {
        let mut history = OrderHistoryStore::new();
        // Deliberately different from the line sum: the store must not
        // recompute.
        let order = history.record(
            vec![line(1, 3)],
            Price::new(dec!(25_000), CurrencyCode::VND),
            shipping(),
            OrderStatus::Confirmed,
        );
        assert_eq!(order.total.amount, dec!(25_000));
    }
}
