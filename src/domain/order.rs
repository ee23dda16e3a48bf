// ============================================================================
// Order Domain Model
// ============================================================================

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ============================================================================
// Value Objects
// ============================================================================

/// Caller-assigned order identifier. Uniqueness is the caller's contract.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OrderId(String);

impl OrderId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for OrderId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for OrderId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Side {
    Bid,
    Ask,
}

impl Side {
    pub fn opposite(&self) -> Side {
        match self {
            Side::Bid => Side::Ask,
            Side::Ask => Side::Bid,
        }
    }

    pub fn is_bid(&self) -> bool {
        matches!(self, Side::Bid)
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Bid => f.write_str("Bid"),
            Side::Ask => f.write_str("Ask"),
        }
    }
}

// ============================================================================
// Order Entity
// ============================================================================

/// Immutable submitted order intent. Never mutated after submission; the
/// book-side fill state lives on [`RestingOrder`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Order {
    pub id: OrderId,
    pub instrument: String,
    pub side: Side,
    /// Limit price in unit currency.
    pub price: Decimal,
    /// Submitted quantity. Signed so that non-positive submissions are
    /// representable and can be rejected by validation.
    pub units: i64,
    pub submitted_at: DateTime<Utc>,
}

impl Order {
    pub fn new(
        id: impl Into<OrderId>,
        instrument: impl Into<String>,
        side: Side,
        units: i64,
        price: Decimal,
    ) -> Self {
        Self {
            id: id.into(),
            instrument: instrument.into(),
            side,
            price,
            units,
            submitted_at: Utc::now(),
        }
    }

    /// Convenience constructor for a buy order.
    pub fn bid(
        id: impl Into<OrderId>,
        instrument: impl Into<String>,
        units: i64,
        price: Decimal,
    ) -> Self {
        Self::new(id, instrument, Side::Bid, units, price)
    }

    /// Convenience constructor for a sell order.
    pub fn ask(
        id: impl Into<OrderId>,
        instrument: impl Into<String>,
        units: i64,
        price: Decimal,
    ) -> Self {
        Self::new(id, instrument, Side::Ask, units, price)
    }

    pub fn is_bid(&self) -> bool {
        self.side.is_bid()
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} order {}: {} {} units @ {}",
            self.side, self.id, self.instrument, self.units, self.price
        )
    }
}

// ============================================================================
// Resting Order
// ============================================================================

/// Book-resident wrapper around an accepted order.
///
/// Owned exclusively by the order book. `remaining_units` starts at the
/// submitted quantity, is decremented only by the matching sweep, and never
/// goes below zero. Filled entries stay in the book for audit but are no
/// longer eligible for matching.
#[derive(Debug)]
pub struct RestingOrder {
    order: Arc<Order>,
    remaining_units: AtomicI64,
}

impl RestingOrder {
    pub fn new(order: Arc<Order>) -> Self {
        let remaining = order.units;
        Self {
            order,
            remaining_units: AtomicI64::new(remaining),
        }
    }

    pub fn order(&self) -> &Arc<Order> {
        &self.order
    }

    pub fn id(&self) -> &OrderId {
        &self.order.id
    }

    pub fn side(&self) -> Side {
        self.order.side
    }

    pub fn price(&self) -> Decimal {
        self.order.price
    }

    pub fn remaining_units(&self) -> i64 {
        self.remaining_units.load(Ordering::Acquire)
    }

    pub fn is_filled(&self) -> bool {
        self.remaining_units() == 0
    }

    /// Eligible for matching: some quantity still unfilled.
    pub fn is_eligible(&self) -> bool {
        self.remaining_units() > 0
    }

    /// Atomically consume `units` from the remainder.
    /// Returns false if fewer than `units` remain; the counter never goes
    /// negative.
    pub fn fill(&self, units: i64) -> bool {
        loop {
            let current = self.remaining_units.load(Ordering::Acquire);
            if current < units {
                return false;
            }

            let next = current - units;

            if self
                .remaining_units
                .compare_exchange(current, next, Ordering::AcqRel, Ordering::Acquire)
                .is_ok()
            {
                return true;
            }
            // CAS lost, retry
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn price(p: i64, scale: u32) -> Decimal {
        Decimal::new(p, scale)
    }

    #[test]
    fn test_order_creation() {
        let order = Order::bid("1", "MSFT", 100, price(9999, 2));

        assert_eq!(order.id, OrderId::new("1"));
        assert_eq!(order.side, Side::Bid);
        assert_eq!(order.units, 100);
        assert_eq!(order.price, price(9999, 2));
        assert!(order.is_bid());
    }

    #[test]
    fn test_order_display() {
        let order = Order::ask("7", "MSFT", 50, price(9900, 2));
        assert_eq!(order.to_string(), "Ask order 7: MSFT 50 units @ 99.00");
    }

    #[test]
    fn test_side_opposite() {
        assert_eq!(Side::Bid.opposite(), Side::Ask);
        assert_eq!(Side::Ask.opposite(), Side::Bid);
    }

    #[test]
    fn test_resting_order_fill() {
        let resting = RestingOrder::new(Arc::new(Order::ask("1", "MSFT", 10, price(9999, 2))));

        assert!(resting.fill(3));
        assert_eq!(resting.remaining_units(), 7);
        assert!(resting.is_eligible());

        assert!(resting.fill(7));
        assert_eq!(resting.remaining_units(), 0);
        assert!(resting.is_filled());
        assert!(!resting.is_eligible());
    }

    #[test]
    fn test_overfill_protection() {
        let resting = RestingOrder::new(Arc::new(Order::ask("1", "MSFT", 5, price(9999, 2))));

        assert!(!resting.fill(10));
        assert_eq!(resting.remaining_units(), 5);
    }
}
