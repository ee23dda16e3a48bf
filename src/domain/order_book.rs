// ============================================================================
// Order Book Domain Model
// ============================================================================

use crossbeam_skiplist::SkipMap;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use super::{Order, RestingOrder, Side};

// ============================================================================
// Book Key
// ============================================================================

/// Composite sort key: price-major, submission-sequence-minor.
///
/// Ask keys carry the scaled price directly so forward iteration yields the
/// lowest ask first; bid keys negate it so forward iteration yields the
/// highest bid first. Within a price, the lower sequence number comes first,
/// which makes equal-price ordering strict FIFO.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct BookKey {
    price_key: i64,
    sequence: u64,
}

/// Prices are keyed at micro-unit precision.
const PRICE_KEY_SCALE: i64 = 1_000_000;

fn price_to_key(side: Side, price: Decimal) -> i64 {
    let scaled = (price * Decimal::from(PRICE_KEY_SCALE))
        .to_i64()
        .unwrap_or(i64::MAX);

    match side {
        Side::Bid => -scaled,
        Side::Ask => scaled,
    }
}

// ============================================================================
// Order Book Side
// ============================================================================

/// One side of the book: a price-time ordered map of every resting order
/// ever accepted on that side. Entries are never removed; filled orders are
/// retained for audit and skipped by the eligibility filters.
pub struct OrderBookSide {
    entries: SkipMap<BookKey, Arc<RestingOrder>>,
    side: Side,
}

impl OrderBookSide {
    pub fn new(side: Side) -> Self {
        Self {
            entries: SkipMap::new(),
            side,
        }
    }

    pub fn side(&self) -> Side {
        self.side
    }

    fn insert(&self, resting: Arc<RestingOrder>, sequence: u64) {
        let key = BookKey {
            price_key: price_to_key(self.side, resting.price()),
            sequence,
        };
        self.entries.insert(key, resting);
    }

    /// Best eligible price on this side: the highest bid or the lowest ask.
    /// `None` when no order with remaining quantity rests here.
    pub fn best_price(&self) -> Option<Decimal> {
        self.entries
            .iter()
            .find(|entry| entry.value().is_eligible())
            .map(|entry| entry.value().price())
    }

    /// Eligible counterparties crossing `limit`, best price first, FIFO
    /// within a price level.
    pub fn crossing(&self, limit: Decimal) -> Vec<Arc<RestingOrder>> {
        self.entries
            .iter()
            .take_while(|entry| match self.side {
                Side::Bid => entry.value().price() >= limit,
                Side::Ask => entry.value().price() <= limit,
            })
            .filter(|entry| entry.value().is_eligible())
            .map(|entry| Arc::clone(entry.value()))
            .collect()
    }

    /// Total resting entries, filled ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ============================================================================
// Order Book
// ============================================================================

/// Side-partitioned book for a single instrument. A shared sequence counter
/// stamps every insertion with its arrival order.
pub struct OrderBook {
    bids: OrderBookSide,
    asks: OrderBookSide,
    sequence: AtomicU64,
}

impl OrderBook {
    pub fn new() -> Self {
        Self {
            bids: OrderBookSide::new(Side::Bid),
            asks: OrderBookSide::new(Side::Ask),
            sequence: AtomicU64::new(0),
        }
    }

    /// Wrap `order` as a resting order and insert it under the next
    /// submission sequence. Returns the book-resident handle.
    pub fn insert(&self, order: Arc<Order>) -> Arc<RestingOrder> {
        let resting = Arc::new(RestingOrder::new(order));
        let sequence = self.sequence.fetch_add(1, Ordering::AcqRel);
        self.side(resting.side()).insert(Arc::clone(&resting), sequence);
        resting
    }

    pub fn best_bid(&self) -> Option<Decimal> {
        self.bids.best_price()
    }

    pub fn best_ask(&self) -> Option<Decimal> {
        self.asks.best_price()
    }

    /// Eligible asks priced at or below `max_price`, best first.
    pub fn eligible_asks(&self, max_price: Decimal) -> Vec<Arc<RestingOrder>> {
        self.asks.crossing(max_price)
    }

    /// Eligible bids priced at or above `min_price`, best first.
    pub fn eligible_bids(&self, min_price: Decimal) -> Vec<Arc<RestingOrder>> {
        self.bids.crossing(min_price)
    }

    pub fn side(&self, side: Side) -> &OrderBookSide {
        match side {
            Side::Bid => &self.bids,
            Side::Ask => &self.asks,
        }
    }

    pub fn opposite_side(&self, side: Side) -> &OrderBookSide {
        self.side(side.opposite())
    }

    /// Total resting entries on both sides, filled ones included.
    pub fn resting_count(&self) -> usize {
        self.bids.len() + self.asks.len()
    }
}

impl Default for OrderBook {
    fn default() -> Self {
        Self::new()
    }
}
