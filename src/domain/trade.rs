// ============================================================================
// Trade Domain Model
// ============================================================================

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use super::OrderId;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Immutable settlement record for a single match.
///
/// The executed price is the aggressor order's limit price, not the resting
/// counterparty's. Trades are created only by the matching sweep and are
/// never mutated or deleted.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Trade {
    /// Unique trade identifier
    pub id: Uuid,

    /// Traded instrument
    pub instrument: String,

    /// Order ID of the buy-side counterparty
    pub bid_order_id: OrderId,

    /// Order ID of the sell-side counterparty
    pub ask_order_id: OrderId,

    /// Execution price
    pub price: Decimal,

    /// Executed quantity
    pub units: i64,

    /// Settlement timestamp
    pub executed_at: DateTime<Utc>,
}

impl Trade {
    pub fn new(
        instrument: String,
        bid_order_id: OrderId,
        ask_order_id: OrderId,
        price: Decimal,
        units: i64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            instrument,
            bid_order_id,
            ask_order_id,
            price,
            units,
            executed_at: Utc::now(),
        }
    }

    /// Notional value of the trade (price * units).
    pub fn notional_value(&self) -> Decimal {
        self.price * Decimal::from(self.units)
    }
}
