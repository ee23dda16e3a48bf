// ============================================================================
// Command Protocol
// Closed inbound command set and typed results
// ============================================================================

use rust_decimal::Decimal;

use crate::domain::Order;

use super::RejectReason;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ============================================================================
// Commands
// ============================================================================

/// The full inbound command set. The handler set is fixed at compile time;
/// dispatch over this enum is exhaustive.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Command {
    /// Place a bid (buy) order
    PlaceBid { order: Order },

    /// Place an ask (sell) order
    PlaceAsk { order: Order },

    /// Query the current best bid and ask price
    GetPrice { instrument: String },

    /// Query settled trades as the counterparty orders, in settlement order
    GetTrades { instrument: String },

    /// Resume trading
    Start { instrument: String },

    /// Suspend order placement
    Halt { instrument: String },
}

// ============================================================================
// Results
// ============================================================================

/// Result of a `PlaceBid`/`PlaceAsk` command.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlaceOrderResult {
    pub success: bool,
    pub reason: Option<RejectReason>,
}

impl PlaceOrderResult {
    pub fn accepted() -> Self {
        Self {
            success: true,
            reason: None,
        }
    }

    pub fn rejected(reason: RejectReason) -> Self {
        Self {
            success: false,
            reason: Some(reason),
        }
    }
}

/// Result of a `Start`/`Halt` command.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EngineControlResult {
    pub success: bool,
    pub reason: Option<RejectReason>,
}

impl EngineControlResult {
    pub fn accepted() -> Self {
        Self {
            success: true,
            reason: None,
        }
    }

    pub fn rejected(reason: RejectReason) -> Self {
        Self {
            success: false,
            reason: Some(reason),
        }
    }
}

/// Result of a `GetPrice` command. On failure whichever single side has an
/// eligible resting order is still reported.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GetPriceResult {
    pub success: bool,
    pub reason: Option<RejectReason>,
    pub bid: Option<Decimal>,
    pub ask: Option<Decimal>,
}

impl GetPriceResult {
    /// Both sides quoted.
    pub fn available(bid: Decimal, ask: Decimal) -> Self {
        Self {
            success: true,
            reason: None,
            bid: Some(bid),
            ask: Some(ask),
        }
    }

    /// At least one side has no eligible resting order.
    pub fn unavailable(bid: Option<Decimal>, ask: Option<Decimal>) -> Self {
        Self {
            success: false,
            reason: Some(RejectReason::PriceUnavailable),
            bid,
            ask,
        }
    }

    pub fn rejected(reason: RejectReason) -> Self {
        Self {
            success: false,
            reason: Some(reason),
            bid: None,
            ask: None,
        }
    }
}

/// Result of a `GetTrades` command: for every settled trade, in settlement
/// order, the two counterparties' original submitted orders (ask-side order
/// first, then bid-side). An order that traded N times appears N times.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GetTradesResult {
    pub success: bool,
    pub reason: Option<RejectReason>,
    pub orders: Vec<Order>,
}

impl GetTradesResult {
    pub fn with_orders(orders: Vec<Order>) -> Self {
        Self {
            success: true,
            reason: None,
            orders,
        }
    }

    pub fn rejected(reason: RejectReason) -> Self {
        Self {
            success: false,
            reason: Some(reason),
            orders: Vec::new(),
        }
    }
}

/// Union of all command results, returned by the exhaustive dispatch.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CommandOutcome {
    Place(PlaceOrderResult),
    Control(EngineControlResult),
    Price(GetPriceResult),
    Trades(GetTradesResult),
}
