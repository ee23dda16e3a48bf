// ============================================================================
// Trading Engine Library
// Single-instrument continuous double-auction matching core
// ============================================================================

//! # Trading Engine
//!
//! An in-memory continuous double-auction matching core for one tradable
//! instrument.
//!
//! ## Features
//!
//! - **Limit order book** partitioned by side, ordered by price and
//!   submission time (strict FIFO at equal price)
//! - **Immediate matching** of price-crossing orders, settled at the
//!   aggressor's limit price
//! - **Partial fills** with the remainder resting for future matching
//! - **Active/Halted state machine** gating order placement
//! - **Notification port** for order-placed, trade-settled, and
//!   price-changed events
//!
//! State is purely in-memory; nothing survives a restart. Transport,
//! subscriber wiring, and persistence are the embedding process's concern.
//!
//! ## Example
//!
//! ```rust
//! use trading_engine::prelude::*;
//! use rust_decimal::Decimal;
//! use std::sync::Arc;
//!
//! let matcher = Matcher::new(
//!     "MSFT".to_string(),
//!     Box::new(PriceTimePriority::new()),
//!     Arc::new(NoOpNotifier),
//! );
//!
//! matcher.place_ask(Order::ask("1", "MSFT", 50, Decimal::new(9900, 2)));
//! matcher.place_bid(Order::bid("2", "MSFT", 100, Decimal::new(10000, 2)));
//!
//! // The bid swept the resting ask at its own limit price.
//! let trades = matcher.trades();
//! assert_eq!(trades.len(), 1);
//! assert_eq!(trades[0].units, 50);
//! assert_eq!(trades[0].price, Decimal::new(10000, 2));
//!
//! // 50 of the 100 bid units rest as the new best bid.
//! let quote = matcher.get_price("MSFT");
//! assert_eq!(quote.bid, Some(Decimal::new(10000, 2)));
//! ```

pub mod domain;
pub mod engine;
pub mod interfaces;
pub mod protocol;

// Re-exports for convenience
pub mod prelude {
    pub use crate::domain::{
        EngineConfig, EngineState, Order, OrderBook, OrderBookSide, OrderId, RestingOrder, Side,
        StateTransition, Trade,
    };
    pub use crate::engine::{create_from_config, Matcher, MatcherBuilder, PriceTimePriority};
    pub use crate::interfaces::{
        CollectingNotifier, LoggingNotifier, MarketEvent, MatchingAlgorithm, NoOpNotifier,
        Notifier,
    };
    pub use crate::protocol::{
        Command, CommandOutcome, EngineControlResult, GetPriceResult, GetTradesResult,
        PlaceOrderResult, RejectReason,
    };
}
