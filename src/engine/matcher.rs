// ============================================================================
// Matcher
// Command processor for a single-instrument engine
// ============================================================================

use crate::domain::{
    EngineState, Order, OrderBook, OrderId, StateTransition, Trade,
};
use crate::interfaces::{MatchingAlgorithm, Notifier};
use crate::protocol::{
    Command, CommandOutcome, EngineControlResult, GetPriceResult, GetTradesResult,
    PlaceOrderResult, RejectReason,
};
use parking_lot::RwLock;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

/// Single-instrument command processor.
///
/// Commands are expected to arrive one at a time (the transport's ordering
/// discipline); every command is fully resolved, matching and notification
/// included, before the result is returned.
pub struct Matcher {
    /// Traded instrument (e.g. "MSFT")
    instrument: String,

    /// Resting orders, both sides, full audit history
    book: OrderBook,

    /// Matching sweep strategy
    algorithm: Box<dyn MatchingAlgorithm>,

    /// Outbound notification port
    notifier: Arc<dyn Notifier>,

    /// Active/Halted flag, stored as the state machine's u8 repr
    state: AtomicU8,

    /// Settlement history, append-only
    trades: RwLock<Vec<Trade>>,

    /// Every accepted order by id, for settlement-history lookups
    orders: RwLock<HashMap<OrderId, Arc<Order>>>,
}

impl Matcher {
    pub fn new(
        instrument: String,
        algorithm: Box<dyn MatchingAlgorithm>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            instrument,
            book: OrderBook::new(),
            algorithm,
            notifier,
            state: AtomicU8::new(EngineState::Active as u8),
            trades: RwLock::new(Vec::new()),
            orders: RwLock::new(HashMap::new()),
        }
    }

    /// Dispatch a command to its handler. Exhaustive over the command set.
    pub fn handle(&self, command: Command) -> CommandOutcome {
        match command {
            Command::PlaceBid { order } => CommandOutcome::Place(self.place_bid(order)),
            Command::PlaceAsk { order } => CommandOutcome::Place(self.place_ask(order)),
            Command::GetPrice { instrument } => CommandOutcome::Price(self.get_price(&instrument)),
            Command::GetTrades { instrument } => {
                CommandOutcome::Trades(self.get_trades(&instrument))
            },
            Command::Start { instrument } => CommandOutcome::Control(self.start(&instrument)),
            Command::Halt { instrument } => CommandOutcome::Control(self.halt(&instrument)),
        }
    }

    /// Place a buy order. The order's own side governs matching; the paired
    /// entry points mirror the inbound command set.
    pub fn place_bid(&self, order: Order) -> PlaceOrderResult {
        self.place(order)
    }

    /// Place a sell order.
    pub fn place_ask(&self, order: Order) -> PlaceOrderResult {
        self.place(order)
    }

    /// Resume trading. Idempotent; rejects only on instrument mismatch.
    pub fn start(&self, instrument: &str) -> EngineControlResult {
        if instrument != self.instrument {
            return EngineControlResult::rejected(RejectReason::InstrumentMismatch);
        }

        self.apply_transition(StateTransition::Start);
        tracing::debug!(instrument, "engine started");
        EngineControlResult::accepted()
    }

    /// Suspend order placement. Idempotent; rejects only on instrument
    /// mismatch. Queries stay available while halted.
    pub fn halt(&self, instrument: &str) -> EngineControlResult {
        if instrument != self.instrument {
            return EngineControlResult::rejected(RejectReason::InstrumentMismatch);
        }

        self.apply_transition(StateTransition::Halt);
        tracing::debug!(instrument, "engine halted");
        EngineControlResult::accepted()
    }

    /// Current best bid and ask. Succeeds only when both sides hold at
    /// least one eligible resting order.
    pub fn get_price(&self, instrument: &str) -> GetPriceResult {
        if instrument != self.instrument {
            return GetPriceResult::rejected(RejectReason::InstrumentMismatch);
        }

        let bid = self.book.best_bid();
        let ask = self.book.best_ask();

        match (bid, ask) {
            (Some(bid), Some(ask)) => GetPriceResult::available(bid, ask),
            _ => GetPriceResult::unavailable(bid, ask),
        }
    }

    /// Settled trades as the counterparties' original submitted orders, in
    /// settlement order: per trade the ask-side order, then the bid-side.
    pub fn get_trades(&self, instrument: &str) -> GetTradesResult {
        if instrument != self.instrument {
            return GetTradesResult::rejected(RejectReason::InstrumentMismatch);
        }

        let orders = self.orders.read();
        let trades = self.trades.read();

        let mut settled = Vec::with_capacity(trades.len() * 2);
        for trade in trades.iter() {
            if let Some(ask) = orders.get(&trade.ask_order_id) {
                settled.push((**ask).clone());
            }
            if let Some(bid) = orders.get(&trade.bid_order_id) {
                settled.push((**bid).clone());
            }
        }

        GetTradesResult::with_orders(settled)
    }

    pub fn instrument(&self) -> &str {
        &self.instrument
    }

    pub fn state(&self) -> EngineState {
        EngineState::from_u8(self.state.load(Ordering::Acquire))
    }

    pub fn best_bid(&self) -> Option<Decimal> {
        self.book.best_bid()
    }

    pub fn best_ask(&self) -> Option<Decimal> {
        self.book.best_ask()
    }

    /// Settlement history snapshot, in execution order.
    pub fn trades(&self) -> Vec<Trade> {
        self.trades.read().clone()
    }

    pub fn book(&self) -> &OrderBook {
        &self.book
    }

    // ========================================================================
    // Private methods
    // ========================================================================

    fn place(&self, order: Order) -> PlaceOrderResult {
        // Pre-command quote, captured before validation so a rejected order
        // can never produce a price change.
        let pre_bid = self.book.best_bid();
        let pre_ask = self.book.best_ask();

        if let Err(reason) = self.validate(&order) {
            tracing::debug!(order = %order, %reason, "order rejected");
            return PlaceOrderResult::rejected(reason);
        }

        let order = Arc::new(order);
        self.orders
            .write()
            .insert(order.id.clone(), Arc::clone(&order));
        let resting = self.book.insert(Arc::clone(&order));

        tracing::debug!(order = %order, algorithm = self.algorithm.name(), "order accepted");
        self.notifier.order_placed(&order);

        let opposite_side = self.book.opposite_side(order.side);
        self.algorithm
            .match_order(&resting, opposite_side, &mut |trade| {
                tracing::info!(
                    bid = %trade.bid_order_id,
                    ask = %trade.ask_order_id,
                    units = trade.units,
                    price = %trade.price,
                    "trade settled"
                );
                self.trades.write().push(trade.clone());
                self.notifier.trade_settled(&trade);
            });

        let post_bid = self.book.best_bid();
        let post_ask = self.book.best_ask();
        if post_bid != pre_bid || post_ask != pre_ask {
            self.notifier
                .price_changed(&self.instrument, post_bid, post_ask);
        }

        PlaceOrderResult::accepted()
    }

    /// Short-circuit validation chain; the first failure wins.
    fn validate(&self, order: &Order) -> Result<(), RejectReason> {
        if order.instrument != self.instrument {
            return Err(RejectReason::InstrumentMismatch);
        }

        if !self.state().is_active() {
            return Err(RejectReason::EngineHalted {
                instrument: self.instrument.clone(),
            });
        }

        if order.units <= 0 || order.price <= Decimal::ZERO {
            return Err(RejectReason::InvalidOrder {
                units: order.units,
                price: order.price,
            });
        }

        Ok(())
    }

    fn apply_transition(&self, transition: StateTransition) {
        let next = self.state().apply(transition);
        self.state.store(next as u8, Ordering::Release);
    }
}


#[cfg(test)]
mod conservation {
    use super::*;
    use crate::engine::PriceTimePriority;
    use crate::interfaces::NoOpNotifier;
    use proptest::prelude::*;

    #[derive(Debug, Clone)]
    struct PlacedOrder {
        is_bid: bool,
        units: i64,
        price_cents: i64,
    }

    fn placed_order() -> impl Strategy<Value = PlacedOrder> {
        (any::<bool>(), 1i64..=20, 9900i64..=10100).prop_map(|(is_bid, units, price_cents)| {
            PlacedOrder {
                is_bid,
                units,
                price_cents,
            }
        })
    }

    proptest! {
        /// Total traded units per order never exceed its submitted units,
        /// and every remaining quantity in the book stays non-negative.
        #[test]
        fn traded_units_never_exceed_submitted(orders in proptest::collection::vec(placed_order(), 1..40)) {
            let matcher = Matcher::new(
                "MSFT".to_string(),
                Box::new(PriceTimePriority::new()),
                Arc::new(NoOpNotifier),
            );

            let mut submitted: HashMap<OrderId, i64> = HashMap::new();

            for (i, o) in orders.iter().enumerate() {
                let id = format!("order-{}", i);
                let price = Decimal::new(o.price_cents, 2);
                let order = if o.is_bid {
                    Order::bid(id.clone(), "MSFT", o.units, price)
                } else {
                    Order::ask(id.clone(), "MSFT", o.units, price)
                };
                submitted.insert(OrderId::new(id), o.units);
                let result = if o.is_bid {
                    matcher.place_bid(order)
                } else {
                    matcher.place_ask(order)
                };
                prop_assert!(result.success);
            }

            let mut traded: HashMap<OrderId, i64> = HashMap::new();
            for trade in matcher.trades() {
                prop_assert!(trade.units > 0);
                *traded.entry(trade.bid_order_id.clone()).or_default() += trade.units;
                *traded.entry(trade.ask_order_id.clone()).or_default() += trade.units;
            }

            for (id, units) in traded {
                prop_assert!(units <= submitted[&id], "order {} overtraded", id);
            }
        }
    }
}
