// ============================================================================
// Price/Time Priority Matching Algorithm (FIFO)
// ============================================================================

use crate::domain::{OrderBookSide, RestingOrder, Side, Trade};
use crate::interfaces::MatchingAlgorithm;

/// Price/Time priority matching.
///
/// Counterparties are consumed best price first; at equal price the earliest
/// submitted matches first. The executed price is always the aggressor's
/// limit price, not the resting counterparty's.
///
/// # Example
/// ```text
/// Book:  Ask 10 units @ 99.99 (order A, first)
///        Ask 10 units @ 99.99 (order B, second)
///
/// Incoming: Bid 15 units @ 99.99
/// Result: 10 units with A, then 5 units with B, both at 99.99
/// ```
#[derive(Debug, Default)]
pub struct PriceTimePriority;

impl PriceTimePriority {
    pub fn new() -> Self {
        Self
    }
}

impl MatchingAlgorithm for PriceTimePriority {
    fn match_order(
        &self,
        aggressor: &RestingOrder,
        opposite_side: &OrderBookSide,
        on_trade: &mut dyn FnMut(Trade),
    ) {
        let limit = aggressor.price();

        for counterparty in opposite_side.crossing(limit) {
            let aggressor_remaining = aggressor.remaining_units();
            if aggressor_remaining == 0 {
                break; // Aggressor fully filled
            }

            let counterparty_remaining = counterparty.remaining_units();
            if counterparty_remaining == 0 {
                continue; // Filled since the sweep snapshot was taken
            }

            let units = aggressor_remaining.min(counterparty_remaining);

            if !(counterparty.fill(units) && aggressor.fill(units)) {
                continue;
            }

            let (bid_order_id, ask_order_id) = match aggressor.side() {
                Side::Bid => (aggressor.id().clone(), counterparty.id().clone()),
                Side::Ask => (counterparty.id().clone(), aggressor.id().clone()),
            };

            // Executed at the aggressor's limit price.
            let trade = Trade::new(
                aggressor.order().instrument.clone(),
                bid_order_id,
                ask_order_id,
                limit,
                units,
            );

            on_trade(trade);
        }
    }

    fn name(&self) -> &str {
        "PriceTime"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Order, OrderBook};
    use rust_decimal::Decimal;
    use std::sync::Arc;

    fn price(p: i64) -> Decimal {
        Decimal::new(p, 2)
    }

    fn sweep(book: &OrderBook, aggressor: &RestingOrder) -> Vec<Trade> {
        let algo = PriceTimePriority::new();
        let mut trades = Vec::new();
        algo.match_order(aggressor, book.opposite_side(aggressor.side()), &mut |t| {
            trades.push(t)
        });
        trades
    }

    #[test]
    fn test_exact_cross() {
        let book = OrderBook::new();
        let ask = book.insert(Arc::new(Order::ask("1", "MSFT", 10, price(9999))));
        let bid = book.insert(Arc::new(Order::bid("2", "MSFT", 10, price(9999))));

        let trades = sweep(&book, &bid);

        assert_eq!(trades.len(), 1);
        assert_eq!(trades[0].bid_order_id, *bid.id());
        assert_eq!(trades[0].ask_order_id, *ask.id());
        assert_eq!(trades[0].units, 10);
        assert_eq!(trades[0].price, price(9999));
        assert_eq!(ask.remaining_units(), 0);
        assert_eq!(bid.remaining_units(), 0);
    }

    #[test]
    fn test_fifo_at_equal_price() {
        let book = OrderBook::new();
        book.insert(Arc::new(Order::ask("first", "MSFT", 10, price(9999))));
        book.insert(Arc::new(Order::ask("second", "MSFT", 10, price(9999))));
        let bid = book.insert(Arc::new(Order::bid("b", "MSFT", 15, price(9999))));

        let trades = sweep(&book, &bid);

        assert_eq!(trades.len(), 2);
        assert_eq!(trades[0].ask_order_id.as_str(), "first");
        assert_eq!(trades[0].units, 10);
        assert_eq!(trades[1].ask_order_id.as_str(), "second");
        assert_eq!(trades[1].units, 5);
        assert_eq!(bid.remaining_units(), 0);
    }

    #[test]
    fn test_executed_price_is_aggressor_limit() {
        let book = OrderBook::new();
        book.insert(Arc::new(Order::ask("1", "MSFT", 10, price(9900))));
        let bid = book.insert(Arc::new(Order::bid("2", "MSFT", 10, price(10000))));

        let trades = sweep(&book, &bid);

        assert_eq!(trades.len(), 1);
        // The resting ask was 99.00 but settlement is at the bid's 100.00.
        assert_eq!(trades[0].price, price(10000));
    }

    #[test]
    fn test_no_cross_leaves_book_untouched() {
        let book = OrderBook::new();
        let ask = book.insert(Arc::new(Order::ask("1", "MSFT", 10, price(10100))));
        let bid = book.insert(Arc::new(Order::bid("2", "MSFT", 10, price(10000))));

        let trades = sweep(&book, &bid);

        assert!(trades.is_empty());
        assert_eq!(ask.remaining_units(), 10);
        assert_eq!(bid.remaining_units(), 10);
    }

    #[test]
    fn test_aggressor_sweeps_multiple_price_levels() {
        let book = OrderBook::new();
        book.insert(Arc::new(Order::ask("cheap", "MSFT", 5, price(9900))));
        book.insert(Arc::new(Order::ask("mid", "MSFT", 5, price(9950))));
        book.insert(Arc::new(Order::ask("expensive", "MSFT", 5, price(10100))));
        let bid = book.insert(Arc::new(Order::bid("b", "MSFT", 20, price(10000))));

        let trades = sweep(&book, &bid);

        assert_eq!(trades.len(), 2);
        assert_eq!(trades[0].ask_order_id.as_str(), "cheap");
        assert_eq!(trades[1].ask_order_id.as_str(), "mid");
        // 10 of 20 units rest; the 101.00 ask does not cross.
        assert_eq!(bid.remaining_units(), 10);
    }

    #[test]
    fn test_ask_aggressor_consumes_best_bid_first() {
        let book = OrderBook::new();
        book.insert(Arc::new(Order::bid("low", "MSFT", 10, price(9900))));
        book.insert(Arc::new(Order::bid("high", "MSFT", 10, price(10000))));
        let ask = book.insert(Arc::new(Order::ask("a", "MSFT", 10, price(9900))));

        let trades = sweep(&book, &ask);

        assert_eq!(trades.len(), 1);
        assert_eq!(trades[0].bid_order_id.as_str(), "high");
        assert_eq!(trades[0].price, price(9900));
        assert_eq!(ask.remaining_units(), 0);
    }
}
