// ============================================================================
// Notifier Interface
// Outbound port for broadcasting domain events
// ============================================================================

use parking_lot::Mutex;
use rust_decimal::Decimal;

use crate::domain::{Order, Trade};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Events broadcast to external subscribers. Never delivered to the direct
/// caller of the triggering command; results are.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MarketEvent {
    /// An order passed validation and was inserted, whether or not it
    /// subsequently matched. Carries the submitted order unmodified.
    OrderPlaced { order: Order },

    /// Units changed hands.
    TradeSettled { trade: Trade },

    /// The best bid or best ask moved. Either side may be absent.
    PriceChanged {
        instrument: String,
        bid: Option<Decimal>,
        ask: Option<Decimal>,
    },
}

/// Notification capability injected into the command processor, one method
/// per event kind. Wiring actual subscribers is the transport's job.
pub trait Notifier: Send + Sync {
    fn order_placed(&self, order: &Order);

    fn trade_settled(&self, trade: &Trade);

    fn price_changed(&self, instrument: &str, bid: Option<Decimal>, ask: Option<Decimal>);
}

/// No-op notifier for testing
pub struct NoOpNotifier;

impl Notifier for NoOpNotifier {
    fn order_placed(&self, _order: &Order) {}

    fn trade_settled(&self, _trade: &Trade) {}

    fn price_changed(&self, _instrument: &str, _bid: Option<Decimal>, _ask: Option<Decimal>) {}
}

/// Notifier that emits structured log records
pub struct LoggingNotifier;

impl Notifier for LoggingNotifier {
    fn order_placed(&self, order: &Order) {
        tracing::info!(order = %order, "order placed");
    }

    fn trade_settled(&self, trade: &Trade) {
        tracing::info!(
            bid = %trade.bid_order_id,
            ask = %trade.ask_order_id,
            units = trade.units,
            price = %trade.price,
            "trade settled"
        );
    }

    fn price_changed(&self, instrument: &str, bid: Option<Decimal>, ask: Option<Decimal>) {
        tracing::info!(instrument, ?bid, ?ask, "price changed");
    }
}

/// Records every event in emission order. Used by tests to assert the
/// notification policy; also handy as a diagnostic tap.
#[derive(Default)]
pub struct CollectingNotifier {
    events: Mutex<Vec<MarketEvent>>,
}

impl CollectingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<MarketEvent> {
        self.events.lock().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }
}

impl Notifier for CollectingNotifier {
    fn order_placed(&self, order: &Order) {
        self.events.lock().push(MarketEvent::OrderPlaced {
            order: order.clone(),
        });
    }

    fn trade_settled(&self, trade: &Trade) {
        self.events.lock().push(MarketEvent::TradeSettled {
            trade: trade.clone(),
        });
    }

    fn price_changed(&self, instrument: &str, bid: Option<Decimal>, ask: Option<Decimal>) {
        self.events.lock().push(MarketEvent::PriceChanged {
            instrument: instrument.to_string(),
            bid,
            ask,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noop_notifier() {
        let notifier = NoOpNotifier;
        notifier.order_placed(&Order::bid("1", "MSFT", 10, Decimal::new(9999, 2)));
        notifier.price_changed("MSFT", Some(Decimal::new(9999, 2)), None);
        // Should not panic
    }

    #[test]
    fn test_collecting_notifier_preserves_order() {
        let notifier = CollectingNotifier::new();
        let order = Order::bid("1", "MSFT", 10, Decimal::new(9999, 2));

        notifier.order_placed(&order);
        notifier.price_changed("MSFT", Some(order.price), None);

        let events = notifier.events();
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], MarketEvent::OrderPlaced { .. }));
        assert!(matches!(events[1], MarketEvent::PriceChanged { .. }));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_event_serializes() {
        let event = MarketEvent::PriceChanged {
            instrument: "MSFT".to_string(),
            bid: Some(Decimal::new(9999, 2)),
            ask: None,
        };

        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("PriceChanged"));
    }
}
