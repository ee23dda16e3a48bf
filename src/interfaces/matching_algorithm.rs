// ============================================================================
// Matching Algorithm Interface
// Defines the contract for the matching sweep
// ============================================================================

use crate::domain::{OrderBookSide, RestingOrder, Trade};

/// Strategy seam for the matching sweep run once per accepted aggressor.
pub trait MatchingAlgorithm: Send + Sync {
    /// Sweep `opposite_side` for counterparties crossing the aggressor's
    /// limit. Every trade is handed to `on_trade` at the moment it is
    /// recorded, not batched after the sweep.
    fn match_order(
        &self,
        aggressor: &RestingOrder,
        opposite_side: &OrderBookSide,
        on_trade: &mut dyn FnMut(Trade),
    );

    /// Algorithm name for logging
    fn name(&self) -> &str;
}
