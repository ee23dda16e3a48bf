// ============================================================================
// Rejection Reasons
// Closed taxonomy for recoverable command failures
// ============================================================================

use rust_decimal::Decimal;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Why a command was rejected. Every failure is local and recoverable; the
/// engine stays usable after any rejection.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RejectReason {
    /// The command targeted a different instrument than this engine trades.
    InstrumentMismatch,
    /// Order placement attempted while the engine is halted.
    EngineHalted { instrument: String },
    /// Non-positive price or non-positive quantity.
    InvalidOrder { units: i64, price: Decimal },
    /// A price query while either book side has no eligible resting order.
    PriceUnavailable,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::InstrumentMismatch => write!(f, "instrument mismatch"),
            RejectReason::EngineHalted { instrument } => {
                write!(f, "engine halted for instrument {}", instrument)
            },
            RejectReason::InvalidOrder { units, price } => {
                write!(f, "{} units at price {} is not valid", units, price)
            },
            RejectReason::PriceUnavailable => write!(f, "price unavailable"),
        }
    }
}

impl std::error::Error for RejectReason {}
