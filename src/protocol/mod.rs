// ============================================================================
// Protocol Module
// Inbound command set and per-operation result values
// ============================================================================

mod command;
mod error;

pub use command::{
    Command, CommandOutcome, EngineControlResult, GetPriceResult, GetTradesResult,
    PlaceOrderResult,
};
pub use error::RejectReason;
