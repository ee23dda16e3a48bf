// ============================================================================
// Engine Module
// Contains the command processor and matching logic
// ============================================================================

mod matcher;
mod price_time;

pub mod factory;

pub use factory::{create_from_config, MatcherBuilder};
pub use matcher::Matcher;
pub use price_time::PriceTimePriority;
