// ============================================================================
// Interfaces Module
// Contains all trait definitions and contracts
// ============================================================================

mod matching_algorithm;
mod notifier;

pub use matching_algorithm::MatchingAlgorithm;
pub use notifier::{CollectingNotifier, LoggingNotifier, MarketEvent, NoOpNotifier, Notifier};
