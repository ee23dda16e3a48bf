// ============================================================================
// Matcher Factory
// Creates configured engine instances
// ============================================================================

use crate::domain::EngineConfig;
use crate::engine::{Matcher, PriceTimePriority};
use crate::interfaces::Notifier;
use std::sync::Arc;

/// Creates a matcher from configuration.
///
/// # Example
/// ```
/// use trading_engine::prelude::*;
/// use std::sync::Arc;
///
/// let config = EngineConfig::new("MSFT");
/// let matcher = create_from_config(config, Arc::new(NoOpNotifier)).unwrap();
/// assert_eq!(matcher.instrument(), "MSFT");
/// ```
pub fn create_from_config(
    config: EngineConfig,
    notifier: Arc<dyn Notifier>,
) -> Result<Matcher, String> {
    config.validate()?;

    let matcher = Matcher::new(
        config.instrument.clone(),
        Box::new(PriceTimePriority::new()),
        notifier,
    );

    if config.start_halted {
        matcher.halt(&config.instrument);
    }

    Ok(matcher)
}

/// Fluent builder over [`EngineConfig`].
///
/// # Example
/// ```
/// use trading_engine::prelude::*;
/// use std::sync::Arc;
///
/// let matcher = MatcherBuilder::new("MSFT")
///     .build(Arc::new(NoOpNotifier))
///     .unwrap();
/// ```
pub struct MatcherBuilder {
    config: EngineConfig,
}

impl MatcherBuilder {
    pub fn new(instrument: impl Into<String>) -> Self {
        Self {
            config: EngineConfig::new(instrument),
        }
    }

    /// Boot the engine halted; a `Start` command opens trading.
    pub fn halted(mut self) -> Self {
        self.config = self.config.halted();
        self
    }

    pub fn build(self, notifier: Arc<dyn Notifier>) -> Result<Matcher, String> {
        create_from_config(self.config, notifier)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}
