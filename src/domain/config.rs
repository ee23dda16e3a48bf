// ============================================================================
// Engine Configuration
// ============================================================================

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Construction parameters for a single-instrument engine.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EngineConfig {
    /// The traded instrument (e.g. "MSFT").
    pub instrument: String,

    /// Boot the engine halted; a `Start` command is then required before
    /// any order is accepted.
    pub start_halted: bool,
}

impl EngineConfig {
    pub fn new(instrument: impl Into<String>) -> Self {
        Self {
            instrument: instrument.into(),
            start_halted: false,
        }
    }

    /// Builder method: boot halted.
    pub fn halted(mut self) -> Self {
        self.start_halted = true;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.instrument.is_empty() {
            return Err("Instrument cannot be empty".to_string());
        }

        Ok(())
    }
}
