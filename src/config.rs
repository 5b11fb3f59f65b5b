//! Engine configuration loaded from TOML.
//!
//! ```toml
//! strategy = "monte_carlo"
//!
//! [minimax]
//! max_depth = 4
//! pruning = true
//!
//! [mcts]
//! time_budget_secs = 1.5
//! max_iterations = 20000
//! ```
//!
//! Every key is optional and falls back to its default.

use crate::error::ConfigError;
use crate::mcts::MctsConfig;
use crate::minimax::MinimaxConfig;
use crate::strategy::Strategy;
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

/// Which engine answers move requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    #[default]
    Minimax,
    MonteCarlo,
    Random,
}

/// All knobs of the move selector.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub strategy: StrategyKind,
    pub minimax: MinimaxConfig,
    pub mcts: MctsConfig,
}

impl EngineConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = toml::from_str(content)?;
        config.validate()?;
        debug!(?config, "parsed engine config");
        Ok(config)
    }

    /// Reads, parses and validates the TOML file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        info!("Loaded engine config from {}", path.display());
        Ok(config)
    }

    /// Rejects knobs the engines cannot honour.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let budget = self.mcts.time_budget_secs;
        if !budget.is_finite() || budget < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "mcts.time_budget_secs must be a non-negative number, got {budget}"
            )));
        }
        Ok(())
    }

    /// The strategy selected by this configuration, carrying the matching knobs.
    pub fn strategy(&self) -> Strategy {
        match self.strategy {
            StrategyKind::Minimax => Strategy::Minimax(self.minimax),
            StrategyKind::MonteCarlo => Strategy::MonteCarlo(self.mcts),
            StrategyKind::Random => Strategy::Random,
        }
    }
}
