use std::path::Path;

use tracing::warn;

use crate::ai::{HybridConfig, MctsConfig};
use crate::arena::ArenaConfig;
use crate::error::ConfigError;
use crate::game::SIZE;

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub hybrid: HybridConfig,
    pub mcts: MctsConfig,
    pub arena: ArenaConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.hybrid.minimax_depth == 0 {
            return Err(ConfigError::Validation(
                "hybrid.minimax_depth must be >= 1".into(),
            ));
        }
        if self.hybrid.empty_threshold > SIZE * SIZE {
            return Err(ConfigError::Validation(format!(
                "hybrid.empty_threshold must be <= {}",
                SIZE * SIZE
            )));
        }
        if self.mcts.simulations == 0 {
            return Err(ConfigError::Validation(
                "mcts.simulations must be >= 1".into(),
            ));
        }
        if self.mcts.exploration.is_nan() || self.mcts.exploration <= 0.0 {
            return Err(ConfigError::Validation(
                "mcts.exploration must be > 0".into(),
            ));
        }
        if self.mcts.rollout_max_moves == 0 {
            return Err(ConfigError::Validation(
                "mcts.rollout_max_moves must be >= 1".into(),
            ));
        }
        if self.arena.games == 0 {
            return Err(ConfigError::Validation("arena.games must be > 0".into()));
        }
        if self.arena.max_turns == 0 {
            return Err(ConfigError::Validation(
                "arena.max_turns must be > 0".into(),
            ));
        }

        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&AppConfig::default()).expect("default config serializes")
    }
}
