use std::path::Path;
use std::time::Duration;

use log::warn;
use rand::rngs::StdRng;

use crate::board::Player;
use crate::error::ConfigError;
use crate::search::{Searcher, DEFAULT_DEPTH};

/// Where the terminal game looks for its configuration by default
pub const DEFAULT_CONFIG_PATH: &str = "connect4.toml";

/// The deepest search the configuration accepts
pub const MAX_DEPTH: usize = 12;

/// Game configuration, loadable from TOML.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Config {
    /// Plies the computer looks ahead
    pub search_depth: usize,
    /// Seed for the computer's tie-breaks; OS entropy when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Pause before the computer's move is shown, in milliseconds
    pub think_delay_ms: u64,
    pub computer_first: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            search_depth: DEFAULT_DEPTH,
            seed: None,
            think_delay_ms: 300,
            computer_first: false,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!("config file '{}' not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.search_depth == 0 {
            return Err(ConfigError::Validation(
                "search_depth must be > 0".into(),
            ));
        }
        if self.search_depth > MAX_DEPTH {
            return Err(ConfigError::Validation(format!(
                "search_depth must be at most {}",
                MAX_DEPTH
            )));
        }
        Ok(())
    }

    pub fn first_player(&self) -> Player {
        if self.computer_first {
            Player::Computer
        } else {
            Player::Human
        }
    }

    pub fn think_delay(&self) -> Duration {
        Duration::from_millis(self.think_delay_ms)
    }

    /// Builds the computer opponent described by this configuration
    pub fn searcher(&self) -> Searcher<StdRng> {
        match self.seed {
            Some(seed) => Searcher::seeded(self.search_depth, seed),
            None => Searcher::new(self.search_depth),
        }
    }
}
