//! Match configuration.
//!
//! Sessions configure a match at creation time with a `GameConfig`.
//! It can be built in code, or loaded from TOML:
//!
//! ```toml
//! board_size = 5
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::board::grid::validate_size;
use crate::error::ConfigError;

/// Default board side, the classic 5×5 Quixo board.
pub const DEFAULT_BOARD_SIZE: usize = 5;

/// Configuration for a new match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Side length N of the playable grid (3..=32).
    pub board_size: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: DEFAULT_BOARD_SIZE,
        }
    }
}

impl GameConfig {
    /// Set the board side length.
    #[must_use]
    pub fn with_board_size(mut self, size: usize) -> Self {
        self.board_size = size;
        self
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_size(self.board_size).map(|_| ())
    }

    /// Parse and validate TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}
