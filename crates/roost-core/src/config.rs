//! Configuration loading and typed config structures.
//!
//! The configuration lives in `roost-config.yaml`. Every field has a
//! default matching the classic game (15x15 board, first to 50 segments,
//! one tick every 200 ms), so an empty or missing file is valid.
//!
//! ```yaml
//! game:
//!   grid_size: 15
//!   winning_score: 50
//!   tick_interval_ms: 200
//!   seed: 42            # omit for OS entropy
//! spawn:
//!   player: { x: 7, y: 7, heading: right }
//!   ai: { x: 3, y: 3, heading: left }
//! runner:
//!   max_ticks: 0        # 0 = unlimited
//!   exit_on_game_over: false
//! logging:
//!   level: info
//! ```

use std::path::Path;

use roost_types::{Heading, Position};
use serde::Deserialize;

use crate::grid::{MAX_GRID_SIZE, MIN_GRID_SIZE};

/// Shortest accepted tick interval.
pub const MIN_TICK_INTERVAL_MS: u64 = 10;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// The configuration parsed but holds unusable values.
    #[error("invalid configuration: {reason}")]
    Invalid {
        /// Explanation of what is wrong with the configuration.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RoostConfig {
    /// Board and rule parameters.
    #[serde(default)]
    pub game: GameConfig,

    /// Where and facing which way the chickens start.
    #[serde(default)]
    pub spawn: SpawnConfig,

    /// Session runner bounds.
    #[serde(default)]
    pub runner: RunnerConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl RoostConfig {
    /// Load and validate configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::Invalid`] if a value is out of range.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse and validate configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML, or
    /// [`ConfigError::Invalid`] if a value is out of range.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] describing the first bad value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.game.validate()
    }
}

/// Board and rule parameters.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GameConfig {
    /// Side length of the square board. Sets the wrap modulus and the
    /// item spawn bounds.
    #[serde(default = "default_grid_size")]
    pub grid_size: u32,

    /// Body length at which a chicken wins.
    #[serde(default = "default_winning_score")]
    pub winning_score: u32,

    /// Real-time milliseconds between ticks.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// Random seed for item spawns and the AI. `None` draws from the OS.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: default_grid_size(),
            winning_score: default_winning_score(),
            tick_interval_ms: default_tick_interval_ms(),
            seed: None,
        }
    }
}

impl GameConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_GRID_SIZE..=MAX_GRID_SIZE).contains(&self.grid_size) {
            return Err(ConfigError::Invalid {
                reason: format!(
                    "game.grid_size must be between {MIN_GRID_SIZE} and {MAX_GRID_SIZE}, got {}",
                    self.grid_size
                ),
            });
        }
        if self.winning_score == 0 {
            return Err(ConfigError::Invalid {
                reason: "game.winning_score must be at least 1".to_owned(),
            });
        }
        if self.tick_interval_ms < MIN_TICK_INTERVAL_MS {
            return Err(ConfigError::Invalid {
                reason: format!(
                    "game.tick_interval_ms must be at least {MIN_TICK_INTERVAL_MS}, got {}",
                    self.tick_interval_ms
                ),
            });
        }
        Ok(())
    }
}

/// Starting cells and headings for both chickens.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SpawnConfig {
    /// Human-controlled chicken.
    #[serde(default = "default_player_start")]
    pub player: StartConfig,

    /// AI-controlled chicken.
    #[serde(default = "default_ai_start")]
    pub ai: StartConfig,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            player: default_player_start(),
            ai: default_ai_start(),
        }
    }
}

/// One chicken's starting cell and heading.
///
/// Coordinates are wrapped onto the board, so they stay valid on any
/// grid size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct StartConfig {
    /// Starting column.
    pub x: i32,
    /// Starting row.
    pub y: i32,
    /// Starting heading.
    pub heading: Heading,
}

impl StartConfig {
    /// The starting cell before wrapping.
    pub const fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }
}

/// Session runner bounds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RunnerConfig {
    /// Stop after this many resolved ticks (0 = unlimited).
    #[serde(default)]
    pub max_ticks: u64,

    /// Stop the runner as soon as a game ends instead of waiting for a
    /// restart command.
    #[serde(default)]
    pub exit_on_game_over: bool,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions
// ---------------------------------------------------------------------------

const fn default_grid_size() -> u32 {
    15
}

const fn default_winning_score() -> u32 {
    50
}

const fn default_tick_interval_ms() -> u64 {
    200
}

const fn default_player_start() -> StartConfig {
    StartConfig {
        x: 7,
        y: 7,
        heading: Heading::Right,
    }
}

const fn default_ai_start() -> StartConfig {
    StartConfig {
        x: 3,
        y: 3,
        heading: Heading::Left,
    }
}

fn default_log_level() -> String {
    "info".to_owned()
}
