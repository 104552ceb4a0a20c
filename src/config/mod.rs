//! # Configuration Management Module
//!
//! TOML configuration for the gridventure binary: where session snapshots are
//! stored and how logging is set up.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use gridventure::config::Config;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     // Write a starter file, then read it back
//!     Config::create_default("config.toml").await?;
//!     let config = Config::load("config.toml").await?;
//!
//!     println!("Sessions stored in: {}", config.game.data_dir);
//!     Ok(())
//! }
//! ```
//!
//! ## Configuration File Format
//!
//! ```toml
//! [game]
//! data_dir = "./data"
//! store = "json"   # json | sled | memory
//!
//! [logging]
//! level = "info"
//! file = "gridventure.log"
//! ```

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use tokio::fs;

/// Which [`SnapshotStore`](crate::storage::SnapshotStore) backs the sessions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    #[default]
    Json,
    Sled,
    Memory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    pub data_dir: String,
    #[serde(default)]
    pub store: StoreKind,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            data_dir: "./data".to_string(),
            store: StoreKind::Json,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    #[serde(default)]
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: Some("gridventure.log".to_string()),
        }
    }
}

impl LoggingConfig {
    /// Parsed level; unknown names fall back to `Info`.
    pub fn level_filter(&self) -> log::LevelFilter {
        self.level.parse().unwrap_or(log::LevelFilter::Info)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub game: GameConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a file
    pub async fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| anyhow!("Failed to read config file {}: {}", path, e))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| anyhow!("Failed to parse config file {}: {}", path, e))?;

        config.validate()?;
        Ok(config)
    }

    /// Create a default configuration file
    pub async fn create_default(path: &str) -> Result<()> {
        let config = Config::default();
        let content = toml::to_string_pretty(&config)
            .map_err(|e| anyhow!("Failed to serialize default config: {}", e))?;

        fs::write(path, content)
            .await
            .map_err(|e| anyhow!("Failed to write config file {}: {}", path, e))?;

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.game.store != StoreKind::Memory && self.game.data_dir.trim().is_empty() {
            return Err(anyhow!("game.data_dir must be set for the {:?} store", self.game.store));
        }
        if self.logging.level.parse::<log::LevelFilter>().is_err() {
            return Err(anyhow!("logging.level '{}' is not a log level", self.logging.level));
        }
        Ok(())
    }
}
