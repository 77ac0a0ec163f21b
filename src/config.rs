//! Underbar Configuration
//!
//! Handles parsing and management of underbar.toml configuration files.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the configuration file searched for by [`UnderbarConfig::find_and_load`].
pub const CONFIG_FILE_NAME: &str = "underbar.toml";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Config file not found: {0}")]
    NotFound(String),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Root configuration structure matching underbar.toml.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct UnderbarConfig {
    /// Timer thread used by `delay`
    #[serde(default)]
    pub scheduler: SchedulerConfig,

    /// Randomness for `shuffle`
    #[serde(default)]
    pub shuffle: ShuffleConfig,
}

impl UnderbarConfig {
    /// Read `path` as an underbar config.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|err| match err.kind() {
            std::io::ErrorKind::NotFound => ConfigError::NotFound(path.display().to_string()),
            _ => ConfigError::Io(err),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// [`find_and_load`](Self::find_and_load) starting at the working directory.
    pub fn load_from_cwd() -> ConfigResult<Self> {
        Self::find_and_load(&std::env::current_dir()?)
    }

    /// Load the nearest `underbar.toml` in `start_dir` or its ancestors.
    /// With no such file, the defaults.
    pub fn find_and_load(start_dir: &Path) -> ConfigResult<Self> {
        match Self::locate(start_dir) {
            Some(path) => Self::load(&path),
            None => Ok(Self::default()),
        }
    }

    /// Path of the nearest `underbar.toml` in `start_dir` or its ancestors.
    pub fn locate(start_dir: &Path) -> Option<PathBuf> {
        start_dir
            .ancestors()
            .map(|dir| dir.join(CONFIG_FILE_NAME))
            .find(|candidate| candidate.is_file())
    }

    /// Write this config to `path` as TOML.
    pub fn save(&self, path: &Path) -> ConfigResult<()> {
        std::fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }
}

/// Timer thread settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Name given to the timer thread
    #[serde(default = "default_thread_name")]
    pub thread_name: String,

    /// Maximum jobs waiting to fire (0 = unbounded)
    #[serde(default)]
    pub max_pending: usize,
}

fn default_thread_name() -> String {
    "underbar-timer".to_string()
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            thread_name: default_thread_name(),
            max_pending: 0,
        }
    }
}

/// Shuffle randomness settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShuffleConfig {
    /// Fixed seed for reproducible shuffles
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl ShuffleConfig {
    /// A generator seeded from `seed`, or from OS entropy when unset.
    pub fn rng(&self) -> ChaCha8Rng {
        match self.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        }
    }
}
