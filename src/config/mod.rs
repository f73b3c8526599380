//! Configuration loading and management

mod io;
mod settings;

pub use io::DEFAULT_CONFIG;
pub use settings::Settings;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Main configuration structure (`~/.lessons/config.toml`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// General settings
    #[serde(default)]
    pub settings: Settings,
}

impl Config {
    /// Progress database location, honoring the `database` override
    pub fn database_path(&self) -> PathBuf {
        self.settings
            .database
            .clone()
            .unwrap_or_else(|| Self::global_config_dir().join("progress.db"))
    }
}
