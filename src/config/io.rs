//! Configuration file I/O operations

use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use fs2::FileExt;
use tracing::debug;

use super::Config;

impl Config {
    /// Get the global config directory path (~/.lessons/)
    pub fn global_config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".lessons")
    }

    /// Get the global config file path (~/.lessons/config.toml)
    pub fn global_config_path() -> PathBuf {
        Self::global_config_dir().join("config.toml")
    }

    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Load `path` if it exists, defaults otherwise
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::from_file(path)
    }
}

/// Documented config written by `lessons init`
pub const DEFAULT_CONFIG: &str = r#"# Lessons configuration
# =====================

[settings]
# What happens to a lesson with sub-lessons once all of them are done:
#   "explicit"           - the parent lesson must be completed on its own (default)
#   "when_children_done" - the parent is completed together with its last sub-lesson
parent_completion = "explicit"

# Where lesson progress is stored (default: ~/.lessons/progress.db)
# database = "/path/to/progress.db"
"#;

impl Config {
    /// Write the documented default config to `path`.
    ///
    /// Concurrent writers are serialized on a sibling `.lock` file. Unless
    /// `overwrite` is set, an existing file is kept and reported as an error.
    pub fn write_default(path: &Path, overwrite: bool) -> Result<()> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create config directory: {}", dir.display()))?;
        }

        let lock_path = path.with_extension("lock");
        let lock = File::create(&lock_path)
            .with_context(|| format!("Failed to create lock file: {}", lock_path.display()))?;
        lock.lock_exclusive()
            .with_context(|| format!("Failed to lock {}", lock_path.display()))?;

        if !overwrite && path.exists() {
            bail!("Configuration already exists: {}", path.display());
        }

        let staged = path.with_extension("toml.new");
        std::fs::write(&staged, DEFAULT_CONFIG)
            .with_context(|| format!("Failed to write {}", staged.display()))?;
        std::fs::rename(&staged, path)
            .with_context(|| format!("Failed to move config into place: {}", path.display()))?;

        debug!("Wrote default config to {}", path.display());
        Ok(())
    }
}
