//! Settings configuration types

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::engine::ParentCompletion;

/// General settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Whether finishing every sub-lesson also completes the parent lesson
    #[serde(default)]
    pub parent_completion: ParentCompletion,

    /// Override for the progress database path (default: ~/.lessons/progress.db)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<PathBuf>,
}
