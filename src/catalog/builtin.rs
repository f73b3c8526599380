//! Built-in lesson catalog shipped with the profiler
//!
//! Ids are persistence keys; never rename them.

use super::definitions::{CategoryDef, ItemDef};
use super::error::RegistryError;
use super::registry::Registry;

pub const ACHIEVEMENTS_INTRO: &str = "achievementsIntro";
pub const CONNECT_TO_CLIENT: &str = "connectToClient";
pub const GLOBAL_SETTINGS: &str = "globalSettings";
pub const SAVE_TRACE: &str = "saveTrace";
pub const LOAD_TRACE: &str = "loadTrace";
pub const INSTRUMENTATION_INTRO: &str = "instrumentationIntro";
pub const HUNDRED_MILLION: &str = "100million";
pub const INSTRUMENTATION_STATISTICS: &str = "instrumentationStatistics";
pub const SAMPLING_INTRO: &str = "samplingIntro";

/// Lesson definitions in declaration order
pub fn item_definitions() -> Vec<ItemDef> {
    vec![
        ItemDef::new(SAMPLING_INTRO, "Sampling program execution"),
        ItemDef::new(HUNDRED_MILLION, "It's over 100 million!"),
        ItemDef::new(INSTRUMENTATION_STATISTICS, "Show me the stats!"),
        ItemDef::new(INSTRUMENTATION_INTRO, "Instrumenting your application")
            .children([HUNDRED_MILLION, INSTRUMENTATION_STATISTICS]),
        ItemDef::new(LOAD_TRACE, "Load a trace"),
        ItemDef::new(SAVE_TRACE, "Save a trace"),
        ItemDef::new(CONNECT_TO_CLIENT, "First profiling session")
            .children([SAVE_TRACE, LOAD_TRACE])
            .unlocks([INSTRUMENTATION_INTRO, SAMPLING_INTRO]),
        ItemDef::new(GLOBAL_SETTINGS, "Global settings"),
        ItemDef::new(ACHIEVEMENTS_INTRO, "Click here to discover achievements!")
            .children([CONNECT_TO_CLIENT, GLOBAL_SETTINGS])
            .highlighted()
            .priority(1),
    ]
}

/// Category definitions in declaration order
pub fn category_definitions() -> Vec<CategoryDef> {
    vec![
        CategoryDef::new("firstSteps", "First steps")
            .items([ACHIEVEMENTS_INTRO])
            .priority(1),
        CategoryDef::new("instrumentation", "Instrumentation").items([INSTRUMENTATION_INTRO]),
        CategoryDef::new("sampling", "Sampling").items([SAMPLING_INTRO]),
    ]
}

impl Registry {
    /// Build the registry from the built-in catalog
    pub fn builtin() -> Result<Self, RegistryError> {
        Self::build(item_definitions(), category_definitions())
    }
}
