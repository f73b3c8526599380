//! Lessons - unlockable tutorial achievements for the profiler
//!
//! Lessons are short tasks grouped into categories. Completing a lesson
//! reveals its sub-lessons and any lessons it unlocks in other categories;
//! categories open once they are unlocked by their prerequisite lessons.
//!
//! ## Layers
//!
//! 1. **Catalog**: lesson and category definitions, validated once into an
//!    immutable [`catalog::Registry`].
//! 2. **Engine**: [`engine::UnlockEngine`] derives visibility, unlock and
//!    "new" decisions from a completion state.
//! 3. **Progress**: the [`progress::CompletionStore`] trait plus an in-memory
//!    store and its SQLite persistence.
//! 4. **Presentation**: content handles are drawn by a
//!    [`present::ContentRenderer`] supplied by the host.

pub mod catalog;
pub mod config;
pub mod engine;
pub mod present;
pub mod progress;
pub mod session;

pub use catalog::{Category, Item, Registry, RegistryError};
pub use engine::{ParentCompletion, UnlockEngine};
pub use progress::{CompletionStore, MemoryStore};
pub use session::LessonSession;
