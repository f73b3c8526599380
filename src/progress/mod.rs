//! Lesson progress: which lessons are done and which have been seen
//!
//! The unlock engine only talks to the [`CompletionStore`] trait. Hosts pick
//! where the data lives; this crate ships an in-memory store and a SQLite
//! database (`~/.lessons/progress.db`) that loads into and saves from it.
//!
//! # Usage
//!
//! ```ignore
//! let db = ProgressDb::open_default()?;
//! let mut progress = db.load()?;
//!
//! engine.mark_complete("connectToClient", &mut progress);
//! db.save(&progress)?;
//! ```

mod db;
mod memory;

pub use db::ProgressDb;
pub use memory::MemoryStore;

/// Done/seen flags keyed by lesson id
pub trait CompletionStore {
    fn is_done(&self, id: &str) -> bool;

    fn is_seen(&self, id: &str) -> bool;

    /// Mark `id` done. Returns `false` if it already was.
    fn set_done(&mut self, id: &str) -> bool;

    /// Mark `id` seen. Returns `false` if it already was.
    fn set_seen(&mut self, id: &str) -> bool;

    /// Ids whose flags changed since the previous call, oldest first
    fn take_changes(&mut self) -> Vec<String>;
}
