//! Host-side wiring: registry, engine and persisted progress in one place

use std::sync::Arc;

use anyhow::Result;
use tracing::{info, warn};

use crate::catalog::{Item, Registry, RegistryError};
use crate::config::Config;
use crate::engine::UnlockEngine;
use crate::progress::{CompletionStore, MemoryStore, ProgressDb};

/// Built-in lessons plus the user's saved progress
pub struct LessonSession {
    engine: UnlockEngine,
    db: ProgressDb,
    progress: MemoryStore,
}

impl LessonSession {
    /// Open the built-in catalog with the configured progress database.
    ///
    /// Returns `Ok(None)` when the catalog fails validation: the lesson
    /// feature is then disabled instead of taking the host down.
    pub fn open(config: &Config) -> Result<Option<Self>> {
        Self::open_with(config, Registry::builtin())
    }

    pub fn open_with(config: &Config, registry: Result<Registry, RegistryError>) -> Result<Option<Self>> {
        let registry = match registry {
            Ok(registry) => registry,
            Err(e) => {
                warn!("Lessons disabled: {}", e);
                return Ok(None);
            }
        };

        let engine = UnlockEngine::new(Arc::new(registry))
            .with_parent_completion(config.settings.parent_completion);
        let db = ProgressDb::open(&config.database_path())?;
        let progress = db.load()?;

        Ok(Some(Self {
            engine,
            db,
            progress,
        }))
    }

    pub fn engine(&self) -> &UnlockEngine {
        &self.engine
    }

    pub fn progress(&self) -> &MemoryStore {
        &self.progress
    }

    /// Complete a lesson, persist, and return the ids it unlocked
    pub fn complete(&mut self, id: &str) -> Result<Vec<String>> {
        let unlocked: Vec<String> = self
            .engine
            .mark_complete(id, &mut self.progress)
            .into_iter()
            .map(|item| item.id.clone())
            .collect();
        self.flush()?;
        Ok(unlocked)
    }

    /// Clear the "new" badge of a lesson and persist
    pub fn seen(&mut self, id: &str) -> Result<bool> {
        let changed = self.engine.mark_seen(id, &mut self.progress);
        self.flush()?;
        Ok(changed)
    }

    /// Clear every visible badge and persist
    pub fn seen_all(&mut self) -> Result<usize> {
        let count = self.engine.mark_all_seen(&mut self.progress);
        self.flush()?;
        Ok(count)
    }

    pub fn lookup(&self, id: &str) -> Result<&Item, RegistryError> {
        self.engine.registry().resolve_item(id)
    }

    /// Delete all saved progress
    pub fn reset(&mut self) -> Result<()> {
        self.db.reset_all()?;
        self.progress.clear();
        info!("Lesson progress reset");
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        let changes = self.progress.take_changes();
        if changes.is_empty() {
            return Ok(());
        }
        self.db.save(&self.progress)?;
        tracing::debug!("Saved progress for {} changed lessons", changes.len());
        Ok(())
    }
}
