//! SQLite persistence for lesson progress
//!
//! Manages the `~/.lessons/progress.db` database. Flags are only ever added:
//! saving keeps the earliest timestamp already on disk.

use std::path::Path;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use rusqlite::Connection;
use tracing::debug;

use super::memory::MemoryStore;
use crate::config::Config;

/// Database wrapper shared between the CLI commands
#[derive(Clone)]
pub struct ProgressDb {
    conn: Arc<Mutex<Connection>>,
}

impl ProgressDb {
    /// Open or create the progress database at the default location (~/.lessons/progress.db)
    pub fn open_default() -> Result<Self> {
        Self::open(&Config::global_config_dir().join("progress.db"))
    }

    /// Open or create the progress database at a specific path
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create progress dir: {}", parent.display()))?;
        }

        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open progress db: {}", path.display()))?;

        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;

        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.init_schema()?;
        Ok(db)
    }

    fn conn(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.conn.lock().expect("Progress DB lock poisoned")
    }

    fn init_schema(&self) -> Result<()> {
        let conn = self.conn();
        conn.execute_batch(SCHEMA_SQL)?;

        let version: i32 = conn
            .query_row("SELECT COALESCE(MAX(version), 0) FROM schema_version", [], |r| r.get(0))
            .unwrap_or(0);

        if version < 1 {
            conn.execute("INSERT OR REPLACE INTO schema_version VALUES (1)", [])?;
        }
        Ok(())
    }

    /// Load every stored flag into a fresh in-memory store
    pub fn load(&self) -> Result<MemoryStore> {
        let conn = self.conn();
        let mut stmt = conn.prepare("SELECT id, done_at, seen_at FROM lesson_progress")?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, Option<i64>>(1)?,
                row.get::<_, Option<i64>>(2)?,
            ))
        })?;

        let mut store = MemoryStore::new();
        for row in rows {
            let (id, done_at, seen_at) = row.context("Failed to read lesson progress row")?;
            store.restore(id, done_at, seen_at);
        }
        debug!("Loaded progress for {} lessons", store.ids().count());
        Ok(store)
    }

    /// Write all flags of `store`. Existing timestamps win over new ones.
    pub fn save(&self, store: &MemoryStore) -> Result<()> {
        let conn = self.conn();
        let tx = conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare(
                r#"
                INSERT INTO lesson_progress (id, done_at, seen_at)
                VALUES (?1, ?2, ?3)
                ON CONFLICT(id) DO UPDATE SET
                    done_at = COALESCE(lesson_progress.done_at, excluded.done_at),
                    seen_at = COALESCE(lesson_progress.seen_at, excluded.seen_at)
                "#,
            )?;
            for id in store.ids() {
                stmt.execute((id, store.done_at(id), store.seen_at(id)))?;
            }
        }
        tx.commit().context("Failed to commit lesson progress")?;
        Ok(())
    }

    /// Delete all lesson progress
    pub fn reset_all(&self) -> Result<()> {
        let conn = self.conn();
        conn.execute("DELETE FROM lesson_progress", [])?;
        Ok(())
    }
}

const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER PRIMARY KEY
);

-- One row per lesson with at least one flag set
CREATE TABLE IF NOT EXISTS lesson_progress (
    id TEXT PRIMARY KEY,
    done_at INTEGER,
    seen_at INTEGER
);
"#;
