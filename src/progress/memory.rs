//! In-memory completion store

use std::collections::BTreeMap;

use chrono::Utc;

use super::CompletionStore;

/// Done/seen flags with the millisecond timestamp each flag was first set
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    done: BTreeMap<String, i64>,
    seen: BTreeMap<String, i64>,
    changes: Vec<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store with the given lessons done as of now (not recorded as changes)
    pub fn with_done<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let now = Utc::now().timestamp_millis();
        let mut store = Self::new();
        for id in ids {
            store.done.insert(id.into(), now);
        }
        store
    }

    pub fn done_at(&self, id: &str) -> Option<i64> {
        self.done.get(id).copied()
    }

    pub fn seen_at(&self, id: &str) -> Option<i64> {
        self.seen.get(id).copied()
    }

    /// All ids with at least one flag set
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        let mut ids: Vec<&str> = self.done.keys().chain(self.seen.keys()).map(String::as_str).collect();
        ids.sort_unstable();
        ids.dedup();
        ids.into_iter()
    }

    pub fn is_empty(&self) -> bool {
        self.done.is_empty() && self.seen.is_empty()
    }

    /// Restore persisted flags without recording them as changes
    pub(crate) fn restore(&mut self, id: String, done_at: Option<i64>, seen_at: Option<i64>) {
        if let Some(at) = done_at {
            self.done.insert(id.clone(), at);
        }
        if let Some(at) = seen_at {
            self.seen.insert(id, at);
        }
    }

    /// Forget every flag
    pub fn clear(&mut self) {
        self.done.clear();
        self.seen.clear();
        self.changes.clear();
    }
}

impl CompletionStore for MemoryStore {
    fn is_done(&self, id: &str) -> bool {
        self.done.contains_key(id)
    }

    fn is_seen(&self, id: &str) -> bool {
        self.seen.contains_key(id)
    }

    fn set_done(&mut self, id: &str) -> bool {
        if self.done.contains_key(id) {
            return false;
        }
        self.done.insert(id.to_string(), Utc::now().timestamp_millis());
        self.changes.push(id.to_string());
        true
    }

    fn set_seen(&mut self, id: &str) -> bool {
        if self.seen.contains_key(id) {
            return false;
        }
        self.seen.insert(id.to_string(), Utc::now().timestamp_millis());
        self.changes.push(id.to_string());
        true
    }

    fn take_changes(&mut self) -> Vec<String> {
        std::mem::take(&mut self.changes)
    }
}
