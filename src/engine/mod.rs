//! Unlock engine: turns completion state into visibility decisions
//!
//! The engine holds no state of its own. Every query recomputes visibility
//! from the registry and the [`CompletionStore`] it is handed, so the answer
//! only ever depends on the current done flags.
//!
//! A lesson is visible when any of these holds:
//! - it is a root lesson of an unlocked category,
//! - it is a child of a visible lesson that is done,
//! - it is named in the `unlocks` list of a done lesson.
//!
//! A category with explicit prerequisites unlocks once all of them are done.
//! A category gated by derived prerequisites unlocks together with the first
//! of its root lessons that becomes visible, so a visible root never sits in
//! a locked category.

mod visibility;

#[cfg(test)]
mod tests;

pub use visibility::Visibility;

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::catalog::{Category, Item, ItemId, Registry};
use crate::progress::CompletionStore;
use visibility::category_tree;

/// What happens to a parent lesson when its sub-lessons are finished
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParentCompletion {
    /// The parent has its own lesson and must be completed on its own
    #[default]
    Explicit,
    /// The parent is completed as soon as every child is done
    WhenChildrenDone,
}

impl ParentCompletion {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Explicit => "explicit",
            Self::WhenChildrenDone => "when_children_done",
        }
    }
}

impl fmt::Display for ParentCompletion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Visibility and unlock decisions over a shared registry
#[derive(Debug, Clone)]
pub struct UnlockEngine {
    registry: Arc<Registry>,
    parent_completion: ParentCompletion,
}

impl UnlockEngine {
    pub fn new(registry: Arc<Registry>) -> Self {
        Self {
            registry,
            parent_completion: ParentCompletion::default(),
        }
    }

    pub fn with_parent_completion(mut self, policy: ParentCompletion) -> Self {
        self.parent_completion = policy;
        self
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn parent_completion(&self) -> ParentCompletion {
        self.parent_completion
    }

    // ========================================
    // QUERIES
    // ========================================

    /// Visibility of every lesson and category for `state`
    pub fn visibility<S>(&self, state: &S) -> Visibility
    where
        S: CompletionStore + ?Sized,
    {
        Visibility::compute(&self.registry, state)
    }

    pub fn is_item_visible<S>(&self, item: &Item, state: &S) -> bool
    where
        S: CompletionStore + ?Sized,
    {
        self.visibility(state).is_item_visible(item.handle)
    }

    pub fn is_item_complete<S>(&self, item: &Item, state: &S) -> bool
    where
        S: CompletionStore + ?Sized,
    {
        state.is_done(&item.id)
    }

    /// Whether the category is shown, according to its [`Gate`](crate::catalog::Gate)
    pub fn is_category_unlocked<S>(&self, category: &Category, state: &S) -> bool
    where
        S: CompletionStore + ?Sized,
    {
        self.visibility(state).is_category_unlocked(category.handle)
    }

    /// True if every lesson in the category, sub-lessons included, is done
    pub fn is_category_complete<S>(&self, category: &Category, state: &S) -> bool
    where
        S: CompletionStore + ?Sized,
    {
        category_tree(&self.registry, category)
            .iter()
            .all(|item| state.is_done(&item.id))
    }

    /// Unlocked categories, highest priority first
    pub fn visible_categories<S>(&self, state: &S) -> Vec<&Category>
    where
        S: CompletionStore + ?Sized,
    {
        let visibility = self.visibility(state);
        self.registry
            .categories()
            .filter(|category| visibility.is_category_unlocked(category.handle))
            .collect()
    }

    /// Visible root lessons of a category
    pub fn visible_items<S>(&self, category: &Category, state: &S) -> Vec<&Item>
    where
        S: CompletionStore + ?Sized,
    {
        let visibility = self.visibility(state);
        self.select_visible(category.items(), &visibility)
    }

    /// Visible sub-lessons of `item`
    pub fn visible_children<S>(&self, item: &Item, state: &S) -> Vec<&Item>
    where
        S: CompletionStore + ?Sized,
    {
        let visibility = self.visibility(state);
        self.select_visible(item.children(), &visibility)
    }

    /// Lessons hidden under `prev` and visible under `new`.
    ///
    /// A lesson can appear without its own flags changing, so this compares
    /// visibility rather than done-sets.
    pub fn newly_unlocked_since<P, N>(&self, prev: &P, new: &N) -> Vec<&Item>
    where
        P: CompletionStore + ?Sized,
        N: CompletionStore + ?Sized,
    {
        self.diff(&self.visibility(prev), &self.visibility(new))
    }

    /// Visible lessons that have not been seen yet
    pub fn new_items<S>(&self, state: &S) -> Vec<&Item>
    where
        S: CompletionStore + ?Sized,
    {
        let visibility = self.visibility(state);
        visibility
            .visible_items()
            .map(|handle| self.registry.item(handle))
            .filter(|item| !state.is_seen(&item.id))
            .collect()
    }

    /// Whether anything visible still carries a "new" badge
    pub fn needs_attention<S>(&self, state: &S) -> bool
    where
        S: CompletionStore + ?Sized,
    {
        !self.new_items(state).is_empty()
    }

    /// Whether any visible lesson of the category is still unseen
    pub fn category_needs_attention<S>(&self, category: &Category, state: &S) -> bool
    where
        S: CompletionStore + ?Sized,
    {
        let visibility = self.visibility(state);
        category_tree(&self.registry, category)
            .iter()
            .any(|item| visibility.is_item_visible(item.handle) && !state.is_seen(&item.id))
    }

    // ========================================
    // STATE CHANGES
    // ========================================

    /// Mark a lesson done and return the lessons this made visible.
    ///
    /// Completing an already-done lesson changes nothing. Children are never
    /// completed; parents only under [`ParentCompletion::WhenChildrenDone`].
    pub fn mark_complete<S>(&self, id: &str, state: &mut S) -> Vec<&Item>
    where
        S: CompletionStore + ?Sized,
    {
        let Some(item) = self.registry.lookup_item(id) else {
            warn!("Ignoring completion of unknown lesson '{}'", id);
            return Vec::new();
        };
        if state.is_done(&item.id) {
            return Vec::new();
        }

        let before = self.visibility(state);
        state.set_done(&item.id);
        debug!("Lesson '{}' completed", item.id);

        if self.parent_completion == ParentCompletion::WhenChildrenDone {
            self.complete_finished_parents(item, state);
        }

        let unlocked = self.diff(&before, &self.visibility(state));
        for lesson in &unlocked {
            info!("Lesson '{}' unlocked by '{}'", lesson.id, item.id);
        }
        unlocked
    }

    /// Clear the "new" badge of a lesson. Returns `false` if it was already seen.
    pub fn mark_seen<S>(&self, id: &str, state: &mut S) -> bool
    where
        S: CompletionStore + ?Sized,
    {
        let Some(item) = self.registry.lookup_item(id) else {
            warn!("Ignoring unknown lesson '{}' marked as seen", id);
            return false;
        };
        let changed = state.set_seen(&item.id);
        if changed {
            debug!("Lesson '{}' seen", item.id);
        }
        changed
    }

    /// Mark every currently visible lesson as seen, returning how many changed
    pub fn mark_all_seen<S>(&self, state: &mut S) -> usize
    where
        S: CompletionStore + ?Sized,
    {
        let ids: Vec<String> = self.new_items(state).into_iter().map(|item| item.id.clone()).collect();
        ids.iter().filter(|id| state.set_seen(id)).count()
    }

    fn complete_finished_parents<S>(&self, item: &Item, state: &mut S)
    where
        S: CompletionStore + ?Sized,
    {
        let mut pending: Vec<ItemId> = item.parents().to_vec();
        while let Some(handle) = pending.pop() {
            let parent = self.registry.item(handle);
            if state.is_done(&parent.id) {
                continue;
            }
            let finished = parent
                .children()
                .iter()
                .all(|&child| state.is_done(&self.registry.item(child).id));
            if finished {
                state.set_done(&parent.id);
                debug!("Lesson '{}' completed with all of its sub-lessons", parent.id);
                pending.extend_from_slice(parent.parents());
            }
        }
    }

    fn select_visible(&self, handles: &[ItemId], visibility: &Visibility) -> Vec<&Item> {
        handles
            .iter()
            .filter(|handle| visibility.is_item_visible(**handle))
            .map(|handle| self.registry.item(*handle))
            .collect()
    }

    fn diff(&self, before: &Visibility, after: &Visibility) -> Vec<&Item> {
        after
            .visible_items()
            .filter(|handle| !before.is_item_visible(*handle))
            .map(|handle| self.registry.item(handle))
            .collect()
    }
}
