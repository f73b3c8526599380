//! Fixed-point visibility evaluation
//!
//! Rules only ever turn visibility on and only read done flags and parent
//! visibility, so the fixed point is independent of evaluation order and
//! monotone in the done-set.

use crate::catalog::{Category, CategoryId, Gate, Item, ItemId, Registry};
use crate::progress::CompletionStore;

/// Visibility of every lesson and category for one completion snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Visibility {
    items: Vec<bool>,
    categories: Vec<bool>,
}

impl Visibility {
    pub(crate) fn compute<S>(registry: &Registry, state: &S) -> Self
    where
        S: CompletionStore + ?Sized,
    {
        let done: Vec<bool> = registry.items().map(|item| state.is_done(&item.id)).collect();

        let mut categories = vec![false; registry.category_count()];
        for category in registry.categories() {
            categories[category.handle.index()] = match category.gate() {
                Gate::Open => true,
                Gate::AllDone => prerequisites_done(category, &done),
                Gate::FirstRoot => false,
            };
        }

        let mut items = vec![false; registry.item_count()];

        loop {
            let mut changed = false;

            // Derived gates open with their first visible root
            for category in registry.categories() {
                let index = category.handle.index();
                if category.gate() == Gate::FirstRoot
                    && !categories[index]
                    && category.items().iter().any(|root| items[root.index()])
                {
                    categories[index] = true;
                    changed = true;
                }
            }

            // Roots of unlocked categories
            for category in registry.categories() {
                if categories[category.handle.index()] {
                    for &root in category.items() {
                        changed |= show(&mut items, root);
                    }
                }
            }

            // Children of visible, completed parents
            for item in registry.items() {
                let index = item.handle.index();
                if items[index] && done[index] {
                    for &child in item.children() {
                        changed |= show(&mut items, child);
                    }
                }
            }

            // Cross-unlock targets of completed lessons
            for item in registry.items() {
                if done[item.handle.index()] {
                    for &target in item.unlocks() {
                        changed |= show(&mut items, target);
                    }
                }
            }

            if !changed {
                break;
            }
        }

        Self { items, categories }
    }

    pub fn is_item_visible(&self, item: ItemId) -> bool {
        self.items[item.index()]
    }

    pub fn is_category_unlocked(&self, category: CategoryId) -> bool {
        self.categories[category.index()]
    }

    /// Handles of all visible lessons in declaration order
    pub fn visible_items(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.items
            .iter()
            .enumerate()
            .filter(|(_, visible)| **visible)
            .map(|(index, _)| ItemId::from_index(index))
    }

    pub fn visible_count(&self) -> usize {
        self.items.iter().filter(|visible| **visible).count()
    }
}

/// Returns `true` if the lesson was hidden before
fn show(items: &mut [bool], handle: ItemId) -> bool {
    !std::mem::replace(&mut items[handle.index()], true)
}

fn prerequisites_done(category: &Category, done: &[bool]) -> bool {
    category.prerequisites().iter().all(|handle| done[handle.index()])
}

/// Lessons reachable from a category's roots through `children` edges
pub(crate) fn category_tree<'a>(registry: &'a Registry, category: &'a Category) -> Vec<&'a Item> {
    let mut seen = vec![false; registry.item_count()];
    let mut stack: Vec<ItemId> = category.items().iter().rev().copied().collect();
    let mut tree = Vec::new();
    while let Some(handle) = stack.pop() {
        if std::mem::replace(&mut seen[handle.index()], true) {
            continue;
        }
        let item = registry.item(handle);
        tree.push(item);
        stack.extend(item.children().iter().rev().copied());
    }
    tree
}
