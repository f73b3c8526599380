//! Validated, immutable lesson registry
//!
//! Lessons and categories live in two arenas and refer to each other through
//! integer handles. The registry is built once and only read afterwards, so it
//! can be shared freely behind an `Arc`.

use std::cmp::Reverse;
use std::collections::HashMap;

use tracing::{debug, warn};

use super::definitions::{CategoryDef, ContentId, ItemDef};
use super::error::RegistryError;

/// Handle to a lesson inside a [`Registry`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(u32);

impl ItemId {
    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub(crate) fn from_index(index: usize) -> Self {
        Self(index as u32)
    }
}

/// Handle to a category inside a [`Registry`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CategoryId(u32);

impl CategoryId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A registered lesson
#[derive(Debug, Clone)]
pub struct Item {
    pub handle: ItemId,
    pub id: String,
    pub title: String,
    pub content: ContentId,
    pub highlighted: bool,
    pub sort_priority: i32,
    children: Vec<ItemId>,
    unlocks: Vec<ItemId>,
    parents: Vec<ItemId>,
    unlocked_by: Vec<ItemId>,
}

impl Item {
    /// Sub-lessons, highest priority first
    pub fn children(&self) -> &[ItemId] {
        &self.children
    }

    pub fn unlocks(&self) -> &[ItemId] {
        &self.unlocks
    }

    /// Lessons listing this one as a child
    pub fn parents(&self) -> &[ItemId] {
        &self.parents
    }

}

/// How a category becomes unlocked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    /// Unlocked from the start
    Open,
    /// Unlocked once every prerequisite is done (explicit `requires`)
    AllDone,
    /// Unlocked as soon as any root lesson becomes visible. The prerequisites
    /// are the lessons unlocking one of the roots.
    FirstRoot,
}

/// A registered category
#[derive(Debug, Clone)]
pub struct Category {
    pub handle: CategoryId,
    pub id: String,
    pub title: String,
    pub sort_priority: i32,
    items: Vec<ItemId>,
    gate: Gate,
    prerequisites: Vec<ItemId>,
}

impl Category {
    /// Root lessons, highest priority first
    pub fn items(&self) -> &[ItemId] {
        &self.items
    }

    pub fn gate(&self) -> Gate {
        self.gate
    }

    /// Lessons gating the category, see [`Gate`]
    pub fn prerequisites(&self) -> &[ItemId] {
        &self.prerequisites
    }

    /// Whether the category is visible without any completed lessons
    pub fn is_root(&self) -> bool {
        self.gate == Gate::Open
    }
}

/// Immutable arena of lessons and categories
#[derive(Debug, Clone)]
pub struct Registry {
    items: Vec<Item>,
    categories: Vec<Category>,
    item_index: HashMap<String, ItemId>,
    category_index: HashMap<String, CategoryId>,
    category_order: Vec<CategoryId>,
}

impl Registry {
    /// Validate definitions and build the registry.
    ///
    /// Fails on duplicate ids, references to unknown ids, and cycles through
    /// `children` or `unlocks` edges.
    pub fn build(item_defs: Vec<ItemDef>, category_defs: Vec<CategoryDef>) -> Result<Self, RegistryError> {
        let mut item_index = HashMap::with_capacity(item_defs.len());
        for (i, def) in item_defs.iter().enumerate() {
            if item_index.insert(def.id.clone(), ItemId(i as u32)).is_some() {
                return Err(RegistryError::DuplicateId(def.id.clone()));
            }
        }

        let resolve = |ids: &[String], referenced_by: &str| -> Result<Vec<ItemId>, RegistryError> {
            ids.iter()
                .map(|id| {
                    item_index
                        .get(id)
                        .copied()
                        .ok_or_else(|| RegistryError::DanglingReference {
                            id: id.clone(),
                            referenced_by: referenced_by.to_string(),
                        })
                })
                .collect()
        };

        let mut items = Vec::with_capacity(item_defs.len());
        for (i, def) in item_defs.into_iter().enumerate() {
            let children = resolve(&def.children, &def.id)?;
            let unlocks = resolve(&def.unlocks, &def.id)?;
            items.push(Item {
                handle: ItemId(i as u32),
                id: def.id,
                title: def.title,
                content: def.content,
                highlighted: def.highlighted,
                sort_priority: def.sort_priority,
                children,
                unlocks,
                parents: Vec::new(),
                unlocked_by: Vec::new(),
            });
        }

        check_acyclic(&items)?;

        let priorities: Vec<i32> = items.iter().map(|item| item.sort_priority).collect();
        for i in 0..items.len() {
            let handle = items[i].handle;
            for child in items[i].children.clone() {
                items[child.index()].parents.push(handle);
            }
            for target in items[i].unlocks.clone() {
                items[target.index()].unlocked_by.push(handle);
            }
            items[i]
                .children
                .sort_by_key(|child| Reverse(priorities[child.index()]));
        }

        let mut category_index = HashMap::with_capacity(category_defs.len());
        let mut categories = Vec::with_capacity(category_defs.len());
        for (i, def) in category_defs.into_iter().enumerate() {
            let handle = CategoryId(i as u32);
            if category_index.insert(def.id.clone(), handle).is_some() {
                return Err(RegistryError::DuplicateId(def.id));
            }

            let mut members = resolve(&def.items, &def.id)?;
            members.sort_by_key(|member| Reverse(priorities[member.index()]));

            let (gate, prerequisites) = match &def.requires {
                Some(ids) => (Gate::AllDone, resolve(ids, &def.id)?),
                None => (Gate::FirstRoot, derive_prerequisites(&items, &members)),
            };
            let gate = if prerequisites.is_empty() { Gate::Open } else { gate };

            categories.push(Category {
                handle,
                id: def.id,
                title: def.title,
                sort_priority: def.sort_priority,
                items: members,
                gate,
                prerequisites,
            });
        }

        let mut category_order: Vec<CategoryId> = categories.iter().map(|c| c.handle).collect();
        category_order.sort_by_key(|c| Reverse(categories[c.index()].sort_priority));

        let registry = Self {
            items,
            categories,
            item_index,
            category_index,
            category_order,
        };
        registry.warn_unreachable();

        debug!(
            "Built lesson registry: {} lessons in {} categories",
            registry.items.len(),
            registry.categories.len()
        );
        Ok(registry)
    }

    pub fn item(&self, handle: ItemId) -> &Item {
        &self.items[handle.index()]
    }

    pub fn category(&self, handle: CategoryId) -> &Category {
        &self.categories[handle.index()]
    }

    /// Look up a lesson by its string id
    pub fn resolve_item(&self, id: &str) -> Result<&Item, RegistryError> {
        self.lookup_item(id)
            .ok_or_else(|| RegistryError::NotFound(id.to_string()))
    }

    pub fn lookup_item(&self, id: &str) -> Option<&Item> {
        self.item_index.get(id).map(|handle| self.item(*handle))
    }

    /// Look up a category by its string id
    pub fn resolve_category(&self, id: &str) -> Result<&Category, RegistryError> {
        self.category_index
            .get(id)
            .map(|handle| self.category(*handle))
            .ok_or_else(|| RegistryError::NotFound(id.to_string()))
    }

    /// All categories, highest priority first, ties in declaration order
    pub fn categories(&self) -> impl Iterator<Item = &Category> {
        self.category_order.iter().map(|handle| self.category(*handle))
    }

    /// All lessons in declaration order
    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.items.iter()
    }

    pub fn children<'a>(&'a self, item: &'a Item) -> impl Iterator<Item = &'a Item> + 'a {
        item.children.iter().map(|handle| self.item(*handle))
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    fn warn_unreachable(&self) {
        let mut reachable = vec![false; self.items.len()];
        for category in &self.categories {
            for handle in &category.items {
                reachable[handle.index()] = true;
            }
        }
        for item in &self.items {
            if !item.parents.is_empty() || !item.unlocked_by.is_empty() {
                reachable[item.handle.index()] = true;
            }
        }
        for item in &self.items {
            if !reachable[item.handle.index()] {
                warn!("Lesson '{}' is not reachable from any category", item.id);
            }
        }
    }
}

/// Every lesson whose `unlocks` names one of `members`, in declaration order
fn derive_prerequisites(items: &[Item], members: &[ItemId]) -> Vec<ItemId> {
    let mut unlockers: Vec<ItemId> = members
        .iter()
        .flat_map(|member| items[member.index()].unlocked_by.iter().copied())
        .collect();
    unlockers.sort_unstable();
    unlockers.dedup();
    unlockers
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    InProgress,
    Done,
}

fn check_acyclic(items: &[Item]) -> Result<(), RegistryError> {
    let mut marks = vec![Mark::Unvisited; items.len()];
    let mut path = Vec::new();
    for item in items {
        if marks[item.handle.index()] == Mark::Unvisited {
            visit(item.handle, items, &mut marks, &mut path)?;
        }
    }
    Ok(())
}

fn visit(
    node: ItemId,
    items: &[Item],
    marks: &mut [Mark],
    path: &mut Vec<ItemId>,
) -> Result<(), RegistryError> {
    marks[node.index()] = Mark::InProgress;
    path.push(node);

    let item = &items[node.index()];
    for &next in item.children.iter().chain(item.unlocks.iter()) {
        match marks[next.index()] {
            Mark::InProgress => {
                let start = path.iter().position(|&p| p == next).unwrap_or(0);
                let mut cycle: Vec<String> = path[start..]
                    .iter()
                    .map(|p| items[p.index()].id.clone())
                    .collect();
                cycle.push(items[next.index()].id.clone());
                return Err(RegistryError::CyclicUnlock(cycle));
            }
            Mark::Unvisited => visit(next, items, marks, path)?,
            Mark::Done => {}
        }
    }

    path.pop();
    marks[node.index()] = Mark::Done;
    Ok(())
}
