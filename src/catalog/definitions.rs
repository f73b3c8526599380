//! Lesson and category definitions
//!
//! Definitions are plain data that reference each other by string id. They are
//! turned into a validated [`Registry`](super::Registry) once at startup.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque handle to the renderable content of a lesson.
///
/// The unlock engine never looks inside it; a presentation adapter maps it to
/// drawing logic.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentId(String);

impl ContentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Definition of a single lesson
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemDef {
    pub id: String,
    pub title: String,
    pub content: ContentId,
    /// Sub-lessons shown once this lesson is completed
    pub children: Vec<String>,
    /// Lessons outside the children relation that become visible on completion
    pub unlocks: Vec<String>,
    pub highlighted: bool,
    pub sort_priority: i32,
}

impl ItemDef {
    /// Create a lesson whose content handle is its own id
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            content: ContentId::new(id.clone()),
            id,
            title: title.into(),
            children: Vec::new(),
            unlocks: Vec::new(),
            highlighted: false,
            sort_priority: 0,
        }
    }

    pub fn children<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.children = ids.into_iter().map(Into::into).collect();
        self
    }

    pub fn unlocks<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.unlocks = ids.into_iter().map(Into::into).collect();
        self
    }

    pub fn highlighted(mut self) -> Self {
        self.highlighted = true;
        self
    }

    pub fn priority(mut self, sort_priority: i32) -> Self {
        self.sort_priority = sort_priority;
        self
    }
}

/// Definition of a lesson category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryDef {
    pub id: String,
    pub title: String,
    /// Root lessons of this category
    pub items: Vec<String>,
    pub sort_priority: i32,
    /// Explicit prerequisites. `None` derives them from incoming unlock edges.
    pub requires: Option<Vec<String>>,
}

impl CategoryDef {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            items: Vec::new(),
            sort_priority: 0,
            requires: None,
        }
    }

    pub fn items<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.items = ids.into_iter().map(Into::into).collect();
        self
    }

    pub fn priority(mut self, sort_priority: i32) -> Self {
        self.sort_priority = sort_priority;
        self
    }

    /// Gate the category on an explicit set of lessons (empty means always unlocked)
    pub fn requires<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.requires = Some(ids.into_iter().map(Into::into).collect());
        self
    }
}
