//! Registry construction and lookup errors

/// Errors raised while building or querying a [`Registry`](super::Registry)
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("Unknown lesson id: {0}")]
    NotFound(String),

    #[error("Lesson `{referenced_by}` references unknown id `{id}`")]
    DanglingReference { id: String, referenced_by: String },

    #[error("Duplicate id: {0}")]
    DuplicateId(String),

    #[error("Cyclic unlock graph: {}", .0.join(" -> "))]
    CyclicUnlock(Vec<String>),
}
