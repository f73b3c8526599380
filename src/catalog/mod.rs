//! Lesson catalog: definitions and the validated registry
//!
//! Definitions reference each other by string id. [`Registry::build`] resolves
//! them into integer handles and rejects duplicate ids, dangling references and
//! cyclic unlock graphs.

pub mod builtin;
mod definitions;
mod error;
mod registry;

pub use definitions::{CategoryDef, ContentId, ItemDef};
pub use error::RegistryError;
pub use registry::{Category, CategoryId, Gate, Item, ItemId, Registry};
