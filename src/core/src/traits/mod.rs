//! Collaborator traits consumed by the resolution engine

pub mod registry;
pub mod cache;
pub mod loader;

// Re-export commonly used traits
pub use registry::{AliasBinder, ExistenceCheck};
pub use cache::AliasCache;
pub use loader::Loader;
