//! Shared types for alias resolution

pub mod identifier;

// Re-export commonly used types
pub use identifier::{
    join_namespace, strip_namespace_prefix, trim_separators, validate_identifier, AliasName,
    Target, NAMESPACE_SEPARATOR,
};
