//! # Alias Core
//!
//! Shared identifier helpers, collaborator traits, and error handling for the
//! alias resolver. The resolution engine depends only on the traits defined
//! here, never on a concrete host type system.

pub mod types;
pub mod traits;
pub mod error;

// Re-export commonly used types
pub use error::{CoreError, Result};
pub use types::{AliasName, Target, NAMESPACE_SEPARATOR};
pub use traits::{AliasBinder, AliasCache, ExistenceCheck, Loader};
