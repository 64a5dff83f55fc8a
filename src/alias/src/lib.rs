//! # Alias Resolver
//!
//! Resolves requested type names to concrete types at the moment the host's
//! type registry fails to find them, then binds the alias so later lookups
//! succeed directly.
//!
//! ## Features
//!
//! - **Literal aliases**: exact alias → target mappings
//! - **Namespace aliases**: prefix rewrites (`Legacy\Thing` → `Acme\Legacy\Thing`)
//! - **Pattern aliases**: `*` wildcards with `$N` placeholders or capture functions
//! - **Recursion guard**: re-entrant existence checks can never loop
//! - **Pluggable caches**: volatile in-memory or durable JSON file
//! - **TOML configuration** for rules, cache backend, and loader placement
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use alias_resolver::{AliasManager, HookChain, Placement, TypeRegistry};
//!
//! let registry = Arc::new(TypeRegistry::new());
//! registry.define("Target\\Widget");
//!
//! let chain = Arc::new(HookChain::new());
//! registry.attach_chain(&chain);
//!
//! let mut manager = AliasManager::new(registry.clone());
//! manager.alias_pattern("Test\\*", "Target\\$1");
//!
//! let manager = Arc::new(manager);
//! manager.register(&chain, Placement::Prepend);
//!
//! // The host misses "Test\Widget" and runs its loader chain
//! assert!(chain.load("Test\\Widget"));
//! assert_eq!(registry.target_of("Test\\Widget").as_deref(), Some("Target\\Widget"));
//! ```

pub mod cache;
pub mod config;
pub mod engine;
pub mod error;
pub mod hook;
pub mod pattern;
pub mod registry;
pub mod table;

// Re-export commonly used types
pub use alias_core::{AliasBinder, AliasCache, ExistenceCheck, Loader};
pub use cache::{CacheStats, FileCache, MemoryCache};
pub use config::AliasConfig;
pub use engine::{AliasManager, EngineMetrics, ManagerConfig, Resolution, Strategy};
pub use error::{AliasError, Result};
pub use hook::{HookChain, HookId, Placement};
pub use pattern::{PatternEntry, Translation};
pub use registry::TypeRegistry;
pub use table::{AliasTable, NamespaceAlias};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
