//! Host type registry capabilities

/// Existence predicate over the host's type registry
///
/// When `allow_load` is set the implementation should try to make the
/// identifier available first (for example by running the host's loader
/// chain), which may re-enter the resolver.
pub trait ExistenceCheck: Send + Sync {
    /// Returns true if `identifier` names a usable type
    fn exists(&self, identifier: &str, allow_load: bool) -> bool;
}

/// Binds an alias to a concrete target in the host's type registry
///
/// Binding is idempotent and only ever called for a validated target.
pub trait AliasBinder: Send + Sync {
    /// Makes `alias` refer to `target`
    fn bind(&self, target: &str, alias: &str);
}
