//! Miss-handling loader

/// A participant in the host's "unknown name" chain
///
/// The host calls `load` for a name it cannot find; a loader returns true
/// once it has made the name available.
pub trait Loader: Send + Sync {
    /// Attempts to make `name` available
    fn load(&self, name: &str) -> bool;
}
