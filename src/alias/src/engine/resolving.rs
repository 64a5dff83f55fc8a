//! In-flight recursion guard
//!
//! Holds the names currently being resolved on the call stack. A resolution
//! that reaches a name already in flight gives up instead of recursing, which
//! bounds any walk through self-referential rules by the number of distinct
//! names attempted.

use parking_lot::Mutex;

/// Names currently being resolved
#[derive(Debug, Default)]
pub struct ResolvingSet {
    /// In-flight names, innermost last
    names: Mutex<Vec<String>>,
}

impl ResolvingSet {
    /// Creates an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `name` as in flight unless it already is
    ///
    /// Returns `None` when `name` is already being resolved. The returned
    /// guard releases the name when dropped.
    pub fn enter(&self, name: &str) -> Option<ResolvingGuard<'_>> {
        let mut names = self.names.lock();
        if names.iter().any(|n| n == name) {
            return None;
        }
        names.push(name.to_string());
        drop(names);

        Some(ResolvingGuard {
            set: self,
            name: name.to_string(),
        })
    }

    /// Marks `name` as in flight, even if it already is
    pub fn push(&self, name: &str) -> ResolvingGuard<'_> {
        self.names.lock().push(name.to_string());

        ResolvingGuard {
            set: self,
            name: name.to_string(),
        }
    }

    /// Returns true if `name` is being resolved
    pub fn contains(&self, name: &str) -> bool {
        self.names.lock().iter().any(|n| n == name)
    }

    /// Number of in-flight names
    pub fn depth(&self) -> usize {
        self.names.lock().len()
    }

    fn release(&self, name: &str) {
        let mut names = self.names.lock();
        if let Some(pos) = names.iter().rposition(|n| n == name) {
            names.remove(pos);
        }
    }
}

/// Keeps a name in the [`ResolvingSet`] until dropped
#[derive(Debug)]
#[must_use = "the name is released as soon as the guard is dropped"]
pub struct ResolvingGuard<'a> {
    set: &'a ResolvingSet,
    name: String,
}

impl ResolvingGuard<'_> {
    /// Guarded name
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Drop for ResolvingGuard<'_> {
    fn drop(&mut self) {
        self.set.release(&self.name);
    }
}
