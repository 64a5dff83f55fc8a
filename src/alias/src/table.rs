//! Alias rule storage
//!
//! Owns the three rule collections consulted during resolution:
//!
//! - **Literal aliases**: alias → target, last write wins
//! - **Namespace aliases**: ordered `(from, to)` prefix rewrites, duplicates allowed
//! - **Pattern aliases**: ordered wildcard patterns keyed by their raw string
//!
//! The table performs no lookups against the host and no caching.

use std::collections::HashMap;

use alias_core::types::trim_separators;
use indexmap::IndexMap;

use crate::error::Result;
use crate::pattern::{PatternCompiler, PatternEntry, Translation};

/// Namespace rewrite rule
///
/// An alias under `to` is looked up under `from`. An empty `to` matches every
/// alias.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceAlias {
    /// Namespace holding the concrete types
    pub from: String,
    /// Namespace prefix used by aliases
    pub to: String,
}

impl NamespaceAlias {
    /// Creates a rule with both sides trimmed of namespace separators
    pub fn new(from: &str, to: &str) -> Self {
        Self {
            from: trim_separators(from).to_string(),
            to: trim_separators(to).to_string(),
        }
    }

    /// Returns true if this rule redirects every alias
    pub fn is_catch_all(&self) -> bool {
        self.to.is_empty()
    }
}

/// The three alias rule collections
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    /// Literal aliases
    literals: HashMap<String, String>,
    /// Pattern aliases in insertion order
    patterns: IndexMap<String, PatternEntry>,
    /// Namespace aliases in insertion order
    namespaces: Vec<NamespaceAlias>,
    /// Compiled pattern cache
    compiler: PatternCompiler,
}

impl AliasTable {
    /// Creates an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty table sharing a pattern compiler
    pub fn with_compiler(compiler: PatternCompiler) -> Self {
        Self {
            compiler,
            ..Self::default()
        }
    }

    // ------------------------------------------------------------------------
    // Literal aliases
    // ------------------------------------------------------------------------

    /// Sets a literal alias, replacing any previous target
    pub fn set_literal(&mut self, alias: impl Into<String>, target: impl Into<String>) {
        self.literals.insert(alias.into(), target.into());
    }

    /// Merges literal aliases, later keys overwrite earlier ones
    pub fn set_literals<I, A, T>(&mut self, aliases: I)
    where
        I: IntoIterator<Item = (A, T)>,
        A: Into<String>,
        T: Into<String>,
    {
        for (alias, target) in aliases {
            self.set_literal(alias, target);
        }
    }

    /// Removes literal aliases, unknown names are ignored
    pub fn remove_literals<I, S>(&mut self, aliases: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for alias in aliases {
            self.literals.remove(alias.as_ref());
        }
    }

    /// Literal target for an alias
    pub fn literal(&self, alias: &str) -> Option<&str> {
        self.literals.get(alias).map(String::as_str)
    }

    /// All literal aliases
    pub fn literals(&self) -> &HashMap<String, String> {
        &self.literals
    }

    // ------------------------------------------------------------------------
    // Pattern aliases
    // ------------------------------------------------------------------------

    /// Adds a pattern alias
    ///
    /// Re-adding a pattern replaces its entry in place, keeping its position.
    /// A pattern that cannot compile is stored as a never-matching entry.
    pub fn add_pattern(&mut self, pattern: &str, translation: impl Into<Translation>) {
        let entry = PatternEntry::with_compiler(&self.compiler, pattern, translation);
        self.insert_pattern(entry);
    }

    /// Adds a pattern alias, failing if the pattern cannot compile
    pub fn try_add_pattern(
        &mut self,
        pattern: &str,
        translation: impl Into<Translation>,
    ) -> Result<()> {
        let compiled = self.compiler.compile(pattern)?;
        self.insert_pattern(PatternEntry::from_compiled(compiled, translation.into()));
        Ok(())
    }

    /// Adds several pattern aliases in order
    pub fn add_patterns<I, P, T>(&mut self, patterns: I)
    where
        I: IntoIterator<Item = (P, T)>,
        P: AsRef<str>,
        T: Into<Translation>,
    {
        for (pattern, translation) in patterns {
            self.add_pattern(pattern.as_ref(), translation);
        }
    }

    /// Adds a prepared entry
    pub fn insert_pattern(&mut self, entry: PatternEntry) {
        // IndexMap keeps the original slot for an existing key
        self.patterns.insert(entry.pattern().to_string(), entry);
    }

    /// Removes the pattern, optionally only if its translation also matches
    pub fn remove_pattern(&mut self, pattern: &str, translation: Option<&Translation>) {
        self.patterns
            .retain(|_, entry| !entry.matches(pattern, translation));
    }

    /// Entry registered under exactly this pattern string
    pub fn pattern(&self, pattern: &str) -> Option<&PatternEntry> {
        self.patterns.get(pattern)
    }

    /// Pattern entries in insertion order
    pub fn patterns(&self) -> impl Iterator<Item = &PatternEntry> {
        self.patterns.values()
    }

    // ------------------------------------------------------------------------
    // Namespace aliases
    // ------------------------------------------------------------------------

    /// Appends a namespace alias
    pub fn add_namespace(&mut self, from: &str, to: &str) {
        self.namespaces.push(NamespaceAlias::new(from, to));
    }

    /// Removes every namespace alias whose `from` is listed
    pub fn remove_namespaces<I, S>(&mut self, froms: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let froms: Vec<String> = froms
            .into_iter()
            .map(|from| trim_separators(from.as_ref()).to_string())
            .collect();

        self.namespaces.retain(|ns| !froms.contains(&ns.from));
    }

    /// Namespace aliases in insertion order
    pub fn namespaces(&self) -> &[NamespaceAlias] {
        &self.namespaces
    }

    /// Returns true if no rule of any kind is registered
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty() && self.patterns.is_empty() && self.namespaces.is_empty()
    }
}
