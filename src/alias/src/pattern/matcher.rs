/// Wildcard pattern compilation
///
/// Turns `Acme\*\Shape` into the anchored expression `^Acme\\(.*)\\Shape$`,
/// with every literal character escaped.

use std::sync::Arc;

use dashmap::DashMap;
use regex::Regex;
use tracing::warn;

use crate::error::{AliasError, Result};

/// Wildcard marker in patterns
pub const WILDCARD: char = '*';

/// Successful match of an alias against a compiled pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternMatch<'a> {
    /// The alias that matched
    alias: &'a str,
    /// One entry per wildcard, in pattern order
    captures: Vec<&'a str>,
}

impl<'a> PatternMatch<'a> {
    /// The whole matched alias
    pub fn alias(&self) -> &'a str {
        self.alias
    }

    /// Captured substrings, zero-indexed
    pub fn captures(&self) -> &[&'a str] {
        &self.captures
    }

    /// Placeholder lookup: `0` is the whole alias, `n` the n-th capture
    ///
    /// Placeholders without a capture expand to the empty string.
    pub fn group(&self, index: usize) -> &'a str {
        match index {
            0 => self.alias,
            n => self.captures.get(n - 1).copied().unwrap_or(""),
        }
    }
}

/// A wildcard pattern compiled to an anchored matcher
///
/// A pattern whose expression could not be built is kept as a never-matching
/// entry, so lookups report no match instead of failing.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    /// Raw pattern string
    raw: String,
    /// Anchored expression, `None` when compilation failed
    regex: Option<Regex>,
}

impl CompiledPattern {
    /// Compiles a wildcard pattern
    ///
    /// # Errors
    ///
    /// Returns [`AliasError::InvalidPattern`] if the regex engine rejects the
    /// generated expression (for example when it exceeds the size limit).
    pub fn compile(pattern: &str) -> Result<Self> {
        let regex = Regex::new(&Self::expression(pattern)).map_err(|e| {
            AliasError::InvalidPattern {
                pattern: pattern.to_string(),
                reason: e.to_string(),
            }
        })?;

        Ok(Self {
            raw: pattern.to_string(),
            regex: Some(regex),
        })
    }

    /// Compiles a pattern, degrading to a never-matching entry on failure
    pub fn compile_lenient(pattern: &str) -> Self {
        match Self::compile(pattern) {
            Ok(compiled) => compiled,
            Err(e) => {
                warn!("Pattern will never match: {}", e);
                Self {
                    raw: pattern.to_string(),
                    regex: None,
                }
            }
        }
    }

    /// Builds the anchored expression for a pattern
    fn expression(pattern: &str) -> String {
        let body = pattern
            .split(WILDCARD)
            .map(regex::escape)
            .collect::<Vec<_>>()
            .join("(.*)");

        format!("(?s)^{}$", body)
    }

    /// Returns the raw pattern string
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Returns the number of wildcards in the pattern
    pub fn wildcard_count(&self) -> usize {
        self.raw.matches(WILDCARD).count()
    }

    /// Returns true if the pattern has no wildcard
    pub fn is_literal(&self) -> bool {
        !self.raw.contains(WILDCARD)
    }

    /// Returns false if the pattern failed to compile
    pub fn is_valid(&self) -> bool {
        self.regex.is_some()
    }

    /// Checks if an alias matches the whole pattern
    pub fn is_match(&self, alias: &str) -> bool {
        self.regex.as_ref().is_some_and(|re| re.is_match(alias))
    }

    /// Matches an alias and extracts the captured segments
    pub fn captures<'a>(&self, alias: &'a str) -> Option<PatternMatch<'a>> {
        let caps = self.regex.as_ref()?.captures(alias)?;

        let captures = caps
            .iter()
            .skip(1)
            .map(|m| m.map_or("", |m| m.as_str()))
            .collect();

        Some(PatternMatch { alias, captures })
    }
}

impl PartialEq for CompiledPattern {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for CompiledPattern {}

/// Pattern compiler with a cache of compiled matchers
///
/// Re-adding a pattern string (or the same pattern across several tables
/// sharing one compiler) reuses the compiled expression.
#[derive(Debug, Default, Clone)]
pub struct PatternCompiler {
    /// Compiled pattern cache (thread-safe)
    cache: Arc<DashMap<String, CompiledPattern>>,
}

impl PatternCompiler {
    /// Create a new compiler with an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile a pattern and cache the result
    ///
    /// # Errors
    ///
    /// Returns error if the pattern cannot be compiled; failures are not cached
    pub fn compile(&self, pattern: &str) -> Result<CompiledPattern> {
        if let Some(compiled) = self.cache.get(pattern) {
            return Ok(compiled.clone());
        }

        let compiled = CompiledPattern::compile(pattern)?;
        self.cache.insert(pattern.to_string(), compiled.clone());

        Ok(compiled)
    }

    /// Compile a pattern, degrading to a never-matching entry on failure
    pub fn compile_lenient(&self, pattern: &str) -> CompiledPattern {
        self.compile(pattern)
            .unwrap_or_else(|_| CompiledPattern::compile_lenient(pattern))
    }

    /// Number of cached patterns
    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }

    /// Clear the compiled pattern cache
    pub fn clear_cache(&self) {
        self.cache.clear();
    }
}
