/// Pattern translations and entries
///
/// A translation turns a pattern match into a candidate target. It is either
/// a literal target, a template with `$N` placeholders, or a function of the
/// captures.

use std::fmt;
use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::matcher::{CompiledPattern, PatternCompiler, PatternMatch};
use crate::error::Result;

/// `$N` or `${N}` placeholder
static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\$(?:(\d+)|\{(\d+)\})").expect("placeholder expression is valid")
});

/// Computes a target from the zero-indexed captures of a match
pub type CaptureFn = dyn Fn(&[&str]) -> Option<String> + Send + Sync;

/// How a matched pattern produces its target
#[derive(Clone)]
pub enum Translation {
    /// Fixed target, independent of the captures
    Literal(String),
    /// Target with `$N` placeholders, 1-indexed (`$0` is the whole alias)
    Template(String),
    /// Target computed from the captures
    Computed(Arc<CaptureFn>),
}

impl Translation {
    /// Classifies a translation string
    ///
    /// Strings containing a placeholder become templates, everything else is
    /// taken literally.
    pub fn parse(s: &str) -> Self {
        if PLACEHOLDER.is_match(s) {
            Self::Template(s.to_string())
        } else {
            Self::Literal(s.to_string())
        }
    }

    /// Wraps a capture function
    pub fn computed<F>(f: F) -> Self
    where
        F: Fn(&[&str]) -> Option<String> + Send + Sync + 'static,
    {
        Self::Computed(Arc::new(f))
    }

    /// Produces the candidate target for a match
    ///
    /// An empty result counts as no candidate.
    pub fn apply(&self, m: &PatternMatch<'_>) -> Option<String> {
        let target = match self {
            Self::Literal(target) => target.clone(),
            Self::Template(template) => Self::expand(template, m),
            Self::Computed(f) => f(m.captures())?,
        };

        if target.is_empty() {
            None
        } else {
            Some(target)
        }
    }

    /// Substitutes placeholders with captures, inserted verbatim
    fn expand(template: &str, m: &PatternMatch<'_>) -> String {
        PLACEHOLDER
            .replace_all(template, |caps: &Captures<'_>| {
                caps.get(1)
                    .or_else(|| caps.get(2))
                    .and_then(|index| index.as_str().parse::<usize>().ok())
                    .map_or("", |index| m.group(index))
                    .to_string()
            })
            .into_owned()
    }

    /// Source text for literal and template translations
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Literal(s) | Self::Template(s) => Some(s),
            Self::Computed(_) => None,
        }
    }
}

impl From<&str> for Translation {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

impl From<String> for Translation {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<&String> for Translation {
    fn from(s: &String) -> Self {
        Self::parse(s)
    }
}

impl PartialEq for Translation {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Literal(a), Self::Literal(b)) => a == b,
            (Self::Template(a), Self::Template(b)) => a == b,
            (Self::Computed(a), Self::Computed(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for Translation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(s) => f.debug_tuple("Literal").field(s).finish(),
            Self::Template(s) => f.debug_tuple("Template").field(s).finish(),
            Self::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

/// A wildcard pattern paired with its translation
#[derive(Debug, Clone)]
pub struct PatternEntry {
    /// Compiled matcher
    pattern: CompiledPattern,
    /// Target producer
    translation: Translation,
}

impl PatternEntry {
    /// Creates an entry, degrading to a never-matching pattern if it cannot compile
    pub fn new(pattern: &str, translation: impl Into<Translation>) -> Self {
        Self::from_compiled(CompiledPattern::compile_lenient(pattern), translation.into())
    }

    /// Creates an entry, failing if the pattern cannot compile
    pub fn try_new(pattern: &str, translation: impl Into<Translation>) -> Result<Self> {
        Ok(Self::from_compiled(
            CompiledPattern::compile(pattern)?,
            translation.into(),
        ))
    }

    /// Creates an entry through a caching compiler
    pub fn with_compiler(
        compiler: &PatternCompiler,
        pattern: &str,
        translation: impl Into<Translation>,
    ) -> Self {
        Self::from_compiled(compiler.compile_lenient(pattern), translation.into())
    }

    /// Pairs an already compiled pattern with a translation
    pub fn from_compiled(pattern: CompiledPattern, translation: Translation) -> Self {
        Self {
            pattern,
            translation,
        }
    }

    /// Raw pattern string
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// Compiled matcher
    pub fn compiled(&self) -> &CompiledPattern {
        &self.pattern
    }

    /// Translation of this entry
    pub fn translation(&self) -> &Translation {
        &self.translation
    }

    /// Matches an alias and translates it to a candidate target
    pub fn translate(&self, alias: &str) -> Option<String> {
        let m = self.pattern.captures(alias)?;
        self.translation.apply(&m)
    }

    /// Identity check used for removal
    ///
    /// The pattern must be equal; the translation is only compared when given.
    pub fn matches(&self, pattern: &str, translation: Option<&Translation>) -> bool {
        self.pattern.as_str() == pattern
            && translation.map_or(true, |t| *t == self.translation)
    }
}
