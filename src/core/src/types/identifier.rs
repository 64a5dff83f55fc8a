//! Identifier helpers
//!
//! Aliases and targets are opaque strings. The only structure the resolver
//! relies on is the namespace separator, used by namespace rewrites and by
//! wildcard captures that span several segments (`Acme\Geometry\Shape`).

use crate::error::{CoreError, Result};

/// Separator between namespace segments
pub const NAMESPACE_SEPARATOR: char = '\\';

/// Name requested for resolution
pub type AliasName = String;

/// Concrete type identifier an alias resolves to
pub type Target = String;

/// Removes leading and trailing namespace separators
///
/// ```
/// use alias_core::types::trim_separators;
///
/// assert_eq!(trim_separators("\\Foo\\Bar\\"), "Foo\\Bar");
/// ```
pub fn trim_separators(s: &str) -> &str {
    s.trim_matches(NAMESPACE_SEPARATOR)
}

/// Strips a namespace prefix from an alias
///
/// An empty prefix matches every alias and strips nothing. A non-empty prefix
/// must cover whole segments: `Check\ItOut` strips `Check\ItOut\Foo` to `Foo`
/// but does not match `Check\ItOutside\Foo` or `Check\ItOut` itself.
pub fn strip_namespace_prefix<'a>(alias: &'a str, prefix: &str) -> Option<&'a str> {
    if prefix.is_empty() {
        return Some(alias);
    }

    let rest = alias.strip_prefix(prefix)?;
    let rest = rest.strip_prefix(NAMESPACE_SEPARATOR)?;

    if rest.is_empty() {
        None
    } else {
        Some(rest)
    }
}

/// Joins a namespace and a relative name
pub fn join_namespace(namespace: &str, name: &str) -> String {
    if namespace.is_empty() {
        return name.to_string();
    }

    let mut joined = String::with_capacity(namespace.len() + name.len() + 1);
    joined.push_str(namespace);
    joined.push(NAMESPACE_SEPARATOR);
    joined.push_str(name);
    joined
}

/// Checks that an identifier names something
///
/// # Errors
///
/// Returns [`CoreError::InvalidIdentifier`] when the identifier is empty or
/// consists only of namespace separators.
pub fn validate_identifier(s: &str) -> Result<()> {
    if trim_separators(s).is_empty() {
        return Err(CoreError::invalid_identifier(s));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_trim_separators() {
        assert_eq!(trim_separators("Foo\\Bar"), "Foo\\Bar");
        assert_eq!(trim_separators("\\\\Foo\\"), "Foo");
        assert_eq!(trim_separators("\\"), "");
        assert_eq!(trim_separators(""), "");
    }

    #[test]
    fn test_strip_empty_prefix() {
        assert_eq!(strip_namespace_prefix("Dummy", ""), Some("Dummy"));
        assert_eq!(strip_namespace_prefix("A\\B", ""), Some("A\\B"));
    }

    #[test]
    fn test_strip_segment_prefix() {
        assert_eq!(
            strip_namespace_prefix("Check\\ItOut\\Foo", "Check\\ItOut"),
            Some("Foo")
        );
        assert_eq!(
            strip_namespace_prefix("Check\\ItOut\\Deep\\Foo", "Check\\ItOut"),
            Some("Deep\\Foo")
        );
    }

    #[test]
    fn test_strip_partial_segment() {
        assert_eq!(strip_namespace_prefix("Check\\ItOutside\\Foo", "Check\\ItOut"), None);
        assert_eq!(strip_namespace_prefix("Check\\ItOut", "Check\\ItOut"), None);
        assert_eq!(strip_namespace_prefix("Other\\Foo", "Check"), None);
    }

    #[test]
    fn test_join_namespace() {
        assert_eq!(join_namespace("Foo\\Bar", "Dummy"), "Foo\\Bar\\Dummy");
        assert_eq!(join_namespace("", "Dummy"), "Dummy");
    }

    #[test]
    fn test_validate_identifier() {
        assert!(validate_identifier("Shape").is_ok());
        assert!(validate_identifier("\\Acme\\Shape").is_ok());
        assert!(matches!(
            validate_identifier(""),
            Err(CoreError::InvalidIdentifier(_))
        ));
        assert!(matches!(
            validate_identifier("\\\\"),
            Err(CoreError::InvalidIdentifier(_))
        ));
    }

    proptest! {
        #[test]
        fn test_join_then_strip(ns in "[A-Z][a-z]{1,6}(\\\\[A-Z][a-z]{1,6}){0,2}", name in "[A-Z][a-z]{1,8}") {
            let joined = join_namespace(&ns, &name);
            prop_assert_eq!(strip_namespace_prefix(&joined, &ns), Some(name.as_str()));
        }
    }
}
