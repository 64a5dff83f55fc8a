//! Wildcard pattern matching and translation
//!
//! A pattern is a plain string where each `*` captures any run of characters,
//! namespace separators included. A match produces the ordered captures, which
//! a [`Translation`] turns into a candidate target.
//!
//! # Examples
//!
//! ```
//! use alias_resolver::pattern::{PatternEntry, Translation};
//!
//! let entry = PatternEntry::new("Test\\*", "Target\\$1");
//! assert_eq!(entry.translate("Test\\Widget").as_deref(), Some("Target\\Widget"));
//! assert_eq!(entry.translate("Other\\Widget"), None);
//!
//! let upper = PatternEntry::new(
//!     "Legacy\\*",
//!     Translation::computed(|caps| Some(format!("Modern\\{}", caps[0].to_uppercase()))),
//! );
//! assert_eq!(upper.translate("Legacy\\io").as_deref(), Some("Modern\\IO"));
//! ```

mod types;
mod matcher;


pub use types::{CaptureFn, PatternEntry, Translation};
pub use matcher::{CompiledPattern, PatternCompiler, PatternMatch, WILDCARD};
