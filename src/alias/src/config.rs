//! Alias configuration loading and validation
//!
//! ```toml
//! [cache]
//! backend = "file"
//! path = "var/aliases.json"
//!
//! [hook]
//! placement = "append"
//!
//! [aliases]
//! "Shape" = "Acme\\Geometry\\Shape"
//!
//! [[patterns]]
//! pattern = "Test\\*"
//! translation = "Target\\$1"
//!
//! [[namespaces]]
//! from = "Acme\\Legacy"
//! to = "Legacy"
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use alias_core::types::validate_identifier;
use alias_core::AliasCache;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::cache::{FileCache, MemoryCache};
use crate::engine::AliasManager;
use crate::error::{AliasError, Result};
use crate::hook::Placement;

/// Complete alias configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AliasConfig {
    #[serde(default)]
    pub cache: CacheSection,

    #[serde(default)]
    pub hook: HookSection,

    #[serde(default)]
    pub aliases: BTreeMap<String, String>,

    #[serde(default)]
    pub patterns: Vec<PatternSpec>,

    #[serde(default)]
    pub namespaces: Vec<NamespaceSpec>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheSection {
    #[serde(default = "default_backend")]
    pub backend: String,
    #[serde(default)]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct HookSection {
    #[serde(default)]
    pub placement: Placement,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PatternSpec {
    pub pattern: String,
    pub translation: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NamespaceSpec {
    pub from: String,
    #[serde(default)]
    pub to: String,
}

impl Default for CacheSection {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            path: None,
        }
    }
}

fn default_backend() -> String { "memory".to_string() }

impl AliasConfig {
    /// Load configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            AliasError::Configuration(format!(
                "failed to read configuration file {}: {}",
                path.display(),
                e
            ))
        })?;

        let config = Self::from_toml_str(&contents)?;
        info!("Loaded alias configuration from {}", path.display());
        Ok(config)
    }

    /// Parse and validate configuration from a TOML string
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        match self.cache.backend.as_str() {
            "memory" => {}
            "file" => {
                if self.cache.path.is_none() {
                    return Err(AliasError::Configuration(
                        "file cache backend requires a path".to_string(),
                    ));
                }
            }
            other => {
                return Err(AliasError::Configuration(format!(
                    "cache backend must be 'memory' or 'file', got '{}'",
                    other
                )));
            }
        }

        for (alias, target) in &self.aliases {
            validate_identifier(alias)?;
            validate_identifier(target)?;
        }

        for spec in &self.patterns {
            if spec.pattern.is_empty() {
                return Err(AliasError::Configuration(
                    "pattern must not be empty".to_string(),
                ));
            }
        }

        Ok(())
    }

    /// Builds the configured cache
    pub fn build_cache(&self) -> Result<Arc<dyn AliasCache>> {
        match (self.cache.backend.as_str(), &self.cache.path) {
            ("file", Some(path)) => Ok(Arc::new(FileCache::open(path)?)),
            ("memory", _) => Ok(Arc::new(MemoryCache::new())),
            _ => Err(AliasError::Configuration(format!(
                "cannot build '{}' cache",
                self.cache.backend
            ))),
        }
    }

    /// Registers every configured rule with a manager, in declaration order
    pub fn apply(&self, manager: &mut AliasManager) -> Result<()> {
        manager.alias_many(self.aliases.iter().map(|(a, t)| (a.as_str(), t.as_str())));

        for spec in &self.patterns {
            manager.try_alias_pattern(&spec.pattern, spec.translation.as_str())?;
        }

        for spec in &self.namespaces {
            manager.alias_namespace(&spec.from, &spec.to);
        }

        info!(
            "Applied {} aliases, {} patterns, {} namespaces",
            self.aliases.len(),
            self.patterns.len(),
            self.namespaces.len()
        );
        Ok(())
    }

    /// Loader chain placement
    pub fn placement(&self) -> Placement {
        self.hook.placement
    }
}
