//! Durable file-backed cache
//!
//! The file is a JSON object of alias → target. It is read once when the cache
//! is opened and rewritten synchronously after every change, so resolutions
//! survive process restarts. Writes go to a sibling temporary file that is
//! renamed over the cache file, so readers never see a partial document.

use std::collections::{BTreeMap, HashMap};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use alias_core::AliasCache;
use parking_lot::{Mutex, RwLock};
use tracing::{debug, warn};

use super::{CacheStats, StatCounters};
use crate::error::{AliasError, Result};

/// Stores resolved aliases in a JSON file
#[derive(Debug)]
pub struct FileCache {
    /// Backing file
    path: PathBuf,
    /// In-memory view of the file
    entries: RwLock<HashMap<String, String>>,
    /// Lookup statistics
    stats: StatCounters,
    /// Serializes snapshot and write
    write_lock: Mutex<()>,
}

impl FileCache {
    /// Opens a cache file, loading existing entries
    ///
    /// A missing or blank file is an empty cache.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or is not a JSON
    /// object of strings.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let entries = Self::load(&path)?;

        debug!("Loaded {} cached aliases from {}", entries.len(), path.display());

        Ok(Self {
            path,
            entries: RwLock::new(entries),
            stats: StatCounters::default(),
            write_lock: Mutex::new(()),
        })
    }

    fn load(path: &Path) -> Result<HashMap<String, String>> {
        if !path.is_file() {
            if path.exists() {
                return Err(AliasError::Cache(format!(
                    "cache path is not a file: {}",
                    path.display()
                )));
            }
            return Ok(HashMap::new());
        }

        let contents = fs::read_to_string(path)?;
        if contents.trim().is_empty() {
            return Ok(HashMap::new());
        }

        Ok(serde_json::from_str(&contents)?)
    }

    /// Writes every entry to the backing file
    ///
    /// Missing parent directories are created. Concurrent flushes are
    /// serialized, and the snapshot is taken inside that section so the last
    /// write always carries the newest entries.
    pub fn flush(&self) -> Result<()> {
        let _writing = self.write_lock.lock();

        let snapshot: BTreeMap<String, String> = self
            .entries
            .read()
            .iter()
            .map(|(alias, target)| (alias.clone(), target.clone()))
            .collect();

        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() && !dir.exists() {
                fs::create_dir_all(dir)?;
            }
        }

        let staging = self.staging_path();
        fs::write(&staging, serde_json::to_string_pretty(&snapshot)?)?;

        if let Err(e) = fs::rename(&staging, &self.path) {
            let _ = fs::remove_file(&staging);
            return Err(e.into());
        }

        Ok(())
    }

    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(OsString::from)
            .unwrap_or_else(|| OsString::from("aliases"));
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    /// Deletes the backing file, succeeds if it does not exist
    ///
    /// Entries already loaded stay available in memory.
    pub fn purge(&self) -> Result<()> {
        if self.path.is_file() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns lookup statistics
    pub fn stats(&self) -> CacheStats {
        self.stats.snapshot(self.entries.read().len())
    }

    fn persist(&self, action: &str, alias: &str) -> bool {
        match self.flush() {
            Ok(()) => true,
            Err(e) => {
                warn!(
                    "Failed to persist alias cache after {} '{}' to {}: {}",
                    action,
                    alias,
                    self.path.display(),
                    e
                );
                false
            }
        }
    }
}

impl AliasCache for FileCache {
    fn has(&self, alias: &str) -> bool {
        self.entries.read().contains_key(alias)
    }

    fn get(&self, alias: &str) -> Option<String> {
        let found = self.entries.read().get(alias).cloned();
        self.stats.record(found.is_some());
        found
    }

    fn all(&self) -> HashMap<String, String> {
        self.entries.read().clone()
    }

    fn set(&self, alias: &str, target: &str) -> bool {
        self.entries
            .write()
            .insert(alias.to_string(), target.to_string());
        self.persist("setting", alias)
    }

    fn delete(&self, alias: &str) -> bool {
        let removed = self.entries.write().remove(alias).is_some();
        if !removed {
            return true;
        }
        self.persist("deleting", alias)
    }

    fn len(&self) -> usize {
        self.entries.read().len()
    }
}
