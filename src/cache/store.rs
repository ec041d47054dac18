//! Backing stores for the transparency cache.

use crate::error::{IoResultExt, ResolverError, Result};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Cached transparency of one texture file.
///
/// Serialized as a two-element array `[modified, transparent]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(i64, bool)", into = "(i64, bool)")]
pub struct TransparencyEntry {
    /// Modification time in nanoseconds relative to the UNIX epoch,
    /// negative for earlier times.
    pub modified: i64,
    pub transparent: bool,
}

impl From<(i64, bool)> for TransparencyEntry {
    fn from((modified, transparent): (i64, bool)) -> Self {
        Self {
            modified,
            transparent,
        }
    }
}

impl From<TransparencyEntry> for (i64, bool) {
    fn from(entry: TransparencyEntry) -> Self {
        (entry.modified, entry.transparent)
    }
}

/// Entries keyed by the texture's absolute file path.
pub type TransparencyEntries = HashMap<PathBuf, TransparencyEntry>;

/// Where the transparency cache lives between runs.
pub trait CacheStore: Send + Sync {
    /// Read every stored entry. An absent store yields an empty map.
    fn load(&self) -> Result<TransparencyEntries>;

    /// Replace the stored entries.
    fn persist(&self, entries: &TransparencyEntries) -> Result<()>;
}

/// A JSON file mapping texture paths to `[modified, transparent]`.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CacheStore for JsonFileStore {
    fn load(&self) -> Result<TransparencyEntries> {
        if !self.path.is_file() {
            return Ok(TransparencyEntries::new());
        }
        let contents = std::fs::read_to_string(&self.path).at_path(&self.path)?;
        let on_disk: BTreeMap<String, TransparencyEntry> = serde_json::from_str(&contents)
            .map_err(|e| {
                ResolverError::CacheStore(format!("corrupt {}: {}", self.path.display(), e))
            })?;
        Ok(on_disk
            .into_iter()
            .map(|(path, entry)| (PathBuf::from(path), entry))
            .collect())
    }

    fn persist(&self, entries: &TransparencyEntries) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).at_path(parent)?;
        }

        // Sorted keys keep the file diffable between runs.
        let on_disk: BTreeMap<String, TransparencyEntry> = entries
            .iter()
            .map(|(path, entry)| (path.to_string_lossy().into_owned(), *entry))
            .collect();
        let json = serde_json::to_string(&on_disk)?;

        // Write to a sibling file first so a crash never leaves a torn cache.
        let temp_path = self.path.with_extension("json.tmp");
        std::fs::write(&temp_path, json).at_path(&temp_path)?;
        std::fs::rename(&temp_path, &self.path).at_path(&self.path)?;
        Ok(())
    }
}

/// In-process store. Clones share the same entries.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<TransparencyEntries>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> TransparencyEntries {
        self.entries.lock().clone()
    }
}

impl CacheStore for MemoryStore {
    fn load(&self) -> Result<TransparencyEntries> {
        Ok(self.snapshot())
    }

    fn persist(&self, entries: &TransparencyEntries) -> Result<()> {
        *self.entries.lock() = entries.clone();
        Ok(())
    }
}
