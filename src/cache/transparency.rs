//! Modification-time keyed cache of texture transparency.
//!
//! Entries are keyed by the texture's file path, not its resource key, so the
//! same relative path in two packs is tracked separately. An entry is only
//! trusted while its recorded modification time matches the file's.

use super::store::{CacheStore, TransparencyEntries, TransparencyEntry};
use crate::error::{IoResultExt, ResolverError, Result};
use crate::resource_pack::TransparencyProbe;
use std::path::Path;
use std::time::SystemTime;
use tracing::{debug, warn};

/// Whether [`TransparencyCache::refresh`] had to probe the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refresh {
    Reused,
    Recomputed,
}

#[derive(Debug, Clone, Default)]
pub struct TransparencyCache {
    entries: TransparencyEntries,
}

impl TransparencyCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from a store, starting empty if the store is absent or corrupt.
    pub fn load(store: &dyn CacheStore) -> Self {
        match store.load() {
            Ok(entries) => {
                debug!(entries = entries.len(), "loaded transparency cache");
                Self { entries }
            }
            Err(e) => {
                warn!(error = %e, "discarding unreadable transparency cache");
                Self::default()
            }
        }
    }

    /// Write every entry back to the store.
    pub fn persist(&self, store: &dyn CacheStore) -> Result<()> {
        store.persist(&self.entries)
    }

    /// Bring the entry for `path` up to date with the file on disk.
    ///
    /// A file that cannot be decoded is recorded as opaque so it is not
    /// probed again until it changes.
    pub fn refresh(&mut self, path: &Path, probe: &dyn TransparencyProbe) -> Result<Refresh> {
        let modified = modified_nanos(path)?;
        if self
            .entries
            .get(path)
            .is_some_and(|entry| entry.modified == modified)
        {
            return Ok(Refresh::Reused);
        }

        let transparent = probe.probe(path).unwrap_or_else(|e| {
            warn!(path = %path.display(), error = %e, "failed to decode texture, treating as opaque");
            false
        });
        self.entries.insert(
            path.to_path_buf(),
            TransparencyEntry {
                modified,
                transparent,
            },
        );
        Ok(Refresh::Recomputed)
    }

    /// Last known answer for a texture file.
    pub fn get(&self, path: &Path) -> Option<bool> {
        self.entries.get(path).map(|entry| entry.transparent)
    }

    pub fn entry(&self, path: &Path) -> Option<&TransparencyEntry> {
        self.entries.get(path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Modification time of a file in nanoseconds relative to the UNIX epoch.
///
/// Times before 1970 come out negative so they stay distinct.
pub fn modified_nanos(path: &Path) -> Result<i64> {
    let modified = std::fs::metadata(path)
        .and_then(|meta| meta.modified())
        .at_path(path)?;
    let nanos = match modified.duration_since(SystemTime::UNIX_EPOCH) {
        Ok(after) => i64::try_from(after.as_nanos()).ok(),
        Err(before) => i64::try_from(before.duration().as_nanos())
            .ok()
            .map(|n| -n),
    };
    nanos.ok_or_else(|| {
        ResolverError::CacheStore(format!(
            "modification time of {} is out of range",
            path.display()
        ))
    })
}
