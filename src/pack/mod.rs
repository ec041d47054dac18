//! Resource pack roots and their metadata.
//!
//! A [`Pack`] is an immutable description of one directory on disk. Opening a
//! pack never fails: a pack whose `pack.mcmeta` is missing or malformed is
//! simply marked invalid and skipped by the resolver. Use
//! [`validate_metadata`] directly when the reason matters.

use crate::error::{ResolverError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// File holding the pack format and description.
pub const METADATA_FILE: &str = "pack.mcmeta";

/// Optional pack icon.
pub const ICON_FILE: &str = "pack.png";

/// Why a pack's metadata could not be used.
#[derive(Error, Debug)]
pub enum PackMetadataError {
    #[error("{} not found", METADATA_FILE)]
    Missing,

    #[error("failed to read {}: {0}", METADATA_FILE)]
    Unreadable(#[source] std::io::Error),

    #[error("malformed {}: {0}", METADATA_FILE)]
    Malformed(#[source] serde_json::Error),

    #[error("{} has no pack.pack_format", METADATA_FILE)]
    MissingFormat,
}

/// Parsed contents of `pack.mcmeta`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackMetadata {
    pub format_version: u32,
    pub description: String,
}

#[derive(Deserialize)]
struct RawMcmeta {
    pack: Option<RawPackSection>,
}

#[derive(Deserialize)]
struct RawPackSection {
    pack_format: Option<u32>,
    #[serde(default)]
    description: Option<serde_json::Value>,
}

/// Read and validate the metadata file of a pack root.
pub fn validate_metadata(root: &Path) -> std::result::Result<PackMetadata, PackMetadataError> {
    let path = root.join(METADATA_FILE);
    if !path.is_file() {
        return Err(PackMetadataError::Missing);
    }

    let contents = std::fs::read_to_string(&path).map_err(PackMetadataError::Unreadable)?;
    let raw: RawMcmeta = serde_json::from_str(&contents).map_err(PackMetadataError::Malformed)?;
    let section = raw.pack.ok_or(PackMetadataError::MissingFormat)?;
    let format_version = section.pack_format.ok_or(PackMetadataError::MissingFormat)?;

    // Descriptions may be plain strings or text components.
    let description = match section.description {
        Some(serde_json::Value::String(s)) => s,
        Some(serde_json::Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    };

    Ok(PackMetadata {
        format_version,
        description,
    })
}

/// One resource pack root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pack {
    root: PathBuf,
    metadata: Option<PackMetadata>,
    icon: Option<PathBuf>,
}

impl Pack {
    /// Open a pack directory, reading its metadata once.
    pub fn open<P: AsRef<Path>>(root: P) -> Self {
        let root = root.as_ref().to_path_buf();

        if !root.is_dir() {
            warn!(root = %root.display(), "pack root is not a directory");
            return Self {
                root,
                metadata: None,
                icon: None,
            };
        }

        let metadata = match validate_metadata(&root) {
            Ok(metadata) => Some(metadata),
            Err(PackMetadataError::Missing) => {
                debug!(root = %root.display(), "no pack metadata, pack is invalid");
                None
            }
            Err(e) => {
                warn!(root = %root.display(), error = %e, "invalid pack metadata");
                None
            }
        };

        let icon = metadata
            .as_ref()
            .map(|_| root.join(ICON_FILE))
            .filter(|icon| icon.is_file());

        Self {
            root,
            metadata,
            icon,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn is_valid(&self) -> bool {
        self.metadata.is_some()
    }

    /// Pack format, or 0 for an invalid pack.
    pub fn format_version(&self) -> u32 {
        self.metadata.as_ref().map_or(0, |m| m.format_version)
    }

    pub fn description(&self) -> &str {
        self.metadata.as_ref().map_or("", |m| m.description.as_str())
    }

    pub fn icon(&self) -> Option<&Path> {
        self.icon.as_deref()
    }

    /// Directory containing the pack's namespaces.
    pub fn assets_dir(&self) -> PathBuf {
        self.root.join("assets")
    }
}

impl std::fmt::Display for Pack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Pack({})", self.root.display())
    }
}

/// Supplies a default pack when the configured stack is empty.
///
/// Implementations may fetch or extract a pack however they like; the
/// resolver itself never performs network I/O.
pub trait PackProvider {
    fn provide(&self) -> Result<Pack>;
}

/// Serves an already-extracted default pack from a directory.
#[derive(Debug, Clone)]
pub struct DirectoryPackProvider {
    root: PathBuf,
}

impl DirectoryPackProvider {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }
}

impl PackProvider for DirectoryPackProvider {
    fn provide(&self) -> Result<Pack> {
        if !self.root.is_dir() {
            return Err(ResolverError::InvalidConfiguration(format!(
                "default pack directory {} does not exist",
                self.root.display()
            )));
        }
        Ok(Pack::open(&self.root))
    }
}
