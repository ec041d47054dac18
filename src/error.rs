//! Error types for the pack stack resolver.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias using ResolverError.
pub type Result<T> = std::result::Result<T, ResolverError>;

/// Which kind of descriptor failed to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescriptorKind {
    Blockstate,
    Model,
}

impl std::fmt::Display for DescriptorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DescriptorKind::Blockstate => write!(f, "blockstate"),
            DescriptorKind::Model => write!(f, "model"),
        }
    }
}

/// Main error type for pack resolution.
#[derive(Error, Debug)]
pub enum ResolverError {
    /// Failed to parse JSON data.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Failed to read or decode an image.
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A file or directory inside a pack could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    ResourceIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The pack stack cannot be used (empty with no fallback, bad fallback).
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A blockstate or model file in one of the packs is malformed.
    #[error("Failed to parse {kind} {key} ({}): {source}", path.display())]
    DescriptorParse {
        kind: DescriptorKind,
        key: String,
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Lookup of a key that was never registered.
    #[error("Resource not found: {0}")]
    ResourceNotFound(String),

    /// Failed to resolve a block model.
    #[error("Model resolution error: {0}")]
    ModelResolution(String),

    /// Failed to resolve a blockstate.
    #[error("Blockstate resolution error: {0}")]
    BlockstateResolution(String),

    /// Model inheritance chain too deep (circular reference protection).
    #[error("Model inheritance too deep (possible circular reference): {0}")]
    ModelInheritanceTooDeep(String),

    /// The persisted transparency cache could not be read or written.
    #[error("Cache store error: {0}")]
    CacheStore(String),
}

impl ResolverError {
    /// Whether this error came from the model builder and may succeed on retry.
    pub fn is_model_resolution(&self) -> bool {
        matches!(
            self,
            ResolverError::ModelResolution(_)
                | ResolverError::BlockstateResolution(_)
                | ResolverError::ModelInheritanceTooDeep(_)
        )
    }
}

/// Attach the offending path to an I/O result.
pub(crate) trait IoResultExt<T> {
    fn at_path(self, path: &Path) -> Result<T>;
}

impl<T> IoResultExt<T> for std::io::Result<T> {
    fn at_path(self, path: &Path) -> Result<T> {
        self.map_err(|source| ResolverError::ResourceIo {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_parse_message_names_file() {
        let source = serde_json::from_str::<serde_json::Value>("{ nope").unwrap_err();
        let err = ResolverError::DescriptorParse {
            kind: DescriptorKind::Model,
            key: "minecraft:block/stone".to_string(),
            path: PathBuf::from("/packs/a/assets/minecraft/models/block/stone.json"),
            source,
        };
        let msg = err.to_string();
        assert!(msg.contains("model minecraft:block/stone"));
        assert!(msg.contains("stone.json"));
    }

    #[test]
    fn test_io_error_names_path() {
        let path = PathBuf::from("/packs/a/assets/minecraft/textures/block/ghost.png");
        let result: std::io::Result<()> =
            Err(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        let msg = result.at_path(&path).unwrap_err().to_string();
        assert!(msg.contains("ghost.png"));
        assert!(msg.contains("gone"));
    }

    #[test]
    fn test_model_resolution_classification() {
        assert!(ResolverError::ModelResolution("x".into()).is_model_resolution());
        assert!(ResolverError::BlockstateResolution("x".into()).is_model_resolution());
        assert!(!ResolverError::ResourceNotFound("x".into()).is_model_resolution());
    }
}
