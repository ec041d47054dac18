//! Resolver configuration.

use std::path::PathBuf;

/// Oldest pack format the resolver will index.
pub const DEFAULT_MIN_PACK_FORMAT: u32 = 2;

/// Configuration for a [`Resolver`](super::Resolver).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Packs with a lower `pack_format` are skipped during reload.
    pub min_pack_format: u32,
    /// Texture subtrees that never hold block or item textures.
    pub skipped_texture_dirs: Vec<String>,
    /// Where the transparency cache is persisted. `None` keeps it in memory.
    pub cache_path: Option<PathBuf>,
    /// Key built models by `(entity, face mode)` instead of entity alone.
    ///
    /// Off by default: the first face mode requested for an entity is the
    /// one every later call receives.
    pub key_models_by_face_mode: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            min_pack_format: DEFAULT_MIN_PACK_FORMAT,
            skipped_texture_dirs: vec!["gui".to_string(), "font".to_string()],
            cache_path: None,
            key_models_by_face_mode: false,
        }
    }
}

impl ResolverConfig {
    pub fn with_min_pack_format(mut self, min_pack_format: u32) -> Self {
        self.min_pack_format = min_pack_format;
        self
    }

    pub fn with_skipped_texture_dirs<I, S>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skipped_texture_dirs = dirs.into_iter().map(Into::into).collect();
        self
    }

    /// Persist the transparency cache as JSON at `path`.
    pub fn with_cache_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.cache_path = Some(path.into());
        self
    }

    pub fn with_models_keyed_by_face_mode(mut self, enabled: bool) -> Self {
        self.key_models_by_face_mode = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ResolverConfig::default();
        assert_eq!(config.min_pack_format, 2);
        assert_eq!(config.skipped_texture_dirs, vec!["gui", "font"]);
        assert!(config.cache_path.is_none());
        assert!(!config.key_models_by_face_mode);
    }

    #[test]
    fn test_builder_methods() {
        let config = ResolverConfig::default()
            .with_min_pack_format(4)
            .with_skipped_texture_dirs(["gui"])
            .with_cache_path("/tmp/transparency_cache.json")
            .with_models_keyed_by_face_mode(true);
        assert_eq!(config.min_pack_format, 4);
        assert_eq!(config.skipped_texture_dirs, vec!["gui"]);
        assert_eq!(config.cache_path, Some(PathBuf::from("/tmp/transparency_cache.json")));
        assert!(config.key_models_by_face_mode);
    }
}
