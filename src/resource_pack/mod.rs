//! The merged view over a stack of packs.
//!
//! [`ResourceIndex`] maps resource keys to the file that wins for them. It is
//! filled pack by pack in stack order, so inserting a key that is already
//! present replaces it: the last pack to define a key owns it.

pub mod blockstate;
pub mod loader;
pub mod model;
pub mod texture;

pub use blockstate::{BlockstateDefinition, ModelVariant, MultipartCase, MultipartCondition};
pub use loader::{scan_pack, PackAssets, ScanOptions};
pub use model::{BlockModel, ModelElement, ModelFace};
pub use texture::{ImageProbe, TransparencyProbe};

use crate::error::{DescriptorKind, IoResultExt, ResolverError, Result};
use crate::types::ResourceKey;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Path of the built-in fallback texture.
pub const MISSING_TEXTURE_PATH: &str = "missing_no";

/// Key of the built-in fallback texture, present in every index.
pub fn missing_texture_key() -> ResourceKey {
    ResourceKey::new(crate::types::DEFAULT_NAMESPACE, MISSING_TEXTURE_PATH)
}

/// Where a texture's pixels come from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TextureLocation {
    /// A PNG inside one of the packs.
    File(PathBuf),
    /// The built-in missing texture.
    Missing,
}

impl TextureLocation {
    pub fn path(&self) -> Option<&Path> {
        match self {
            TextureLocation::File(path) => Some(path),
            TextureLocation::Missing => None,
        }
    }
}

/// Override-merged index of textures, blockstates and models.
#[derive(Debug, Clone)]
pub struct ResourceIndex {
    textures: HashMap<ResourceKey, TextureLocation>,
    blockstate_files: HashMap<ResourceKey, PathBuf>,
    model_files: HashMap<ResourceKey, PathBuf>,
    blockstates: HashMap<ResourceKey, BlockstateDefinition>,
    models: HashMap<ResourceKey, BlockModel>,
}

impl Default for ResourceIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceIndex {
    /// An index holding only the missing texture.
    pub fn new() -> Self {
        let mut textures = HashMap::new();
        textures.insert(missing_texture_key(), TextureLocation::Missing);
        Self {
            textures,
            blockstate_files: HashMap::new(),
            model_files: HashMap::new(),
            blockstates: HashMap::new(),
            models: HashMap::new(),
        }
    }

    /// Merge one pack's assets on top of what is already indexed.
    pub fn apply(&mut self, assets: &PackAssets) {
        for (key, path) in &assets.textures {
            self.textures
                .insert(key.clone(), TextureLocation::File(path.clone()));
        }
        for (key, path) in &assets.blockstates {
            self.blockstate_files.insert(key.clone(), path.clone());
        }
        for (key, path) in &assets.models {
            self.model_files.insert(key.clone(), path.clone());
        }
    }

    /// Decode every indexed blockstate and model file.
    ///
    /// The first malformed file aborts with an error naming its key and path.
    pub fn load_descriptors(&mut self) -> Result<()> {
        let mut blockstates = HashMap::with_capacity(self.blockstate_files.len());
        for (key, path) in &self.blockstate_files {
            let def = decode_descriptor(DescriptorKind::Blockstate, key, path)?;
            blockstates.insert(key.clone(), def);
        }

        let mut models = HashMap::with_capacity(self.model_files.len());
        for (key, path) in &self.model_files {
            let model = decode_descriptor(DescriptorKind::Model, key, path)?;
            models.insert(key.clone(), model);
        }

        self.blockstates = blockstates;
        self.models = models;
        Ok(())
    }

    /// The texture registered for a key, if any.
    pub fn texture_location(&self, key: &ResourceKey) -> Option<&TextureLocation> {
        self.textures.get(key)
    }

    /// The texture registered for a key, or the missing texture.
    pub fn resolve_texture(&self, key: &ResourceKey) -> &TextureLocation {
        self.textures
            .get(key)
            .unwrap_or(&TextureLocation::Missing)
    }

    pub fn blockstate_path(&self, key: &ResourceKey) -> Option<&Path> {
        self.blockstate_files.get(key).map(PathBuf::as_path)
    }

    pub fn model_path(&self, key: &ResourceKey) -> Option<&Path> {
        self.model_files.get(key).map(PathBuf::as_path)
    }

    pub fn blockstate(&self, key: &ResourceKey) -> Option<&BlockstateDefinition> {
        self.blockstates.get(key)
    }

    pub fn model(&self, key: &ResourceKey) -> Option<&BlockModel> {
        self.models.get(key)
    }

    /// All texture files currently winning for some key.
    pub fn texture_files(&self) -> impl Iterator<Item = (&ResourceKey, &Path)> {
        self.textures
            .iter()
            .filter_map(|(key, location)| location.path().map(|path| (key, path)))
    }

    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    pub fn blockstate_count(&self) -> usize {
        self.blockstate_files.len()
    }

    pub fn model_count(&self) -> usize {
        self.model_files.len()
    }

    /// Sorted list of namespaces with at least one resource.
    pub fn namespaces(&self) -> Vec<&str> {
        let mut namespaces: Vec<_> = self
            .textures
            .keys()
            .chain(self.blockstate_files.keys())
            .chain(self.model_files.keys())
            .map(|key| key.namespace())
            .collect();
        namespaces.sort_unstable();
        namespaces.dedup();
        namespaces
    }
}

fn decode_descriptor<T: serde::de::DeserializeOwned>(
    kind: DescriptorKind,
    key: &ResourceKey,
    path: &Path,
) -> Result<T> {
    let contents = std::fs::read(path).at_path(path)?;
    serde_json::from_slice(&contents).map_err(|source| ResolverError::DescriptorParse {
        kind,
        key: key.to_string(),
        path: path.to_path_buf(),
        source,
    })
}
