//! Read-only access to the resolver's current state.

use crate::cache::TransparencyCache;
use crate::error::{ResolverError, Result};
use crate::resource_pack::texture::placeholder_texture;
use crate::resource_pack::{BlockModel, BlockstateDefinition, ResourceIndex, TextureLocation};
use crate::types::ResourceKey;
use image::RgbaImage;

/// What a [`ModelBuilder`](crate::builder::ModelBuilder) gets to see.
#[derive(Debug, Clone, Copy)]
pub struct ResourceView<'a> {
    index: &'a ResourceIndex,
    transparency: &'a TransparencyCache,
}

impl<'a> ResourceView<'a> {
    pub fn new(index: &'a ResourceIndex, transparency: &'a TransparencyCache) -> Self {
        Self {
            index,
            transparency,
        }
    }

    pub fn index(&self) -> &'a ResourceIndex {
        self.index
    }

    pub fn texture_location(&self, key: &ResourceKey) -> Option<&'a TextureLocation> {
        self.index.texture_location(key)
    }

    /// Like [`texture_location`](Self::texture_location) but falls back to
    /// the missing texture.
    pub fn resolve_texture(&self, key: &ResourceKey) -> &'a TextureLocation {
        self.index.resolve_texture(key)
    }

    /// Decode the texture for `key`, using the placeholder for missing ones.
    pub fn load_texture(&self, key: &ResourceKey) -> Result<RgbaImage> {
        match self.resolve_texture(key) {
            TextureLocation::File(path) => Ok(image::open(path)?.to_rgba8()),
            TextureLocation::Missing => Ok(placeholder_texture()),
        }
    }

    pub fn blockstate(&self, key: &ResourceKey) -> Option<&'a BlockstateDefinition> {
        self.index.blockstate(key)
    }

    pub fn model(&self, key: &ResourceKey) -> Option<&'a BlockModel> {
        self.index.model(key)
    }

    /// Whether the texture registered for `key` has any non-opaque pixel.
    ///
    /// Unregistered keys are an error, not a fallback.
    pub fn is_transparent(&self, key: &ResourceKey) -> Result<bool> {
        match self.index.texture_location(key) {
            Some(TextureLocation::Missing) => Ok(false),
            Some(TextureLocation::File(path)) => self.transparency.get(path).ok_or_else(|| {
                ResolverError::ResourceNotFound(format!(
                    "no transparency entry for {} ({})",
                    key,
                    path.display()
                ))
            }),
            None => Err(ResolverError::ResourceNotFound(format!("texture {}", key))),
        }
    }
}
