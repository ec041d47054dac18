//! # Pack Stack
//!
//! Resolves textures, blockstates and models from an ordered stack of
//! Minecraft resource packs, where later packs override earlier ones key by
//! key, and caches what is expensive to derive from them.
//!
//! ## Overview
//!
//! - [`Pack`] describes one pack directory and whether its `pack.mcmeta` is usable.
//! - [`Resolver`] merges the stack into a [`ResourceIndex`], keeps a persistent
//!   mtime-keyed [`TransparencyCache`], and memoizes built models per entity.
//! - [`ModelBuilder`] is the seam for turning an entity into a model;
//!   [`BlockModelBuilder`] builds block quads from blockstates and models.
//!
//! ## Quick Start
//!
//! ```ignore
//! use pack_stack::{BlockModelBuilder, BlockState, FaceMode, Pack, Resolver};
//!
//! let packs = vec![Pack::open("packs/vanilla"), Pack::open("packs/faithful")];
//! let resolver = Resolver::new(packs, BlockModelBuilder)?;
//!
//! let glass = resolver.is_transparent("minecraft", "block/glass")?;
//! let mesh = resolver.get_model(&BlockState::new("minecraft:stone"), FaceMode::All)?;
//! ```
//!
//! ## Persisting transparency
//!
//! ```ignore
//! use pack_stack::{ResolverConfig, Resolver};
//!
//! let config = ResolverConfig::default().with_cache_path("cache/transparency_cache.json");
//! let resolver = Resolver::with_config(packs, config, BlockModelBuilder)?;
//! ```

pub mod builder;
pub mod cache;
pub mod error;
pub mod pack;
pub mod resolver;
pub mod resource_pack;
pub mod types;

// Re-export main types for convenience
pub use builder::{BlockMesh, BlockModelBuilder, ModelBuilder, Quad};
pub use cache::{CacheStore, JsonFileStore, MemoryStore, ModelCache, TransparencyCache, TransparencyEntry};
pub use error::{ResolverError, Result};
pub use pack::{DirectoryPackProvider, Pack, PackMetadata, PackProvider};
pub use resolver::{ReloadSummary, Resolver, ResolverConfig, ResolverOptions, ResourceView, SharedResolver};
pub use resource_pack::{ImageProbe, ResourceIndex, TextureLocation, TransparencyProbe};
pub use types::{BlockState, Direction, FaceMode, ResourceKey};
