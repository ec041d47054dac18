//! The pack-stack resolver.
//!
//! A [`Resolver`] owns an ordered list of packs (first = lowest priority),
//! the merged [`ResourceIndex`] built from them, the persistent
//! [`TransparencyCache`] and a [`ModelCache`] of built models.
//!
//! `reload()` rebuilds the index and refreshes transparency into fresh
//! state and swaps it in only once everything succeeded, so a failing reload
//! leaves the previous view untouched.

pub mod config;
pub mod shared;
pub mod view;

pub use config::{ResolverConfig, DEFAULT_MIN_PACK_FORMAT};
pub use shared::SharedResolver;
pub use view::ResourceView;

use crate::builder::{BlockModelBuilder, ModelBuilder};
use crate::cache::{CacheStore, JsonFileStore, MemoryStore, ModelCache, Refresh, TransparencyCache};
use crate::error::{ResolverError, Result};
use crate::pack::{Pack, PackProvider};
use crate::resource_pack::{scan_pack, ImageProbe, ResourceIndex, ScanOptions, TransparencyProbe};
use crate::types::{FaceMode, ResourceKey};
use tracing::{debug, info, warn};

/// Cache key for built models. The face mode is only set when
/// [`ResolverConfig::key_models_by_face_mode`] is on.
type ModelKey<E> = (E, Option<FaceMode>);

/// Counts from one successful reload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReloadSummary {
    pub packs_loaded: usize,
    pub packs_skipped: usize,
    pub textures_recomputed: usize,
    pub textures_reused: usize,
}

/// Everything `reload()` rebuilds, prepared before anything is swapped in.
pub(crate) struct LoadedState {
    index: ResourceIndex,
    transparency: TransparencyCache,
    summary: ReloadSummary,
}

/// Options for constructing a [`Resolver`] with non-default collaborators.
pub struct ResolverOptions {
    config: ResolverConfig,
    store: Option<Box<dyn CacheStore>>,
    probe: Option<Box<dyn TransparencyProbe>>,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl ResolverOptions {
    pub fn new() -> Self {
        Self {
            config: ResolverConfig::default(),
            store: None,
            probe: None,
        }
    }

    pub fn with_config(mut self, config: ResolverConfig) -> Self {
        self.config = config;
        self
    }

    /// Use this store instead of the one implied by `config.cache_path`.
    pub fn with_store(mut self, store: Box<dyn CacheStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn with_probe(mut self, probe: Box<dyn TransparencyProbe>) -> Self {
        self.probe = Some(probe);
        self
    }

    /// Build a resolver over `packs` and run the initial reload.
    pub fn open<B: ModelBuilder>(self, packs: Vec<Pack>, builder: B) -> Result<Resolver<B>> {
        if packs.is_empty() {
            return Err(ResolverError::InvalidConfiguration(
                "pack stack is empty and no fallback pack was provided".to_string(),
            ));
        }

        let store: Box<dyn CacheStore> = match (self.store, &self.config.cache_path) {
            (Some(store), _) => store,
            (None, Some(path)) => Box::new(JsonFileStore::new(path)),
            (None, None) => Box::new(MemoryStore::new()),
        };
        let probe = self.probe.unwrap_or_else(|| Box::new(ImageProbe));

        let mut resolver = Resolver {
            packs,
            config: self.config,
            store,
            probe,
            builder,
            index: ResourceIndex::new(),
            transparency: TransparencyCache::new(),
            models: ModelCache::new(),
        };
        resolver.reload()?;
        Ok(resolver)
    }

    /// Like [`open`](Self::open), asking `provider` for a default pack when
    /// `packs` is empty.
    pub fn open_with_fallback<B: ModelBuilder>(
        self,
        packs: Vec<Pack>,
        provider: &dyn PackProvider,
        builder: B,
    ) -> Result<Resolver<B>> {
        if !packs.is_empty() {
            return self.open(packs, builder);
        }

        let pack = provider.provide().map_err(|e| {
            ResolverError::InvalidConfiguration(format!("default pack unavailable: {}", e))
        })?;
        if !pack.is_valid() {
            return Err(ResolverError::InvalidConfiguration(format!(
                "default pack at {} has no usable {}",
                pack.root().display(),
                crate::pack::METADATA_FILE
            )));
        }
        info!(pack = %pack.root().display(), "using default pack");
        self.open(vec![pack], builder)
    }
}

/// Resolves resources and models from an ordered stack of packs.
pub struct Resolver<B: ModelBuilder = BlockModelBuilder> {
    packs: Vec<Pack>,
    config: ResolverConfig,
    store: Box<dyn CacheStore>,
    probe: Box<dyn TransparencyProbe>,
    builder: B,
    index: ResourceIndex,
    transparency: TransparencyCache,
    models: ModelCache<ModelKey<B::Entity>, B::Model>,
}

impl<B: ModelBuilder> std::fmt::Debug for Resolver<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolver")
            .field("packs", &self.packs)
            .field("config", &self.config)
            .field("textures", &self.index.texture_count())
            .field("models", &self.models.len())
            .finish()
    }
}

impl<B: ModelBuilder> Resolver<B> {
    /// Create a resolver with default configuration.
    pub fn new(packs: Vec<Pack>, builder: B) -> Result<Self> {
        ResolverOptions::new().open(packs, builder)
    }

    /// Create a resolver over a single pack.
    pub fn single(pack: Pack, builder: B) -> Result<Self> {
        Self::new(vec![pack], builder)
    }

    /// Create a resolver, falling back to `provider` when `packs` is empty.
    pub fn with_fallback(packs: Vec<Pack>, provider: &dyn PackProvider, builder: B) -> Result<Self> {
        ResolverOptions::new().open_with_fallback(packs, provider, builder)
    }

    /// Create a resolver with custom configuration.
    pub fn with_config(packs: Vec<Pack>, config: ResolverConfig, builder: B) -> Result<Self> {
        ResolverOptions::new().with_config(config).open(packs, builder)
    }

    /// Create a resolver whose transparency cache lives in `store`.
    pub fn with_store(
        packs: Vec<Pack>,
        config: ResolverConfig,
        store: Box<dyn CacheStore>,
        builder: B,
    ) -> Result<Self> {
        ResolverOptions::new()
            .with_config(config)
            .with_store(store)
            .open(packs, builder)
    }

    pub fn packs(&self) -> &[Pack] {
        &self.packs
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    pub fn index(&self) -> &ResourceIndex {
        &self.index
    }

    pub fn transparency(&self) -> &TransparencyCache {
        &self.transparency
    }

    pub fn builder(&self) -> &B {
        &self.builder
    }

    /// Number of models built since the last reload.
    pub fn cached_models(&self) -> usize {
        self.models.len()
    }

    pub fn view(&self) -> ResourceView<'_> {
        ResourceView::new(&self.index, &self.transparency)
    }

    /// Rebuild the index from every pack and refresh transparency.
    ///
    /// On error nothing changes: the previous index, transparency cache and
    /// built models all stay in place.
    pub fn reload(&mut self) -> Result<ReloadSummary> {
        let state = self.load_state()?;
        Ok(self.install(state))
    }

    pub(crate) fn load_state(&self) -> Result<LoadedState> {
        let mut transparency = TransparencyCache::load(self.store.as_ref());
        let mut index = ResourceIndex::new();
        let mut summary = ReloadSummary::default();
        let options = ScanOptions {
            skipped_texture_dirs: self.config.skipped_texture_dirs.clone(),
        };

        for pack in &self.packs {
            if !pack.is_valid() {
                warn!(pack = %pack.root().display(), "skipping invalid pack");
                summary.packs_skipped += 1;
                continue;
            }
            if pack.format_version() < self.config.min_pack_format {
                warn!(
                    pack = %pack.root().display(),
                    format = pack.format_version(),
                    min_format = self.config.min_pack_format,
                    "skipping pack with unsupported format"
                );
                summary.packs_skipped += 1;
                continue;
            }

            let assets = scan_pack(pack, &options)?;
            let mut recomputed = 0;
            for (_, path) in &assets.textures {
                match transparency.refresh(path, self.probe.as_ref())? {
                    Refresh::Recomputed => recomputed += 1,
                    Refresh::Reused => summary.textures_reused += 1,
                }
            }
            summary.textures_recomputed += recomputed;
            index.apply(&assets);
            summary.packs_loaded += 1;

            debug!(
                pack = %pack.root().display(),
                textures = assets.textures.len(),
                blockstates = assets.blockstates.len(),
                models = assets.models.len(),
                recomputed,
                "indexed pack"
            );
        }

        if let Err(e) = transparency.persist(self.store.as_ref()) {
            warn!(error = %e, "failed to persist transparency cache");
        }

        index.load_descriptors()?;

        Ok(LoadedState {
            index,
            transparency,
            summary,
        })
    }

    pub(crate) fn install(&mut self, state: LoadedState) -> ReloadSummary {
        self.index = state.index;
        self.transparency = state.transparency;
        self.models.clear();

        let summary = state.summary;
        info!(
            packs = summary.packs_loaded,
            skipped = summary.packs_skipped,
            textures = self.index.texture_count(),
            blockstates = self.index.blockstate_count(),
            models = self.index.model_count(),
            recomputed = summary.textures_recomputed,
            reused = summary.textures_reused,
            "reloaded pack stack"
        );
        summary
    }

    /// Whether the texture `namespace:path` has any non-opaque pixel.
    ///
    /// Fails with [`ResolverError::ResourceNotFound`] for keys no pack defines.
    pub fn is_transparent(&self, namespace: &str, path: &str) -> Result<bool> {
        self.view().is_transparent(&ResourceKey::new(namespace, path))
    }

    /// Return the model for `entity`, building it on first request.
    ///
    /// Every call returns an independent copy. Build failures are returned
    /// as-is and not cached.
    pub fn get_model(&self, entity: &B::Entity, face_mode: FaceMode) -> Result<B::Model> {
        let key = (
            entity.clone(),
            self.config.key_models_by_face_mode.then_some(face_mode),
        );
        if self.models.contains(&key) {
            debug!(entity = ?entity, "model cache hit");
        }
        let view = self.view();
        self.models.get_or_try_build(key, || {
            debug!(entity = ?entity, ?face_mode, "model cache miss");
            self.builder
                .build(&view, entity, face_mode)
                .map_err(|e| {
                    warn!(entity = ?entity, error = %e, "model build failed");
                    e
                })
        })
    }
}
