//! A resolver that can be reloaded while other threads read from it.

use super::{ReloadSummary, Resolver};
use crate::builder::{BlockModelBuilder, ModelBuilder};
use crate::error::Result;
use crate::types::FaceMode;
use parking_lot::{Mutex, RwLock, RwLockReadGuard};

/// Thread-safe handle around a [`Resolver`].
///
/// Reloads scan the packs under a read lock, so lookups keep being served
/// from the old view, and only take the write lock to swap the new state in.
/// Reloads themselves are serialized.
pub struct SharedResolver<B: ModelBuilder = BlockModelBuilder> {
    inner: RwLock<Resolver<B>>,
    reloading: Mutex<()>,
}

impl<B: ModelBuilder> SharedResolver<B> {
    pub fn new(resolver: Resolver<B>) -> Self {
        Self {
            inner: RwLock::new(resolver),
            reloading: Mutex::new(()),
        }
    }

    pub fn reload(&self) -> Result<ReloadSummary> {
        let _reloading = self.reloading.lock();
        let state = self.inner.read().load_state()?;
        Ok(self.inner.write().install(state))
    }

    pub fn get_model(&self, entity: &B::Entity, face_mode: FaceMode) -> Result<B::Model> {
        self.inner.read().get_model(entity, face_mode)
    }

    pub fn is_transparent(&self, namespace: &str, path: &str) -> Result<bool> {
        self.inner.read().is_transparent(namespace, path)
    }

    /// Borrow the current resolver. Reload swaps block while this is held.
    pub fn read(&self) -> RwLockReadGuard<'_, Resolver<B>> {
        self.inner.read()
    }

    pub fn into_inner(self) -> Resolver<B> {
        self.inner.into_inner()
    }
}

impl<B: ModelBuilder> From<Resolver<B>> for SharedResolver<B> {
    fn from(resolver: Resolver<B>) -> Self {
        Self::new(resolver)
    }
}
