//! Caches owned by the resolver.
//!
//! - [`TransparencyCache`]: per-texture transparency, persisted through a
//!   [`CacheStore`] and invalidated by modification time.
//! - [`ModelCache`]: built models, memoized per entity for the lifetime of the
//!   current pack view.

pub mod model;
pub mod store;
pub mod transparency;

pub use model::ModelCache;
pub use store::{CacheStore, JsonFileStore, MemoryStore, TransparencyEntries, TransparencyEntry};
pub use transparency::{Refresh, TransparencyCache};
