//! Persisted state for the armory weapon census.
//!
//! Two independent documents are kept behind an opaque
//! [`KeyValueStore`]:
//!
//! - [`ItemCacheStore`]: every item record fetched so far.
//! - [`GenerationStore`]: the legendary weapon catalogue used to build
//!   the generation table.

pub mod error;
pub mod generation;
pub mod item_cache;
pub mod kv;

pub use error::StoreError;
pub use generation::{GenerationStore, GENERATION_KEY};
pub use item_cache::{ItemCacheStore, ITEM_CACHE_KEY};
pub use kv::{FileStore, KeyValueStore, MemoryStore};
