//! Persistence of the item detail cache.
//!
//! The cache is stored as one JSON array of item records under
//! [`ITEM_CACHE_KEY`] and replaced wholesale on every persist.

use std::sync::Arc;

use armory_core::item::ItemRecord;
use armory_core::item_cache::ItemCache;

use crate::error::StoreError;
use crate::kv::KeyValueStore;

/// Store key of the item cache document.
pub const ITEM_CACHE_KEY: &str = "itemCache";

/// Loads and persists the [`ItemCache`].
#[derive(Clone)]
pub struct ItemCacheStore {
    store: Arc<dyn KeyValueStore>,
}

impl ItemCacheStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Load the persisted cache.
    ///
    /// Never fails: a missing document yields an empty cache, and an
    /// unreadable or corrupt one is logged and also yields an empty cache.
    pub async fn load(&self) -> ItemCache {
        let raw = match self.store.get(ITEM_CACHE_KEY).await {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                tracing::info!("No persisted item cache, starting empty");
                return ItemCache::new();
            }
            Err(e) => {
                tracing::warn!(error = %e, "Not using item cache, read failed");
                return ItemCache::new();
            }
        };

        match serde_json::from_str::<Vec<ItemRecord>>(&raw) {
            Ok(records) => {
                let cache = ItemCache::from_records(records);
                tracing::info!(items = cache.len(), "Loaded items from cache");
                cache
            }
            Err(e) => {
                tracing::warn!(error = %e, "Not using item cache, document is corrupt");
                ItemCache::new()
            }
        }
    }

    /// Write the whole cache, replacing prior contents.
    pub async fn persist(&self, cache: &ItemCache) -> Result<(), StoreError> {
        let json = serde_json::to_string(&cache.to_records())?;
        self.store.put(ITEM_CACHE_KEY, &json).await?;
        tracing::info!(items = cache.len(), "Persisted item cache");
        Ok(())
    }
}
