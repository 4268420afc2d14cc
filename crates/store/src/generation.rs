//! Persistence of the legendary weapon catalogue.
//!
//! Only the weapon records are stored; the generation partition is
//! re-derived from them on every load so that the range table stays the
//! single source of truth.

use std::sync::Arc;

use armory_core::item::ItemRecord;

use crate::error::StoreError;
use crate::kv::KeyValueStore;

/// Store key of the legendary weapon catalogue document.
pub const GENERATION_KEY: &str = "legendaryItems";

/// Reads and writes the legendary weapon catalogue.
#[derive(Clone)]
pub struct GenerationStore {
    store: Arc<dyn KeyValueStore>,
}

impl GenerationStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// The persisted catalogue, or `None` when nothing has been stored yet.
    pub async fn load(&self) -> Result<Option<Vec<ItemRecord>>, StoreError> {
        match self.store.get(GENERATION_KEY).await? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    pub async fn save(&self, records: &[ItemRecord]) -> Result<(), StoreError> {
        let json = serde_json::to_string(records)?;
        self.store.put(GENERATION_KEY, &json).await?;
        tracing::info!(weapons = records.len(), "Persisted legendary weapon catalogue");
        Ok(())
    }
}
