//! In-memory memoization of item detail records.
//!
//! [`ItemCache`] is a plain id → record map with no eviction or TTL:
//! once an id is present it is never fetched again. Loading and
//! persisting the cache is the job of the store layer; this type only
//! owns the lookup and merge rules.

use std::collections::{BTreeSet, HashMap};

use crate::item::ItemRecord;
use crate::types::ItemId;

/// Local memoization of [`ItemRecord`]s keyed by item id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemCache {
    items: HashMap<ItemId, ItemRecord>,
}

/// Result of splitting a set of ids against the cache.
#[derive(Debug, Clone, Default)]
pub struct CacheLookup {
    /// Records already known locally.
    pub hits: ItemCache,
    /// Ids that must be fetched from the remote source.
    pub misses: BTreeSet<ItemId>,
}

impl ItemCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cache from persisted records. A later record with the same
    /// id replaces an earlier one.
    pub fn from_records(records: impl IntoIterator<Item = ItemRecord>) -> Self {
        let mut cache = Self::new();
        cache.merge(records);
        cache
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: ItemId) -> Option<&ItemRecord> {
        self.items.get(&id)
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.items.contains_key(&id)
    }

    /// Split `ids` into records already cached and ids still missing.
    pub fn lookup(&self, ids: &BTreeSet<ItemId>) -> CacheLookup {
        let mut lookup = CacheLookup::default();
        for &id in ids {
            match self.items.get(&id) {
                Some(record) => {
                    lookup.hits.items.insert(id, record.clone());
                }
                None => {
                    lookup.misses.insert(id);
                }
            }
        }
        lookup
    }

    /// Upsert records by id. Returns how many ids were not present before.
    ///
    /// Merging the same record twice leaves the cache unchanged the second
    /// time.
    pub fn merge(&mut self, records: impl IntoIterator<Item = ItemRecord>) -> usize {
        let mut added = 0;
        for record in records {
            if self.items.insert(record.id, record).is_none() {
                added += 1;
            }
        }
        added
    }

    /// All records ordered by id, the form written to persistent storage.
    pub fn to_records(&self) -> Vec<ItemRecord> {
        let mut records: Vec<ItemRecord> = self.items.values().cloned().collect();
        records.sort_by_key(|r| r.id);
        records
    }
}
