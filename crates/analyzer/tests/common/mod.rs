//! Shared fixtures: an in-memory [`RemoteDataSource`] that records every
//! call and can be told to fail.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use armory_core::equipment::EquipmentTab;
use armory_core::item::ItemRecord;
use armory_core::types::ItemId;
use armory_gw2::{Gw2ApiError, RemoteDataSource};
use armory_store::{KeyValueStore, StoreError};

/// Scripted remote source.
#[derive(Default)]
pub struct FakeSource {
    characters: Vec<String>,
    tabs: HashMap<String, Value>,
    items: HashMap<ItemId, ItemRecord>,
    legendary_ids: Vec<ItemId>,
    failing_characters: HashSet<String>,
    panicking_characters: HashSet<String>,
    fail_character_list: bool,
    fail_items: bool,
    fail_legendary: bool,

    character_list_calls: AtomicUsize,
    equipment_calls: AtomicUsize,
    legendary_calls: AtomicUsize,
    item_batches: Mutex<Vec<Vec<ItemId>>>,
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a character whose `equipmenttabs` payload is `tabs`.
    pub fn character(mut self, name: &str, tabs: Value) -> Self {
        self.characters.push(name.to_string());
        self.tabs.insert(name.to_string(), tabs);
        self
    }

    /// Add a character whose equipment request fails.
    pub fn failing_character(mut self, name: &str) -> Self {
        self.characters.push(name.to_string());
        self.failing_characters.insert(name.to_string());
        self
    }

    /// Add a character whose equipment request panics.
    pub fn panicking_character(mut self, name: &str) -> Self {
        self.characters.push(name.to_string());
        self.panicking_characters.insert(name.to_string());
        self
    }

    pub fn item(mut self, record: ItemRecord) -> Self {
        self.items.insert(record.id, record);
        self
    }

    /// Register ids listed by `legendaryarmory`. Their records must be
    /// added with [`item`](Self::item).
    pub fn legendary(mut self, ids: &[ItemId]) -> Self {
        self.legendary_ids.extend_from_slice(ids);
        self
    }

    pub fn fail_character_list(mut self) -> Self {
        self.fail_character_list = true;
        self
    }

    pub fn fail_items(mut self) -> Self {
        self.fail_items = true;
        self
    }

    pub fn fail_legendary(mut self) -> Self {
        self.fail_legendary = true;
        self
    }

    // -- call inspection ------------------------------------------------------

    /// Total number of remote calls of any kind.
    pub fn total_calls(&self) -> usize {
        self.character_list_calls.load(Ordering::SeqCst)
            + self.equipment_calls.load(Ordering::SeqCst)
            + self.legendary_calls.load(Ordering::SeqCst)
            + self.item_batches().len()
    }

    pub fn equipment_calls(&self) -> usize {
        self.equipment_calls.load(Ordering::SeqCst)
    }

    pub fn legendary_calls(&self) -> usize {
        self.legendary_calls.load(Ordering::SeqCst)
    }

    /// Every `items` call, each as the sorted ids it asked for.
    pub fn item_batches(&self) -> Vec<Vec<ItemId>> {
        self.item_batches.lock().unwrap().clone()
    }

    fn api_error(what: &str) -> Gw2ApiError {
        Gw2ApiError::Api {
            status: 503,
            body: format!("{what} unavailable"),
        }
    }
}

#[async_trait]
impl RemoteDataSource for FakeSource {
    async fn character_names(&self) -> Result<Vec<String>, Gw2ApiError> {
        self.character_list_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_character_list {
            return Err(Self::api_error("characters"));
        }
        Ok(self.characters.clone())
    }

    async fn equipment_tabs(&self, character: &str) -> Result<Vec<EquipmentTab>, Gw2ApiError> {
        self.equipment_calls.fetch_add(1, Ordering::SeqCst);
        if self.panicking_characters.contains(character) {
            panic!("scripted panic for {character}");
        }
        if self.failing_characters.contains(character) {
            return Err(Self::api_error(character));
        }
        let tabs = self.tabs.get(character).cloned().unwrap_or(Value::Array(Vec::new()));
        Ok(serde_json::from_value(tabs).expect("fixture tabs should parse"))
    }

    async fn items(&self, ids: &[ItemId]) -> Result<Vec<ItemRecord>, Gw2ApiError> {
        let mut batch = ids.to_vec();
        batch.sort_unstable();
        self.item_batches.lock().unwrap().push(batch);
        if self.fail_items {
            return Err(Self::api_error("items"));
        }
        Ok(ids.iter().filter_map(|id| self.items.get(id).cloned()).collect())
    }

    async fn legendary_armory_ids(&self) -> Result<Vec<ItemId>, Gw2ApiError> {
        self.legendary_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_legendary {
            return Err(Self::api_error("legendaryarmory"));
        }
        Ok(self.legendary_ids.clone())
    }
}

/// Store that holds nothing and rejects every write.
#[derive(Default)]
pub struct ReadOnlyStore {
    write_attempts: AtomicUsize,
}

impl ReadOnlyStore {
    pub fn write_attempts(&self) -> usize {
        self.write_attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl KeyValueStore for ReadOnlyStore {
    async fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Ok(None)
    }

    async fn put(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
        self.write_attempts.fetch_add(1, Ordering::SeqCst);
        Err(StoreError::Io(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "read-only store",
        )))
    }
}
