//! Opaque key-value storage for persisted documents.
//!
//! The census only ever stores whole JSON documents under a handful of
//! fixed keys, so the storage seam is a string-in/string-out trait.
//! [`FileStore`] keeps one file per key in a directory; [`MemoryStore`]
//! is used by tests and dry runs.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::StoreError;

/// String document storage keyed by a short name.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Fetch the document stored under `key`, or `None` if there is none.
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replace the document stored under `key`.
    async fn put(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

fn validate_key(key: &str) -> Result<(), StoreError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidKey(key.to_string()))
    }
}

// ---------------------------------------------------------------------------
// FileStore
// ---------------------------------------------------------------------------

/// Directory-backed store: key `foo` lives in `<dir>/foo.json`.
///
/// Writes go to a sibling temporary file which is then renamed over the
/// target, so a crash mid-write never leaves a truncated document.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing `key`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        validate_key(key)?;
        match tokio::fs::read_to_string(self.path_for(key)).await {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn put(&self, key: &str, value: &str) -> Result<(), StoreError> {
        validate_key(key)?;
        tokio::fs::create_dir_all(&self.dir).await?;

        let target = self.path_for(key);
        let tmp = self.dir.join(format!("{key}.json.tmp"));
        tokio::fs::write(&tmp, value).await?;
        tokio::fs::rename(&tmp, &target).await?;

        tracing::debug!(path = %target.display(), bytes = value.len(), "Wrote store document");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// MemoryStore
// ---------------------------------------------------------------------------

/// In-memory store. Counts writes so tests can assert how often a
/// document was persisted.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
    writes: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful `put` calls so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        validate_key(key)?;
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn put(&self, key: &str, value: &str) -> Result<(), StoreError> {
        validate_key(key)?;
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
