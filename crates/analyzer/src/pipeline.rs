//! End-to-end census run.
//!
//! Order of operations:
//!
//! 1. Validate filter options (no remote work on failure).
//! 2. Load the item cache and the generation table.
//! 3. Fetch every character's templates concurrently.
//! 4. Filter, flatten and deduplicate item ids.
//! 5. Fetch cache misses in one batch and merge them.
//! 6. Build the histogram and detail listing.
//! 7. Persist the item cache.
//!
//! Only step 1 can fail the run. Every later failure is logged and
//! reflected in [`RunStats`].

use std::sync::Arc;

use serde::Serialize;

use armory_core::aggregation::{
    character_details, count_weapon_types, flatten, unique_ids, CharacterDetail, CharacterWeapons,
    WeaponCounts,
};
use armory_core::error::CoreError;
use armory_core::generation::Generation;
use armory_core::weapon_filter::{FilterOptions, WeaponFilter};
use armory_gw2::RemoteDataSource;
use armory_store::{GenerationStore, ItemCacheStore, KeyValueStore};

use crate::fetcher::fetch_characters;
use crate::generations::{load_generation_table, TableOrigin};

/// Errors that abort a census run.
#[derive(Debug, thiserror::Error)]
pub enum AnalyzerError {
    #[error(transparent)]
    Configuration(#[from] CoreError),
}

/// A character whose equipment could not be fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedCharacter {
    pub character: String,
    pub error: String,
}

/// Counters describing what a run did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunStats {
    pub characters_found: usize,
    pub characters_failed: usize,
    /// Filtered weapon entries across all characters and templates.
    pub weapon_entries: usize,
    pub unique_items: usize,
    pub cache_hits: usize,
    /// Ids sent to the batch item fetch (zero on a fully warm cache).
    pub items_requested: usize,
    pub items_fetched: usize,
    /// Ids still missing from the cache after the batch fetch.
    pub items_unresolved: usize,
    pub cache_persisted: bool,
    pub generation_table: TableOrigin,
}

/// Result of a census run.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub stats: RunStats,
    /// Generation filter actually applied, if any.
    pub generation: Option<Generation>,
    pub weapon_counts: WeaponCounts,
    /// Every successfully fetched character in account order.
    pub characters: Vec<CharacterDetail>,
    pub failed_characters: Vec<FailedCharacter>,
}

/// Runs the census against a remote source and a persistent store.
pub struct Analyzer {
    source: Arc<dyn RemoteDataSource>,
    item_store: ItemCacheStore,
    generation_store: GenerationStore,
    concurrency: usize,
}

impl Analyzer {
    pub fn new(
        source: Arc<dyn RemoteDataSource>,
        store: Arc<dyn KeyValueStore>,
        concurrency: usize,
    ) -> Self {
        Self {
            source,
            item_store: ItemCacheStore::new(Arc::clone(&store)),
            generation_store: GenerationStore::new(store),
            concurrency,
        }
    }

    /// Execute one census run with the given filter options.
    pub async fn run(&self, options: &FilterOptions) -> Result<AnalysisReport, AnalyzerError> {
        options.validate()?;

        let mut cache = self.item_store.load().await;
        let generations = load_generation_table(&self.generation_store, self.source.as_ref()).await;
        let filter = WeaponFilter::new(options, &generations.table);

        let names = match self.source.character_names().await {
            Ok(names) => names,
            Err(e) => {
                tracing::error!(error = %e, "Failed to fetch character list");
                Vec::new()
            }
        };
        tracing::info!(count = names.len(), "Found characters");

        // -- concurrent phase -------------------------------------------------

        let fetched = fetch_characters(Arc::clone(&self.source), &names, self.concurrency).await;

        let mut characters = Vec::with_capacity(fetched.len());
        let mut failed_characters = Vec::new();
        for fetch in fetched {
            match fetch.outcome {
                Ok(weapons) => characters.push(CharacterWeapons {
                    character: fetch.character,
                    weapons: filter.apply(weapons),
                }),
                Err(e) => failed_characters.push(FailedCharacter {
                    character: fetch.character,
                    error: e.to_string(),
                }),
            }
        }

        // -- item resolution --------------------------------------------------

        let entries = flatten(&characters);
        let ids = unique_ids(&entries);
        let lookup = cache.lookup(&ids);
        let cache_hits = lookup.hits.len();
        let misses: Vec<_> = lookup.misses.into_iter().collect();

        let mut items_fetched = 0;
        if !misses.is_empty() {
            tracing::info!(count = misses.len(), "Fetching item details");
            match self.source.items(&misses).await {
                Ok(records) => {
                    items_fetched = records.len();
                    let added = cache.merge(records);
                    tracing::debug!(added, "Merged item records into cache");
                }
                Err(e) => {
                    tracing::error!(error = %e, count = misses.len(), "Item batch fetch failed");
                }
            }
        } else {
            tracing::info!("All items found in cache");
        }

        let items_unresolved = ids.iter().filter(|id| !cache.contains(**id)).count();
        if items_unresolved > 0 {
            tracing::warn!(count = items_unresolved, "Some items could not be resolved");
        }

        // -- aggregation ------------------------------------------------------

        let weapon_counts = count_weapon_types(&entries, &cache);
        let details = character_details(&characters, &cache);

        let cache_persisted = match self.item_store.persist(&cache).await {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(error = %e, "Failed to persist item cache");
                false
            }
        };

        let stats = RunStats {
            characters_found: names.len(),
            characters_failed: failed_characters.len(),
            weapon_entries: entries.len(),
            unique_items: ids.len(),
            cache_hits,
            items_requested: misses.len(),
            items_fetched,
            items_unresolved,
            cache_persisted,
            generation_table: generations.origin,
        };
        tracing::info!(?stats, "Census complete");

        Ok(AnalysisReport {
            stats,
            generation: filter.generation(),
            weapon_counts,
            characters: details,
            failed_characters,
        })
    }
}
