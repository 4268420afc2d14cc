//! Loading the legendary generation table.
//!
//! The table is either warm (a catalogue is already persisted) or cold
//! (nothing stored yet). A cold load bootstraps the catalogue from the
//! remote source once and persists it; every later run re-derives the
//! partition from the stored catalogue without touching the network.

use armory_core::generation::{Generation, GenerationTable, Partition};
use armory_core::item::ItemRecord;
use armory_gw2::{Gw2ApiError, RemoteDataSource};
use armory_store::GenerationStore;
use serde::Serialize;

/// Where the loaded table came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TableOrigin {
    /// Re-derived from the persisted catalogue.
    Cache,
    /// Bootstrapped from the remote source during this run.
    Bootstrap,
    /// Bootstrap failed; the table is empty and nothing was persisted.
    Unavailable,
}

/// A generation table together with its origin.
#[derive(Debug, Clone)]
pub struct LoadedGenerations {
    pub table: GenerationTable,
    pub origin: TableOrigin,
}

/// Persisted-catalogue state at load time.
enum CatalogueState {
    Warm(Vec<ItemRecord>),
    Cold,
}

/// Load the generation table, bootstrapping it when no catalogue is
/// stored. Never fails: bootstrap errors yield an empty table.
pub async fn load_generation_table(
    store: &GenerationStore,
    source: &dyn RemoteDataSource,
) -> LoadedGenerations {
    let state = match store.load().await {
        Ok(Some(records)) => CatalogueState::Warm(records),
        Ok(None) => CatalogueState::Cold,
        Err(e) => {
            tracing::warn!(error = %e, "Persisted legendary catalogue unusable, bootstrapping");
            CatalogueState::Cold
        }
    };

    match state {
        CatalogueState::Warm(records) => {
            tracing::info!(records = records.len(), "Loaded legendary items from cache");
            LoadedGenerations {
                table: build_table(&records),
                origin: TableOrigin::Cache,
            }
        }
        CatalogueState::Cold => match bootstrap_catalogue(source).await {
            Ok(records) => {
                let table = build_table(&records);
                if records.is_empty() {
                    tracing::warn!("Legendary catalogue is empty, not persisting it");
                } else if let Err(e) = store.save(&records).await {
                    tracing::warn!(error = %e, "Failed to persist legendary catalogue");
                }
                LoadedGenerations {
                    table,
                    origin: TableOrigin::Bootstrap,
                }
            }
            Err(e) => {
                tracing::error!(
                    error = %e,
                    "Legendary catalogue bootstrap failed, generation filtering unavailable"
                );
                LoadedGenerations {
                    table: GenerationTable::empty(),
                    origin: TableOrigin::Unavailable,
                }
            }
        },
    }
}

/// Fetch every legendary-armory item and keep the weapons, ascending by id.
async fn bootstrap_catalogue(
    source: &dyn RemoteDataSource,
) -> Result<Vec<ItemRecord>, Gw2ApiError> {
    let ids = source.legendary_armory_ids().await?;
    tracing::info!(count = ids.len(), "Bootstrapping legendary catalogue");
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let mut weapons: Vec<ItemRecord> = source
        .items(&ids)
        .await?
        .into_iter()
        .filter(ItemRecord::is_weapon)
        .collect();
    weapons.sort_by_key(|r| r.id);
    Ok(weapons)
}

fn build_table(records: &[ItemRecord]) -> GenerationTable {
    let Partition {
        table,
        unclassified,
    } = GenerationTable::partition(records);

    if !unclassified.is_empty() {
        tracing::warn!(ids = ?unclassified, "Legendary weapons outside every generation range");
    }
    for generation in Generation::ALL {
        tracing::debug!(
            generation = %generation,
            count = table.count(generation),
            "Generation size"
        );
    }

    table
}
