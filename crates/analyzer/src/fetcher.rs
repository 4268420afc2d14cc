//! Concurrent per-character equipment fetch.
//!
//! Each character is fetched in its own task, with a semaphore bounding
//! how many run at once. Tasks hand their result back through the join
//! set (join-then-merge); nothing is shared mutably while they run. A
//! failing or panicking task only loses that one character.

use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use armory_core::equipment::{extract_template_weapons, TemplateWeapon};
use armory_gw2::{Gw2ApiError, RemoteDataSource};

/// Why a character contributed no entries.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The equipment request failed or its payload did not decode.
    #[error(transparent)]
    Api(#[from] Gw2ApiError),

    /// The task was aborted or panicked before producing a result.
    #[error("Character task did not complete: {0}")]
    TaskFailed(String),
}

/// Outcome of fetching one character.
#[derive(Debug)]
pub struct CharacterFetch {
    pub character: String,
    /// Land weapon entries in template order, before legendary filtering.
    pub outcome: Result<Vec<TemplateWeapon>, FetchError>,
}

/// Fetch and extract weapon entries for every character.
///
/// At most `concurrency` characters are in flight at once (a value of 0
/// is treated as 1). The returned list follows the order of
/// `characters`, regardless of completion order.
pub async fn fetch_characters(
    source: Arc<dyn RemoteDataSource>,
    characters: &[String],
    concurrency: usize,
) -> Vec<CharacterFetch> {
    let semaphore = Arc::new(Semaphore::new(concurrency.max(1)));
    let mut tasks = JoinSet::new();

    for (index, character) in characters.iter().enumerate() {
        let source = Arc::clone(&source);
        let semaphore = Arc::clone(&semaphore);
        let character = character.clone();

        tasks.spawn(async move {
            let _permit = match semaphore.acquire_owned().await {
                Ok(permit) => permit,
                Err(e) => return (index, Err(FetchError::TaskFailed(e.to_string()))),
            };

            tracing::info!(character = %character, "Fetching data for character");
            let outcome = source
                .equipment_tabs(&character)
                .await
                .map(|tabs| extract_template_weapons(&character, &tabs))
                .map_err(FetchError::from);

            (index, outcome)
        });
    }

    let mut slots: Vec<Option<Result<Vec<TemplateWeapon>, FetchError>>> =
        characters.iter().map(|_| None).collect();

    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((index, outcome)) => slots[index] = Some(outcome),
            Err(e) => {
                tracing::error!(error = %e, "Character task failed to join");
            }
        }
    }

    characters
        .iter()
        .zip(slots)
        .map(|(character, slot)| {
            let outcome = slot.unwrap_or_else(|| {
                Err(FetchError::TaskFailed("task panicked or was cancelled".to_string()))
            });
            match &outcome {
                Ok(weapons) => {
                    tracing::info!(
                        character = %character,
                        weapons = weapons.len(),
                        "Found weapons"
                    );
                }
                Err(e) => {
                    tracing::warn!(
                        character = %character,
                        error = %e,
                        "Skipping character, fetch failed"
                    );
                }
            }
            CharacterFetch {
                character: character.clone(),
                outcome,
            }
        })
        .collect()
}
