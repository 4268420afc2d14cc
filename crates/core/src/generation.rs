//! Legendary weapon generations.
//!
//! Generations are a release-era grouping of legendary weapons that the
//! API does not expose directly. They are derived purely from item-id
//! ranges:
//!
//! | Label | Range                       |
//! |-------|-----------------------------|
//! | `1`   | `id < 71383`                |
//! | `2`   | `71383 < id <= 90551`       |
//! | `3`   | `90551 < id < 103815`       |
//! | `3_5` | `id == 103815`              |
//!
//! Lower bounds are exclusive and upper bounds inclusive. Ids that fall in
//! none of the ranges are reported as unclassifiable.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::item::ItemRecord;
use crate::types::ItemId;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Exclusive upper bound of generation 1 and exclusive lower bound of
/// generation 2.
pub const GEN1_UPPER_EXCLUSIVE: ItemId = 71383;

/// Inclusive upper bound of generation 2.
pub const GEN2_UPPER_INCLUSIVE: ItemId = 90551;

/// The single item id making up generation 3.5. Also the exclusive upper
/// bound of generation 3.
pub const GEN3_5_ID: ItemId = 103815;

// ---------------------------------------------------------------------------
// Generation
// ---------------------------------------------------------------------------

/// A legendary weapon generation label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Generation {
    #[serde(rename = "1")]
    First,
    #[serde(rename = "2")]
    Second,
    #[serde(rename = "3")]
    Third,
    #[serde(rename = "3_5")]
    ThirdPointFive,
}

impl Generation {
    pub const ALL: [Generation; 4] = [
        Generation::First,
        Generation::Second,
        Generation::Third,
        Generation::ThirdPointFive,
    ];

    /// Wire label used in configuration and persisted tables.
    pub fn label(self) -> &'static str {
        match self {
            Generation::First => "1",
            Generation::Second => "2",
            Generation::Third => "3",
            Generation::ThirdPointFive => "3_5",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|g| g.label() == label)
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Generation {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s.trim()).ok_or_else(|| {
            CoreError::Validation(format!(
                "Unknown legendary generation \"{s}\"; expected one of 1, 2, 3, 3_5"
            ))
        })
    }
}

/// Place an item id into its generation, or `None` when it falls outside
/// every range.
pub fn classify(id: ItemId) -> Option<Generation> {
    if id < GEN1_UPPER_EXCLUSIVE {
        Some(Generation::First)
    } else if id > GEN1_UPPER_EXCLUSIVE && id <= GEN2_UPPER_INCLUSIVE {
        Some(Generation::Second)
    } else if id > GEN2_UPPER_INCLUSIVE && id < GEN3_5_ID {
        Some(Generation::Third)
    } else if id == GEN3_5_ID {
        Some(Generation::ThirdPointFive)
    } else {
        None
    }
}

// ---------------------------------------------------------------------------
// GenerationTable
// ---------------------------------------------------------------------------

/// Mapping from generation to the legendary weapon ids it contains.
///
/// All four generations are always present as keys, possibly with an
/// empty set. The sets are disjoint by construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct GenerationTable {
    sets: BTreeMap<Generation, BTreeSet<ItemId>>,
}

/// Outcome of partitioning a legendary catalogue.
#[derive(Debug, Clone)]
pub struct Partition {
    pub table: GenerationTable,
    /// Weapon ids that matched no generation range, ascending.
    pub unclassified: Vec<ItemId>,
}

impl Default for GenerationTable {
    fn default() -> Self {
        Self::empty()
    }
}

impl GenerationTable {
    /// A table with four empty generations.
    pub fn empty() -> Self {
        Self {
            sets: Generation::ALL
                .into_iter()
                .map(|g| (g, BTreeSet::new()))
                .collect(),
        }
    }

    /// Partition legendary catalogue records into generations.
    ///
    /// Records whose type is not `"Weapon"` are dropped first. The
    /// remaining ids are processed in ascending order.
    pub fn partition(records: &[ItemRecord]) -> Partition {
        let mut ids: Vec<ItemId> = records
            .iter()
            .filter(|r| r.is_weapon())
            .map(|r| r.id)
            .collect();
        ids.sort_unstable();
        ids.dedup();

        let mut table = Self::empty();
        let mut unclassified = Vec::new();

        for id in ids {
            match classify(id) {
                Some(generation) => {
                    table.sets.entry(generation).or_default().insert(id);
                }
                None => unclassified.push(id),
            }
        }

        Partition {
            table,
            unclassified,
        }
    }

    pub fn ids(&self, generation: Generation) -> impl Iterator<Item = ItemId> + '_ {
        self.sets.get(&generation).into_iter().flatten().copied()
    }

    pub fn contains(&self, generation: Generation, id: ItemId) -> bool {
        self.sets
            .get(&generation)
            .is_some_and(|set| set.contains(&id))
    }

    /// Number of ids in one generation.
    pub fn count(&self, generation: Generation) -> usize {
        self.sets.get(&generation).map_or(0, BTreeSet::len)
    }

    /// Total ids across all generations.
    pub fn len(&self) -> usize {
        self.sets.values().map(BTreeSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
