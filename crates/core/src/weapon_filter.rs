//! Legendary-armory and generation predicates applied to weapon entries.
//!
//! Slot filtering (land weapons only) happens during extraction in
//! [`crate::equipment`]. This module applies the user-selected
//! predicates on top of that:
//!
//! - exclude items equipped from the legendary armory, or
//! - keep only items equipped from the legendary armory (never both),
//! - keep only ids belonging to one legendary generation.

use serde::{Deserialize, Serialize};

use crate::equipment::{TemplateWeapon, WeaponSlotEntry};
use crate::error::CoreError;
use crate::generation::{Generation, GenerationTable};

/// User-selected weapon predicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOptions {
    pub exclude_legendary_armory: bool,
    pub only_legendary_armory: bool,
    /// Generation label (`1`, `2`, `3`, `3_5`). Kept as free text so that
    /// an unknown label degrades to "no generation filter".
    pub generation: Option<String>,
}

impl FilterOptions {
    /// Reject option sets that cannot be satisfied.
    ///
    /// Must be called before any remote work starts.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.exclude_legendary_armory && self.only_legendary_armory {
            return Err(CoreError::Configuration(
                "Incompatible legendary armory options: cannot both exclude and only include legendary armory items"
                    .to_string(),
            ));
        }
        Ok(())
    }
}

/// A validated, ready-to-apply predicate set.
pub struct WeaponFilter<'a> {
    exclude_legendary_armory: bool,
    only_legendary_armory: bool,
    generation: Option<Generation>,
    table: &'a GenerationTable,
}

impl<'a> WeaponFilter<'a> {
    /// Resolve the options against a generation table.
    ///
    /// An unrecognized generation label is logged once here and then
    /// ignored: entries pass through without a generation check.
    pub fn new(options: &FilterOptions, table: &'a GenerationTable) -> Self {
        let generation = match options.generation.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(label) => match Generation::from_label(label) {
                Some(generation) => Some(generation),
                None => {
                    tracing::warn!(
                        label,
                        "Unrecognized legendary generation, not filtering by generation"
                    );
                    None
                }
            },
        };

        Self {
            exclude_legendary_armory: options.exclude_legendary_armory,
            only_legendary_armory: options.only_legendary_armory,
            generation,
            table,
        }
    }

    /// The generation actually being filtered on, if any.
    pub fn generation(&self) -> Option<Generation> {
        self.generation
    }

    pub fn accepts(&self, entry: &WeaponSlotEntry) -> bool {
        let from_armory = entry.is_from_legendary_armory();
        if self.exclude_legendary_armory && from_armory {
            return false;
        }
        if self.only_legendary_armory && !from_armory {
            return false;
        }
        match self.generation {
            Some(generation) => self.table.contains(generation, entry.item_id),
            None => true,
        }
    }

    /// Keep the entries accepted by [`accepts`](Self::accepts), preserving
    /// order.
    pub fn apply(&self, entries: Vec<TemplateWeapon>) -> Vec<TemplateWeapon> {
        entries
            .into_iter()
            .filter(|w| self.accepts(&w.entry))
            .collect()
    }
}
