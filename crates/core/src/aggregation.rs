//! Weapon-type histogram and per-character detail listing.
//!
//! Both views are built from the filtered weapon entries of every
//! character plus the item cache. The histogram only counts entries that
//! resolve to a known weapon subtype; the detail listing keeps every entry
//! and marks the unresolved ones explicitly.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::equipment::TemplateWeapon;
use crate::item_cache::ItemCache;
use crate::types::ItemId;

/// Filtered weapon entries of one character, in template order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharacterWeapons {
    pub character: String,
    pub weapons: Vec<TemplateWeapon>,
}

/// One weapon entry attributed to a character and template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CharacterTemplateDetail {
    pub character: String,
    pub template: String,
    pub item_id: ItemId,
}

/// Aggregate count for a single weapon subtype.
///
/// `ids` holds one element per counted entry, in processing order, so
/// `count == ids.len()` always holds and duplicates are expected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WeaponTypeCount {
    pub count: usize,
    pub ids: Vec<ItemId>,
}

/// Histogram keyed by weapon subtype.
pub type WeaponCounts = BTreeMap<String, WeaponTypeCount>;

/// Display data for a resolved detail entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedItem {
    pub name: String,
    pub weapon_type: Option<String>,
}

/// One line of the per-character listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailLine {
    pub item_id: ItemId,
    pub template: String,
    /// `None` when the id is not present in the item cache.
    pub item: Option<ResolvedItem>,
}

/// Detail listing for one character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CharacterDetail {
    pub character: String,
    pub items: Vec<DetailLine>,
}

/// Flatten per-character entries into `(character, template, item)` tuples,
/// keeping character order and template order.
pub fn flatten(characters: &[CharacterWeapons]) -> Vec<CharacterTemplateDetail> {
    characters
        .iter()
        .flat_map(|c| {
            c.weapons.iter().map(|w| CharacterTemplateDetail {
                character: c.character.clone(),
                template: w.template.clone(),
                item_id: w.entry.item_id,
            })
        })
        .collect()
}

/// Distinct item ids referenced by the entries.
pub fn unique_ids(entries: &[CharacterTemplateDetail]) -> BTreeSet<ItemId> {
    entries.iter().map(|e| e.item_id).collect()
}

/// Count entries per weapon subtype.
///
/// Entries whose id is missing from the cache, or whose record has no
/// weapon subtype, are skipped silently.
pub fn count_weapon_types(entries: &[CharacterTemplateDetail], cache: &ItemCache) -> WeaponCounts {
    let mut counts = WeaponCounts::new();

    for entry in entries {
        let Some(subtype) = cache.get(entry.item_id).and_then(|r| r.weapon_subtype()) else {
            continue;
        };
        let bucket = counts.entry(subtype.to_string()).or_default();
        bucket.count += 1;
        bucket.ids.push(entry.item_id);
    }

    counts
}

/// Build the per-character listing, resolving names through the cache.
pub fn character_details(
    characters: &[CharacterWeapons],
    cache: &ItemCache,
) -> Vec<CharacterDetail> {
    characters
        .iter()
        .map(|c| CharacterDetail {
            character: c.character.clone(),
            items: c
                .weapons
                .iter()
                .map(|w| DetailLine {
                    item_id: w.entry.item_id,
                    template: w.template.clone(),
                    item: cache.get(w.entry.item_id).map(|record| ResolvedItem {
                        name: record.name.clone(),
                        weapon_type: record.weapon_subtype().map(str::to_string),
                    }),
                })
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equipment::WeaponSlotEntry;
    use crate::item::ItemRecord;

    fn weapons(character: &str, entries: &[(&str, ItemId)]) -> CharacterWeapons {
        CharacterWeapons {
            character: character.into(),
            weapons: entries
                .iter()
                .map(|(template, id)| TemplateWeapon {
                    template: (*template).into(),
                    entry: WeaponSlotEntry {
                        item_id: *id,
                        slot: "WeaponA1".into(),
                        location: "Equipped".into(),
                    },
                })
                .collect(),
        }
    }

    fn cache() -> ItemCache {
        let mut no_subtype = ItemRecord::weapon(300, "Mystery", "Sword");
        no_subtype.details = None;
        ItemCache::from_records([
            ItemRecord::weapon(100, "Ascended Sword", "Sword"),
            ItemRecord::weapon(200, "Ascended Axe", "Axe"),
            no_subtype,
        ])
    }

    #[test]
    fn single_character_example() {
        let characters = vec![weapons("Foo", &[("1", 100), ("1", 200)])];
        let counts = count_weapon_types(&flatten(&characters), &cache());

        assert_eq!(counts.len(), 2);
        assert_eq!(
            counts["Sword"],
            WeaponTypeCount {
                count: 1,
                ids: vec![100]
            }
        );
        assert_eq!(
            counts["Axe"],
            WeaponTypeCount {
                count: 1,
                ids: vec![200]
            }
        );
    }

    #[test]
    fn duplicates_across_characters_are_counted() {
        let characters = vec![
            weapons("Foo", &[("1", 100)]),
            weapons("Bar", &[("Raid", 100), ("Raid", 100)]),
        ];
        let counts = count_weapon_types(&flatten(&characters), &cache());
        assert_eq!(counts["Sword"].count, 3);
        assert_eq!(counts["Sword"].ids, vec![100, 100, 100]);
    }

    #[test]
    fn histogram_sum_equals_resolved_entries() {
        let characters = vec![weapons(
            "Foo",
            &[("1", 100), ("1", 200), ("1", 300), ("2", 999), ("2", 100)],
        )];
        let entries = flatten(&characters);
        let cache = cache();

        let counts = count_weapon_types(&entries, &cache);

        let resolved = entries
            .iter()
            .filter(|e| cache.get(e.item_id).and_then(|r| r.weapon_subtype()).is_some())
            .count();
        let total: usize = counts.values().map(|c| c.count).sum();
        assert_eq!(total, resolved);
        assert_eq!(total, 3);
        for bucket in counts.values() {
            assert_eq!(bucket.count, bucket.ids.len());
        }
    }

    #[test]
    fn unique_ids_deduplicates() {
        let characters = vec![
            weapons("Foo", &[("1", 100), ("1", 200)]),
            weapons("Bar", &[("1", 200)]),
        ];
        let ids: Vec<ItemId> = unique_ids(&flatten(&characters)).into_iter().collect();
        assert_eq!(ids, vec![100, 200]);
    }

    #[test]
    fn details_mark_unresolved_items() {
        let characters = vec![weapons("Foo", &[("Raid", 100), ("2", 999)]), weapons("Empty", &[])];

        let details = character_details(&characters, &cache());

        assert_eq!(details.len(), 2);
        let foo = &details[0];
        assert_eq!(foo.character, "Foo");
        assert_eq!(
            foo.items[0].item,
            Some(ResolvedItem {
                name: "Ascended Sword".into(),
                weapon_type: Some("Sword".into()),
            })
        );
        assert_eq!(foo.items[0].template, "Raid");
        assert_eq!(foo.items[1].item_id, 999);
        assert!(foo.items[1].item.is_none());
        assert!(details[1].items.is_empty());
    }
}
