//! End-to-end checks of the pure census flow: template extraction,
//! legendary filtering and aggregation, without any I/O.

use serde_json::json;

use armory_core::aggregation::{character_details, count_weapon_types, flatten, CharacterWeapons};
use armory_core::equipment::{extract_template_weapons, EquipmentTab};
use armory_core::generation::GenerationTable;
use armory_core::item::ItemRecord;
use armory_core::item_cache::ItemCache;
use armory_core::weapon_filter::{FilterOptions, WeaponFilter};

fn tabs() -> Vec<EquipmentTab> {
    serde_json::from_value(json!([
        {
            "name": "Power",
            "equipment": [
                {"id": 100, "slot": "WeaponA1", "location": "Equipped"},
                {"id": 30684, "slot": "WeaponA2", "location": "EquippedFromLegendaryArmory"},
                {"id": 500, "slot": "WeaponAquaticA", "location": "Equipped"},
                {"id": 600, "slot": "Coat", "location": "Equipped"}
            ]
        },
        {
            "name": "",
            "equipment": [
                {"id": 95612, "slot": "WeaponB1", "location": "LegendaryArmory"}
            ]
        }
    ]))
    .expect("fixture should parse")
}

fn legendary_table() -> GenerationTable {
    let catalogue = vec![
        ItemRecord::weapon(30684, "Frostfang", "Axe"),
        ItemRecord::weapon(95612, "Aurene's Fang", "Sword"),
    ];
    GenerationTable::partition(&catalogue).table
}

fn cache() -> ItemCache {
    ItemCache::from_records([
        ItemRecord::weapon(100, "Ascended Sword", "Sword"),
        ItemRecord::weapon(30684, "Frostfang", "Axe"),
        ItemRecord::weapon(95612, "Aurene's Fang", "Sword"),
    ])
}

fn run(options: &FilterOptions) -> Vec<CharacterWeapons> {
    let table = legendary_table();
    let filter = WeaponFilter::new(options, &table);
    vec![CharacterWeapons {
        character: "Foo".into(),
        weapons: filter.apply(extract_template_weapons("Foo", &tabs())),
    }]
}

#[test]
fn unfiltered_counts_every_land_weapon() {
    let characters = run(&FilterOptions::default());
    let counts = count_weapon_types(&flatten(&characters), &cache());

    assert_eq!(counts["Sword"].count, 2);
    assert_eq!(counts["Sword"].ids, vec![100, 95612]);
    assert_eq!(counts["Axe"].count, 1);
}

#[test]
fn excluding_legendary_armory_leaves_inventory_weapons() {
    let characters = run(&FilterOptions {
        exclude_legendary_armory: true,
        ..Default::default()
    });
    let counts = count_weapon_types(&flatten(&characters), &cache());

    assert_eq!(counts.len(), 1);
    assert_eq!(counts["Sword"].ids, vec![100]);
}

#[test]
fn generation_one_keeps_only_first_generation_legendaries() {
    let characters = run(&FilterOptions {
        generation: Some("1".into()),
        ..Default::default()
    });
    let counts = count_weapon_types(&flatten(&characters), &cache());

    assert_eq!(counts.len(), 1);
    assert_eq!(counts["Axe"].ids, vec![30684]);
}

#[test]
fn details_use_positional_label_for_blank_template_names() {
    let characters = run(&FilterOptions::default());
    let details = character_details(&characters, &cache());

    let templates: Vec<&str> = details[0].items.iter().map(|l| l.template.as_str()).collect();
    assert_eq!(templates, vec!["Power", "Power", "2"]);
}
