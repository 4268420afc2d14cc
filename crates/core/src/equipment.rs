//! Equipment templates and weapon-slot extraction.
//!
//! A character owns several equipment templates ("tabs"). Each template
//! lists equipped items with the slot they occupy and where they were
//! equipped from. Only land weapon slots are of interest here: the slot
//! name must contain `"Weapon"` and must not contain `"Aquatic"`.

use serde::{Deserialize, Serialize};

use crate::types::{ItemId, LEGENDARY_ARMORY_LOCATIONS};

/// One equipment template as returned by
/// `characters/{name}/equipmenttabs?tabs=all`.
///
/// `equipment` is kept as raw JSON so that a malformed list only costs
/// the one template instead of the whole character payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EquipmentTab {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub equipment: Option<serde_json::Value>,
}

/// One equipped item inside a template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeaponSlotEntry {
    #[serde(rename = "id")]
    pub item_id: ItemId,
    pub slot: String,
    #[serde(default)]
    pub location: String,
}

/// A weapon entry attributed to the template it was found in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateWeapon {
    pub template: String,
    pub entry: WeaponSlotEntry,
}

impl WeaponSlotEntry {
    /// Land weapon slot check: `"WeaponA1"`, `"WeaponB2"` pass,
    /// `"WeaponAquaticA"` and armor/trinket slots do not.
    pub fn is_land_weapon_slot(&self) -> bool {
        self.slot.contains("Weapon") && !self.slot.contains("Aquatic")
    }

    /// Whether the item was equipped from the account legendary armory.
    pub fn is_from_legendary_armory(&self) -> bool {
        LEGENDARY_ARMORY_LOCATIONS.contains(&self.location.as_str())
    }
}

/// Label for a template: its remote name, or the 1-based position when
/// the name is absent or blank.
pub fn template_label(name: Option<&str>, position: usize) -> String {
    match name.map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => position.to_string(),
    }
}

/// Walk every template of one character and collect its land weapon
/// entries in template order.
///
/// Templates without an `equipment` list contribute nothing. A list that
/// does not parse is logged and skipped; the remaining templates are
/// still processed.
///
/// Positional labels count every template in the response, including
/// the empty and skipped ones. The earlier web tool only advanced its
/// counter for templates that had equipment.
pub fn extract_template_weapons(character: &str, tabs: &[EquipmentTab]) -> Vec<TemplateWeapon> {
    let mut weapons = Vec::new();

    for (index, tab) in tabs.iter().enumerate() {
        let template = template_label(tab.name.as_deref(), index + 1);

        let Some(raw) = tab.equipment.as_ref() else {
            tracing::debug!(character, template = %template, "Template has no equipment");
            continue;
        };

        let entries: Vec<WeaponSlotEntry> = match serde_json::from_value(raw.clone()) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(
                    character,
                    template = %template,
                    error = %e,
                    "Skipping template with malformed equipment payload",
                );
                continue;
            }
        };

        let before = weapons.len();
        weapons.extend(
            entries
                .into_iter()
                .filter(WeaponSlotEntry::is_land_weapon_slot)
                .map(|entry| TemplateWeapon {
                    template: template.clone(),
                    entry,
                }),
        );

        tracing::debug!(
            character,
            template = %template,
            weapons = weapons.len() - before,
            "Processed equipment template",
        );
    }

    weapons
}
