//! Item detail records as returned by the `items` endpoint.
//!
//! Only the fields needed for weapon classification are modelled; any
//! other attribute the API sends is ignored on deserialization. The
//! serialized form keeps the remote shape so a persisted cache can be
//! read back with the same type.

use serde::{Deserialize, Serialize};

use crate::types::{ItemId, WEAPON_ITEM_TYPE};

/// A remote item's identity and combat category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRecord {
    pub id: ItemId,
    #[serde(default)]
    pub name: String,
    /// Top-level item category, e.g. `"Weapon"` or `"Armor"`.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub item_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<ItemDetails>,
}

/// The `details` sub-object. For weapons `type` holds the weapon subtype
/// (`"Sword"`, `"Greatsword"`, `"LongBow"`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDetails {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl ItemRecord {
    /// Build a weapon record with the given subtype.
    pub fn weapon(id: ItemId, name: impl Into<String>, subtype: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            item_type: Some(WEAPON_ITEM_TYPE.to_string()),
            details: Some(ItemDetails {
                kind: Some(subtype.into()),
            }),
        }
    }

    /// Weapon subtype from `details.type`, or `None` when absent or blank.
    pub fn weapon_subtype(&self) -> Option<&str> {
        self.details
            .as_ref()
            .and_then(|d| d.kind.as_deref())
            .filter(|kind| !kind.is_empty())
    }

    /// Whether the top-level category is `"Weapon"`.
    pub fn is_weapon(&self) -> bool {
        self.item_type.as_deref() == Some(WEAPON_ITEM_TYPE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_remote_shape_and_ignores_extra_fields() {
        let json = r#"{
            "id": 30684,
            "name": "Frostfang",
            "type": "Weapon",
            "rarity": "Legendary",
            "details": { "type": "Axe", "damage_type": "Physical" }
        }"#;
        let item: ItemRecord = serde_json::from_str(json).unwrap();

        assert_eq!(item.id, 30684);
        assert_eq!(item.name, "Frostfang");
        assert!(item.is_weapon());
        assert_eq!(item.weapon_subtype(), Some("Axe"));
    }

    #[test]
    fn missing_details_has_no_subtype() {
        let item: ItemRecord = serde_json::from_str(r#"{"id": 1, "name": "Salvage Kit"}"#).unwrap();
        assert_eq!(item.weapon_subtype(), None);
        assert!(!item.is_weapon());
    }

    #[test]
    fn blank_subtype_is_treated_as_missing() {
        let item: ItemRecord =
            serde_json::from_str(r#"{"id": 2, "name": "Odd", "type": "Weapon", "details": {"type": ""}}"#)
                .unwrap();
        assert_eq!(item.weapon_subtype(), None);
    }

    #[test]
    fn serialized_form_uses_remote_field_names() {
        let value = serde_json::to_value(ItemRecord::weapon(100, "Blade", "Sword")).unwrap();
        assert_eq!(value["type"], "Weapon");
        assert_eq!(value["details"]["type"], "Sword");
    }
}
