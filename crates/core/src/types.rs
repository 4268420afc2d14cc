/// Remote item identifier as issued by the game API.
pub type ItemId = u32;

/// Equip locations that mark an item as drawn from the account-wide
/// legendary armory rather than the character's own inventory.
pub const LEGENDARY_ARMORY_LOCATIONS: [&str; 2] =
    ["EquippedFromLegendaryArmory", "LegendaryArmory"];

/// Remote `type` value carried by weapon items.
pub const WEAPON_ITEM_TYPE: &str = "Weapon";
