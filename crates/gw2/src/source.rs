use async_trait::async_trait;

use armory_core::equipment::EquipmentTab;
use armory_core::item::ItemRecord;
use armory_core::types::ItemId;

use crate::client::Gw2ApiError;

/// Read-only view of the game API consumed by the census.
///
/// Implementations must be shareable across the per-character tasks.
#[async_trait]
pub trait RemoteDataSource: Send + Sync {
    /// `GET characters`: names of every character on the account.
    async fn character_names(&self) -> Result<Vec<String>, Gw2ApiError>;

    /// `GET characters/{name}/equipmenttabs?tabs=all`.
    async fn equipment_tabs(&self, character: &str) -> Result<Vec<EquipmentTab>, Gw2ApiError>;

    /// `GET items?ids=...`: one logical batch for all `ids`.
    async fn items(&self, ids: &[ItemId]) -> Result<Vec<ItemRecord>, Gw2ApiError>;

    /// `GET legendaryarmory?ids=all`: ids of every armory-eligible item.
    async fn legendary_armory_ids(&self) -> Result<Vec<ItemId>, Gw2ApiError>;
}
