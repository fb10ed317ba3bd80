//! Inventory DTOs.

use billboard_repository::entities::Inventory;
use serde::{Deserialize, Serialize};

/// One row of the inventory table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: i64,
    pub face_id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub address: Option<String>,
    pub media_owner_name: String,
    pub network_name: String,
    pub billboard_type: String,
    pub status: String,
}

impl From<Inventory> for InventoryItem {
    fn from(inventory: Inventory) -> Self {
        Self {
            id: inventory.id,
            face_id: inventory.face_id,
            latitude: inventory.latitude,
            longitude: inventory.longitude,
            address: inventory.address,
            media_owner_name: inventory.media_owner_name,
            network_name: inventory.network_name,
            billboard_type: inventory.billboard_type,
            status: inventory.status,
        }
    }
}
