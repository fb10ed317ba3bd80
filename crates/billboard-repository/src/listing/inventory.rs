use crate::{Order, SelectQuery};
use serde::{Deserialize, Serialize};

/// Inventory availability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InventoryStatus {
    Active,
    Inactive,
}

impl InventoryStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }
}

/// Filters for the inventory table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryFilter {
    /// Substring of the face id, network name or media owner name.
    pub keyword: Option<String>,
    /// Exact stored billboard type, including `Other: ...` values.
    pub billboard_type: Option<String>,
    pub media_owner_name: Option<String>,
    pub network_name: Option<String>,
    pub face_id: Option<String>,
    pub status: Option<InventoryStatus>,
}

/// Builds the inventory listing query, newest first.
#[must_use]
pub fn inventory_query(filter: &InventoryFilter) -> SelectQuery {
    let mut query = SelectQuery::table("inventories");

    if let Some(name) = non_empty(&filter.media_owner_name) {
        query = query.filter_eq("media_owner_name", name);
    }
    if let Some(name) = non_empty(&filter.network_name) {
        query = query.filter_eq("network_name", name);
    }
    if let Some(face_id) = non_empty(&filter.face_id) {
        query = query.filter_eq("face_id", face_id);
    }
    if let Some(keyword) = non_empty(&filter.keyword) {
        query = query.filter_ilike_any(&["face_id", "network_name", "media_owner_name"], keyword);
    }
    if let Some(kind) = non_empty(&filter.billboard_type) {
        query = query.filter_eq("billboard_type", kind);
    }
    if let Some(status) = filter.status {
        query = query.filter_eq("status", status.as_str());
    }

    query.order_by("id", Order::Desc)
}

pub(crate) fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
