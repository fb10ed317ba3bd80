//! Per-resource filter query parameters.

use billboard_core::rules::iso_date;
use billboard_core::{BillboardError, BillboardResult};
use billboard_repository::listing::{
    AdminFilter, AdminSort, CampaignFilter, InventoryFilter, InventoryStatus, MediaPlanFilter,
    MemberStatus, ScheduleStatus, TeamMemberFilter, TeamRole,
};
use billboard_repository::Order;
use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

fn parse_date(field: &str, value: Option<&String>) -> BillboardResult<Option<NaiveDate>> {
    value
        .map(|v| {
            NaiveDate::parse_from_str(v, "%Y-%m-%d")
                .map_err(|_| BillboardError::validation(format!("{field}: iso_date")))
        })
        .transpose()
}

/// Inventory table filters.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct InventoryQuery {
    #[validate(length(max = 100))]
    pub keyword: Option<String>,
    pub billboard_type: Option<String>,
    pub media_owner_name: Option<String>,
    pub network_name: Option<String>,
    pub face_id: Option<String>,
    pub status: Option<InventoryStatus>,
}

impl From<InventoryQuery> for InventoryFilter {
    fn from(query: InventoryQuery) -> Self {
        Self {
            keyword: query.keyword,
            billboard_type: query.billboard_type,
            media_owner_name: query.media_owner_name,
            network_name: query.network_name,
            face_id: query.face_id,
            status: query.status,
        }
    }
}

/// Date-window filters shared by campaigns and media plans.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ScheduleQuery {
    #[validate(length(max = 100))]
    pub keyword: Option<String>,
    #[validate(custom(function = "iso_date"))]
    pub start_date: Option<String>,
    #[validate(custom(function = "iso_date"))]
    pub end_date: Option<String>,
    pub status: Option<ScheduleStatus>,
}

impl ScheduleQuery {
    fn dates(&self) -> BillboardResult<(Option<NaiveDate>, Option<NaiveDate>)> {
        Ok((
            parse_date("start_date", self.start_date.as_ref())?,
            parse_date("end_date", self.end_date.as_ref())?,
        ))
    }
}

impl TryFrom<ScheduleQuery> for CampaignFilter {
    type Error = BillboardError;

    fn try_from(query: ScheduleQuery) -> BillboardResult<Self> {
        let (start_date, end_date) = query.dates()?;
        Ok(Self {
            keyword: query.keyword,
            start_date,
            end_date,
            status: query.status,
        })
    }
}

impl TryFrom<ScheduleQuery> for MediaPlanFilter {
    type Error = BillboardError;

    fn try_from(query: ScheduleQuery) -> BillboardResult<Self> {
        let (start_date, end_date) = query.dates()?;
        Ok(Self {
            keyword: query.keyword,
            start_date,
            end_date,
            status: query.status,
        })
    }
}

/// Team page filters.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct TeamMemberQuery {
    #[validate(length(max = 100))]
    pub keyword: Option<String>,
    pub status: Option<MemberStatus>,
    pub role: Option<TeamRole>,
}

impl From<TeamMemberQuery> for TeamMemberFilter {
    fn from(query: TeamMemberQuery) -> Self {
        Self {
            keyword: query.keyword,
            status: query.status,
            role: query.role,
        }
    }
}

/// Admin list filters and sorting.
///
/// Unknown `sort_by` values sort by creation time; anything other than
/// `asc` sorts descending.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct AdminQuery {
    #[validate(length(max = 255))]
    pub email: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

impl From<AdminQuery> for AdminFilter {
    fn from(query: AdminQuery) -> Self {
        Self {
            email: query.email,
            sort_by: AdminSort::parse_or_default(query.sort_by.as_deref()),
            sort_order: query
                .sort_order
                .as_deref()
                .map_or(Order::Desc, Order::parse_or_desc),
        }
    }
}
