use super::inventory::non_empty;
use super::ScheduleStatus;
use crate::{Order, SelectQuery};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Extra column carrying the number of linked billboards.
pub const BILLBOARD_COUNT: &str = "billboard_count";

/// Filters for the campaign table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignFilter {
    /// Substring of the campaign name.
    pub keyword: Option<String>,
    /// Campaigns starting on or after this date.
    pub start_date: Option<NaiveDate>,
    /// Campaigns ending on or before this date.
    pub end_date: Option<NaiveDate>,
    pub status: Option<ScheduleStatus>,
}

/// Builds the campaign listing query: every campaign plus its billboard
/// count, most recently created first.
#[must_use]
pub fn campaign_query(filter: &CampaignFilter, today: NaiveDate) -> SelectQuery {
    let mut query = SelectQuery::table("campaigns")
        .column("campaigns.*")
        .column_as("COUNT(campaign_inventories.id)", BILLBOARD_COUNT)
        .left_join(
            "campaign_inventories",
            "campaigns.id = campaign_inventories.campaign_id",
        );

    if let Some(keyword) = non_empty(&filter.keyword) {
        query = query.filter_ilike_any(&["campaigns.name"], keyword);
    }
    if let Some(start) = filter.start_date {
        query = query.filter("campaigns.start_date >= ?", vec![start.into()]);
    }
    if let Some(end) = filter.end_date {
        query = query.filter("campaigns.end_date <= ?", vec![end.into()]);
    }

    query = match filter.status {
        Some(ScheduleStatus::Active) => query
            .filter("campaigns.start_date <= ?", vec![today.into()])
            .filter("campaigns.end_date >= ?", vec![today.into()]),
        Some(ScheduleStatus::Upcoming) => {
            query.filter("campaigns.start_date > ?", vec![today.into()])
        }
        Some(ScheduleStatus::Completed) => {
            query.filter("campaigns.end_date < ?", vec![today.into()])
        }
        None => query,
    };

    query
        .group_by("campaigns.id")
        .order_by("campaigns.created_at", Order::Desc)
        .order_by("campaigns.id", Order::Desc)
}
