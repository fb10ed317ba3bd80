use super::inventory::non_empty;
use super::ScheduleStatus;
use crate::{Order, SelectQuery};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const PLAN_START_DATE: &str = "start_date";
pub const PLAN_END_DATE: &str = "end_date";
pub const CAMPAIGNS_COUNT: &str = "campaigns_count";
pub const OPERATOR_FIRST_NAME: &str = "operator_first_name";
pub const OPERATOR_LAST_NAME: &str = "operator_last_name";

/// Extra columns selected alongside each media plan.
pub const MEDIA_PLAN_EXTRAS: [&str; 5] = [
    PLAN_START_DATE,
    PLAN_END_DATE,
    CAMPAIGNS_COUNT,
    OPERATOR_FIRST_NAME,
    OPERATOR_LAST_NAME,
];

/// Filters for the media plan table.
///
/// Dates and status apply to the plan's span: the earliest campaign start
/// to the latest campaign end.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaPlanFilter {
    /// Substring of the plan name.
    pub keyword: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: Option<ScheduleStatus>,
}

const MIN_START: &str = "MIN(campaigns.start_date)";
const MAX_END: &str = "MAX(campaigns.end_date)";

/// Builds the media plan listing query, most recently created first.
#[must_use]
pub fn media_plan_query(filter: &MediaPlanFilter, today: NaiveDate) -> SelectQuery {
    let mut query = SelectQuery::table("media_plans")
        .column("media_plans.*")
        .column_as(MIN_START, PLAN_START_DATE)
        .column_as(MAX_END, PLAN_END_DATE)
        .column_as("COUNT(campaigns.id)", CAMPAIGNS_COUNT)
        .column_as("users.first_name", OPERATOR_FIRST_NAME)
        .column_as("users.last_name", OPERATOR_LAST_NAME)
        .left_join(
            "media_plan_campaigns",
            "media_plans.id = media_plan_campaigns.media_plan_id",
        )
        .left_join("campaigns", "campaigns.id = media_plan_campaigns.campaign_id")
        .left_join("users", "users.id = media_plans.created_by");

    if let Some(keyword) = non_empty(&filter.keyword) {
        query = query.filter_ilike_any(&["media_plans.name"], keyword);
    }

    query = query
        .group_by("media_plans.id")
        .group_by("users.first_name")
        .group_by("users.last_name");

    if let Some(start) = filter.start_date {
        query = query.having(format!("{MIN_START} >= ?"), vec![start.into()]);
    }
    if let Some(end) = filter.end_date {
        query = query.having(format!("{MAX_END} <= ?"), vec![end.into()]);
    }

    query = match filter.status {
        Some(ScheduleStatus::Active) => query
            .having(format!("{MIN_START} <= ?"), vec![today.into()])
            .having(format!("{MAX_END} >= ?"), vec![today.into()]),
        Some(ScheduleStatus::Upcoming) => {
            query.having(format!("{MIN_START} > ?"), vec![today.into()])
        }
        Some(ScheduleStatus::Completed) => {
            query.having(format!("{MAX_END} < ?"), vec![today.into()])
        }
        None => query,
    };

    query
        .order_by("media_plans.created_at", Order::Desc)
        .order_by("media_plans.id", Order::Desc)
}
