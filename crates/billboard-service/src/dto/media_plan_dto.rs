//! Media plan DTOs.

use billboard_core::MappingError;
use billboard_repository::listing::{
    ScheduleStatus, CAMPAIGNS_COUNT, OPERATOR_FIRST_NAME, OPERATOR_LAST_NAME, PLAN_END_DATE,
    PLAN_START_DATE,
};
use billboard_repository::MediaPlanRow;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// One row of the media plan list.
///
/// The span and status come from the plan's campaigns; a plan without
/// campaigns has neither.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaPlanListItem {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub budget: Option<i64>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: Option<ScheduleStatus>,
    pub campaigns_count: i64,
    pub operator_first_name: Option<String>,
    pub operator_last_name: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl MediaPlanListItem {
    pub fn from_row(row: MediaPlanRow, today: NaiveDate) -> Result<Self, MappingError> {
        let start_date = row.extra_date(PLAN_START_DATE)?;
        let end_date = row.extra_date(PLAN_END_DATE)?;
        let campaigns_count = row.extra_count(CAMPAIGNS_COUNT)?;
        let operator_first_name = row.extra_text(OPERATOR_FIRST_NAME)?;
        let operator_last_name = row.extra_text(OPERATOR_LAST_NAME)?;

        let status = match (start_date, end_date) {
            (Some(start), Some(end)) => Some(ScheduleStatus::of(start, end, today)),
            _ => None,
        };

        let plan = row.entity;
        Ok(Self {
            id: plan.id,
            name: plan.name,
            description: plan.description,
            budget: plan.budget,
            start_date,
            end_date,
            status,
            campaigns_count,
            operator_first_name,
            operator_last_name,
            created_at: plan.created_at,
            updated_at: plan.updated_at,
        })
    }
}
