//! Campaign DTOs and the mock KPI block shown on the campaign list.

use billboard_core::MappingError;
use billboard_repository::listing::{ScheduleStatus, BILLBOARD_COUNT};
use billboard_repository::CampaignRow;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Placeholder reach figures derived from budget, duration and board count.
///
/// These are not measured values; they give the list view plausible
/// numbers until real audience data is wired in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KpiData {
    pub net_contacts: i64,
    pub gross_contacts: i64,
    pub frequency: f64,
    pub coverage_percent: f64,
    pub cpm: f64,
    pub attention_index: i64,
}

impl KpiData {
    /// Computes the mock KPIs for a campaign.
    #[must_use]
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    pub fn estimate(budget_eur: i64, start: NaiveDate, end: NaiveDate, billboards: i64) -> Self {
        let days = (end - start).num_days().max(1);
        let boards = billboards.max(1);

        let net_contacts = boards * days * 100;
        let gross_contacts = (net_contacts as f64 * 1.5).floor() as i64;

        let frequency = 1.0 + boards as f64 * 0.5 + days as f64 / 30.0;
        let coverage = (20.0 + boards as f64 * 5.0).clamp(20.0, 90.0);

        let cpm = if gross_contacts > 0 && budget_eur > 0 {
            round2(budget_eur as f64 / gross_contacts as f64 * 1000.0)
        } else {
            0.0
        };

        let attention_index = (50.0 + boards as f64 * 3.0).clamp(50.0, 90.0) as i64;

        Self {
            net_contacts,
            gross_contacts,
            frequency: round2(frequency),
            coverage_percent: round2(coverage),
            cpm,
            attention_index,
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// One row of the campaign list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignListItem {
    pub id: i64,
    pub name: String,
    /// `"<start> - <end>"`.
    pub date_range: String,
    pub billboards: i64,
    pub budget: i64,
    pub kpi_data: KpiData,
    pub status: ScheduleStatus,
    /// Not resolved yet; clients show the current user instead.
    pub operator: Option<String>,
    pub last_updated_at: NaiveDateTime,
}

impl CampaignListItem {
    /// Builds a list item from a campaign row and its billboard count.
    pub fn from_row(row: CampaignRow, today: NaiveDate) -> Result<Self, MappingError> {
        let billboards = row.extra_count(BILLBOARD_COUNT)?;
        let campaign = row.entity;

        Ok(Self {
            id: campaign.id,
            date_range: format!("{} - {}", campaign.start_date, campaign.end_date),
            billboards,
            budget: campaign.price_eur,
            kpi_data: KpiData::estimate(
                campaign.price_eur,
                campaign.start_date,
                campaign.end_date,
                billboards,
            ),
            status: ScheduleStatus::of(campaign.start_date, campaign.end_date, today),
            operator: None,
            last_updated_at: campaign.updated_at,
            name: campaign.name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use billboard_repository::entities::Campaign;
    use billboard_repository::{Annotated, SqlValue};
    use std::collections::BTreeMap;

    fn date(month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, month, day).unwrap()
    }

    fn campaign_row(billboards: SqlValue) -> CampaignRow {
        let stamp = date(5, 2).and_hms_opt(10, 30, 0).unwrap();
        Annotated {
            entity: Campaign {
                id: 3,
                name: "Ramadan".to_string(),
                price_eur: 30_000,
                description: None,
                start_date: date(6, 1),
                end_date: date(6, 30),
                country_code: "SA".to_string(),
                city: Some("Jeddah".to_string()),
                gender: "all".to_string(),
                age_ranges: None,
                socio_professional_category: None,
                mobility_modes: None,
                poi_categories: None,
                created_by: Some(1),
                created_at: stamp,
                updated_at: stamp,
            },
            extras: BTreeMap::from([(BILLBOARD_COUNT.to_string(), billboards)]),
        }
    }

    #[test]
    fn test_kpi_estimate() {
        // 29 days, 4 boards
        let kpi = KpiData::estimate(30_000, date(6, 1), date(6, 30), 4);

        assert_eq!(kpi.net_contacts, 11_600);
        assert_eq!(kpi.gross_contacts, 17_400);
        assert!((kpi.frequency - 3.97).abs() < f64::EPSILON);
        assert!((kpi.coverage_percent - 40.0).abs() < f64::EPSILON);
        assert!((kpi.cpm - 1724.14).abs() < 1e-9);
        assert_eq!(kpi.attention_index, 62);
    }

    #[test]
    fn test_kpi_floors_and_caps() {
        // same-day campaign with no boards counts as one day, one board
        let kpi = KpiData::estimate(0, date(6, 1), date(6, 1), 0);
        assert_eq!(kpi.net_contacts, 100);
        assert_eq!(kpi.gross_contacts, 150);
        assert!((kpi.cpm - 0.0).abs() < f64::EPSILON);

        let kpi = KpiData::estimate(1_000, date(1, 1), date(12, 31), 40);
        assert!((kpi.coverage_percent - 90.0).abs() < f64::EPSILON);
        assert_eq!(kpi.attention_index, 90);
    }

    #[test]
    fn test_list_item_from_row() {
        let item = CampaignListItem::from_row(campaign_row(SqlValue::Int(4)), date(6, 15)).unwrap();

        assert_eq!(item.date_range, "2024-06-01 - 2024-06-30");
        assert_eq!(item.billboards, 4);
        assert_eq!(item.budget, 30_000);
        assert_eq!(item.status, ScheduleStatus::Active);
        assert!(item.operator.is_none());

        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["status"], "active");
        assert_eq!(json["kpi_data"]["attention_index"], 62);
        assert!(json["operator"].is_null());
    }

    #[test]
    fn test_list_item_status_follows_today() {
        let upcoming =
            CampaignListItem::from_row(campaign_row(SqlValue::Int(0)), date(5, 31)).unwrap();
        assert_eq!(upcoming.status, ScheduleStatus::Upcoming);

        let done = CampaignListItem::from_row(campaign_row(SqlValue::Int(0)), date(7, 1)).unwrap();
        assert_eq!(done.status, ScheduleStatus::Completed);
    }

    #[test]
    fn test_list_item_rejects_non_numeric_count() {
        let result = CampaignListItem::from_row(campaign_row(SqlValue::from("many")), date(6, 15));
        assert!(result.is_err());
    }
}
