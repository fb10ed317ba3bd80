//! Row types for the listed tables.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A billboard face.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Inventory {
    pub id: i64,
    pub face_id: String,
    pub billboard_type: String,
    pub is_indoor: bool,
    pub latitude: f64,
    pub longitude: f64,
    pub address: Option<String>,
    pub height_from_ground: Option<f64>,
    pub loop_timing: Option<f64>,
    pub azimuth_from_north: f64,
    pub width: f64,
    pub height: f64,
    pub network_name: String,
    pub media_owner_name: String,
    pub status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// An advertising campaign.
///
/// Multi-select targeting fields (`age_ranges`, `mobility_modes`,
/// `poi_categories`) are stored as JSON text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Campaign {
    pub id: i64,
    pub name: String,
    pub price_eur: i64,
    pub description: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub country_code: String,
    pub city: Option<String>,
    pub gender: String,
    pub age_ranges: Option<String>,
    pub socio_professional_category: Option<String>,
    pub mobility_modes: Option<String>,
    pub poi_categories: Option<String>,
    pub created_by: Option<i64>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// A media plan grouping several campaigns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct MediaPlan {
    pub id: i64,
    pub name: String,
    pub budget: Option<i64>,
    pub description: Option<String>,
    pub created_by: Option<i64>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// A client user as seen from the team page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct TeamMember {
    pub id: i64,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: String,
    pub member_status: String,
    pub organization_type: String,
    pub company_name: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// A back-office administrator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Admin {
    pub id: i64,
    pub role: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}
