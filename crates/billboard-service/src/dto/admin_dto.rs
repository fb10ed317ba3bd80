//! Admin DTOs.

use billboard_repository::entities::Admin;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Role allowed to manage other administrators.
pub const SUPERADMIN_ROLE: &str = "superadmin";

/// The administrator making a back-office request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminPrincipal {
    pub id: i64,
    pub role: String,
}

impl AdminPrincipal {
    #[must_use]
    pub fn is_superadmin(&self) -> bool {
        self.role == SUPERADMIN_ROLE
    }
}

/// Admin response DTO.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminResponse {
    pub id: i64,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    /// The id left-padded with zeros to four digits.
    pub padded_id: String,
}

impl From<Admin> for AdminResponse {
    fn from(admin: Admin) -> Self {
        Self {
            padded_id: format!("{:04}", admin.id),
            id: admin.id,
            email: admin.email,
            first_name: admin.first_name,
            last_name: admin.last_name,
            is_active: admin.is_active,
            created_at: admin.created_at,
            updated_at: admin.updated_at,
        }
    }
}
