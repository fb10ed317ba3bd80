use super::inventory::non_empty;
use crate::{Order, SelectQuery};
use serde::{Deserialize, Serialize};

/// Role within a client team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TeamRole {
    Owner,
    Admin,
    Operator,
}

impl TeamRole {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Owner => "owner",
            Self::Admin => "admin",
            Self::Operator => "operator",
        }
    }
}

/// Membership state of a team member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberStatus {
    Active,
    Deactivated,
    Pending,
}

impl MemberStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Deactivated => "deactivated",
            Self::Pending => "pending",
        }
    }
}

/// The tenant a team listing is restricted to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamScope {
    pub organization_type: String,
    pub company_name: String,
}

/// Filters for the team member table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMemberFilter {
    /// Substring of the first name, last name or email.
    pub keyword: Option<String>,
    pub status: Option<MemberStatus>,
    pub role: Option<TeamRole>,
}

/// Builds the team member listing query for one tenant.
#[must_use]
pub fn team_member_query(scope: &TeamScope, filter: &TeamMemberFilter) -> SelectQuery {
    let mut query = SelectQuery::table("users")
        .filter_eq("organization_type", scope.organization_type.as_str())
        .filter_eq("company_name", scope.company_name.as_str());

    if let Some(keyword) = non_empty(&filter.keyword) {
        query = query.filter_ilike_any(&["first_name", "last_name", "email"], keyword);
    }
    if let Some(status) = filter.status {
        query = query.filter_eq("member_status", status.as_str());
    }
    if let Some(role) = filter.role {
        query = query.filter_eq("role", role.as_str());
    }

    query.order_by("id", Order::Asc)
}
