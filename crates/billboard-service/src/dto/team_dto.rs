//! Team DTOs.

use billboard_repository::entities::TeamMember;
use serde::{Deserialize, Serialize};

/// One row of the team page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMemberItem {
    pub id: i64,
    /// First and last name, trimmed; empty when neither is set.
    pub name: String,
    pub email: String,
    pub role: String,
    pub status: String,
}

impl From<TeamMember> for TeamMemberItem {
    fn from(member: TeamMember) -> Self {
        let first = member.first_name.as_deref().unwrap_or_default().trim();
        let last = member.last_name.as_deref().unwrap_or_default().trim();

        Self {
            id: member.id,
            name: format!("{first} {last}").trim().to_string(),
            email: member.email,
            role: member.role,
            status: member.member_status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn member(first: Option<&str>, last: Option<&str>) -> TeamMember {
        let stamp = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        TeamMember {
            id: 5,
            email: "sara@acme.test".to_string(),
            first_name: first.map(str::to_string),
            last_name: last.map(str::to_string),
            role: "operator".to_string(),
            member_status: "pending".to_string(),
            organization_type: "advertiser".to_string(),
            company_name: "Acme".to_string(),
            created_at: stamp,
            updated_at: stamp,
        }
    }

    #[test]
    fn test_name_is_trimmed() {
        let item = TeamMemberItem::from(member(Some(" Sara "), Some("Ali ")));
        assert_eq!(item.name, "Sara Ali");
        assert_eq!(item.status, "pending");
    }

    #[test]
    fn test_missing_name_parts() {
        assert_eq!(TeamMemberItem::from(member(None, Some("Ali"))).name, "Ali");
        assert_eq!(TeamMemberItem::from(member(Some("Sara"), None)).name, "Sara");
        assert_eq!(TeamMemberItem::from(member(None, None)).name, "");
    }
}
