use super::inventory::non_empty;
use crate::{Order, SelectQuery};
use serde::{Deserialize, Serialize};

/// Column the admin list is sorted by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminSort {
    Email,
    #[default]
    CreatedAt,
}

impl AdminSort {
    /// `email` selects the email column; anything else sorts by creation time.
    #[must_use]
    pub fn parse_or_default(value: Option<&str>) -> Self {
        match value {
            Some("email") => Self::Email,
            _ => Self::CreatedAt,
        }
    }

    const fn column(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::CreatedAt => "created_at",
        }
    }
}

/// Filters for the admin list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdminFilter {
    /// Substring of the email address.
    pub email: Option<String>,
    pub sort_by: AdminSort,
    pub sort_order: Order,
}

/// Builds the admin listing query. Ties on the sort column fall back to `id`
/// in the same direction.
#[must_use]
pub fn admin_query(filter: &AdminFilter) -> SelectQuery {
    let mut query = SelectQuery::table("admins");
    if let Some(email) = non_empty(&filter.email) {
        query = query.filter_ilike_any(&["email"], email);
    }
    query
        .order_by(filter.sort_by.column(), filter.sort_order)
        .order_by("id", filter.sort_order)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sort_is_newest_first() {
        let query = admin_query(&AdminFilter::default());
        assert_eq!(query.sql().unwrap(), "SELECT * FROM admins ORDER BY created_at DESC, id DESC");
    }

    #[test]
    fn test_email_filter_and_ascending_email_sort() {
        let filter = AdminFilter {
            email: Some("ops@".to_string()),
            sort_by: AdminSort::Email,
            sort_order: Order::Asc,
        };
        let query = admin_query(&filter);
        assert_eq!(
            query.sql().unwrap(),
            "SELECT * FROM admins WHERE email ILIKE $1 ORDER BY email ASC, id ASC"
        );
    }

    #[test]
    fn test_sort_parsing() {
        assert_eq!(AdminSort::parse_or_default(Some("email")), AdminSort::Email);
        assert_eq!(AdminSort::parse_or_default(Some("name")), AdminSort::CreatedAt);
        assert_eq!(AdminSort::parse_or_default(None), AdminSort::CreatedAt);
    }
}
