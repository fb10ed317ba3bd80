//! Pagination query parameters.

use billboard_config::PaginationConfig;
use billboard_core::PageRequest;
use serde::Deserialize;
use validator::Validate;

/// `page` and `per_page` query parameters.
///
/// Missing values fall back to page 1 and the configured default size;
/// out-of-range values are clamped rather than rejected.
#[derive(Debug, Clone, Copy, Default, Deserialize, Validate)]
pub struct PaginationQuery {
    #[serde(default)]
    pub page: Option<i64>,
    #[serde(default)]
    pub per_page: Option<i64>,
}

impl PaginationQuery {
    /// Resolves the request against the configured defaults and cap.
    #[must_use]
    pub fn to_page_request(self, config: &PaginationConfig) -> PageRequest {
        let page = self
            .page
            .map_or(1, |p| u64::try_from(p).unwrap_or(0))
            .max(1);
        let per_page = self
            .per_page
            .map_or(config.default_per_page, |n| u64::try_from(n).unwrap_or(0));

        PageRequest {
            page,
            per_page: config.cap(per_page),
        }
    }
}
