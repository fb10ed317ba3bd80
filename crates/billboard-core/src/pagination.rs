//! Paging request and page envelope types for list operations.

use crate::MappingError;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// A request for a page of results.
///
/// Pages are 1-indexed. Construction never fails: a page or page size below 1
/// is clamped to 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// The page number (1-indexed).
    pub page: u64,
    /// The number of items per page.
    pub per_page: u64,
}

impl PageRequest {
    /// The default page size.
    pub const DEFAULT_PER_PAGE: u64 = 10;

    /// Creates a new page request, flooring both values at 1.
    #[must_use]
    pub fn new(page: i64, per_page: i64) -> Self {
        Self {
            page: clamp_to_one(page),
            per_page: clamp_to_one(per_page),
        }
    }

    /// Creates a page request for the first page with default size.
    #[must_use]
    pub const fn first() -> Self {
        Self {
            page: 1,
            per_page: Self::DEFAULT_PER_PAGE,
        }
    }

    /// Returns the offset for database queries.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.per_page)
    }

    /// Returns the limit for database queries.
    #[must_use]
    pub const fn limit(&self) -> u64 {
        self.per_page
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first()
    }
}

fn clamp_to_one(value: i64) -> u64 {
    u64::try_from(value.max(1)).unwrap_or(1)
}

/// Number of the last page for `total` rows split into pages of `per_page`.
///
/// `0` when there are no rows or the page size is `0`.
#[must_use]
pub const fn last_page_for(total: u64, per_page: u64) -> u64 {
    if per_page == 0 {
        0
    } else {
        total.div_ceil(per_page)
    }
}

/// A page of results together with its paging metadata.
///
/// Serialises to the `data` object of list responses:
/// `items`, `total`, `per_page`, `current_page`, `last_page`, `has_more`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageEnvelope<T> {
    /// The items on this page.
    pub items: Vec<T>,
    /// The total number of items across all pages.
    pub total: u64,
    /// The number of items per page.
    pub per_page: u64,
    /// The current page number (1-indexed).
    pub current_page: u64,
    /// The last page number, `0` when there are no items.
    pub last_page: u64,
    /// Whether a page after this one exists.
    pub has_more: bool,
}

impl<T> PageEnvelope<T> {
    /// Creates a new envelope, deriving `last_page` and `has_more`.
    #[must_use]
    pub fn new(items: Vec<T>, current_page: u64, per_page: u64, total: u64) -> Self {
        let last_page = last_page_for(total, per_page);
        Self {
            items,
            total,
            per_page,
            current_page,
            last_page,
            has_more: current_page < last_page,
        }
    }

    /// Creates an empty envelope for the given request.
    #[must_use]
    pub fn empty(request: PageRequest) -> Self {
        Self::new(Vec::new(), request.page, request.per_page, 0)
    }

    /// Maps the page items to a different type.
    #[must_use]
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> PageEnvelope<U> {
        PageEnvelope {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            per_page: self.per_page,
            current_page: self.current_page,
            last_page: self.last_page,
            has_more: self.has_more,
        }
    }

    /// Maps every item, failing the whole page on the first error.
    ///
    /// The returned error carries the position of the item that failed.
    pub fn try_map<U, F>(self, mut f: F) -> Result<PageEnvelope<U>, MappingError>
    where
        F: FnMut(T) -> Result<U, MappingError>,
    {
        let items = self
            .items
            .into_iter()
            .enumerate()
            .map(|(index, item)| f(item).map_err(|e| e.at(index)))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(PageEnvelope {
            items,
            total: self.total,
            per_page: self.per_page,
            current_page: self.current_page,
            last_page: self.last_page,
            has_more: self.has_more,
        })
    }

    /// Maps every item, dropping the ones that fail.
    ///
    /// Each dropped item is logged at `warn`; the paging metadata is kept
    /// as-is, so `items` may be shorter than the row count on this page.
    #[must_use]
    pub fn map_lenient<U, F>(self, mut f: F) -> PageEnvelope<U>
    where
        F: FnMut(T) -> Result<U, MappingError>,
    {
        let items = self
            .items
            .into_iter()
            .enumerate()
            .filter_map(|(index, item)| match f(item) {
                Ok(mapped) => Some(mapped),
                Err(e) => {
                    warn!(index, error = %e.message, "Skipping row that failed to map");
                    None
                }
            })
            .collect();

        PageEnvelope {
            items,
            total: self.total,
            per_page: self.per_page,
            current_page: self.current_page,
            last_page: self.last_page,
            has_more: self.has_more,
        }
    }

    /// Returns true if the page is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of items on this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }
}

impl<T> Default for PageEnvelope<T> {
    fn default() -> Self {
        Self::empty(PageRequest::first())
    }
}

impl<T> IntoIterator for PageEnvelope<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_request() {
        let req = PageRequest::new(3, 10);
        assert_eq!(req.offset(), 20);
        assert_eq!(req.limit(), 10);
    }

    #[test]
    fn test_page_request_clamps_below_one() {
        let req = PageRequest::new(0, -5);
        assert_eq!(req.page, 1);
        assert_eq!(req.per_page, 1);
        assert_eq!(req.offset(), 0);

        let req = PageRequest::new(-3, 0);
        assert_eq!(req, PageRequest::new(1, 1));
    }

    #[test]
    fn test_page_request_first() {
        let req = PageRequest::first();
        assert_eq!(req.page, 1);
        assert_eq!(req.per_page, 10);
        assert_eq!(req.offset(), 0);
    }

    #[test]
    fn test_last_page_for() {
        assert_eq!(last_page_for(0, 10), 0);
        assert_eq!(last_page_for(1, 10), 1);
        assert_eq!(last_page_for(10, 10), 1);
        assert_eq!(last_page_for(11, 10), 2);
        assert_eq!(last_page_for(25, 10), 3);
        assert_eq!(last_page_for(25, 0), 0);
    }

    #[test]
    fn test_last_page_zero_iff_no_rows() {
        for per_page in 1..=7u64 {
            for total in 0..=50u64 {
                let last = last_page_for(total, per_page);
                assert_eq!(last == 0, total == 0);
                assert_eq!(last, (total + per_page - 1) / per_page);
            }
        }
    }

    #[test]
    fn test_envelope_first_of_three() {
        let page = PageEnvelope::new((0..10).collect::<Vec<_>>(), 1, 10, 25);
        assert_eq!(page.last_page, 3);
        assert!(page.has_more);
        assert_eq!(page.len(), 10);
    }

    #[test]
    fn test_envelope_last_page() {
        let page = PageEnvelope::new(vec![1, 2, 3, 4, 5], 3, 10, 25);
        assert_eq!(page.last_page, 3);
        assert!(!page.has_more);
    }

    #[test]
    fn test_envelope_beyond_last_page() {
        let page: PageEnvelope<i32> = PageEnvelope::new(vec![], 4, 10, 25);
        assert!(page.is_empty());
        assert_eq!(page.last_page, 3);
        assert!(!page.has_more);
    }

    #[test]
    fn test_envelope_empty() {
        let page: PageEnvelope<i32> = PageEnvelope::empty(PageRequest::new(2, 15));
        assert_eq!(page.total, 0);
        assert_eq!(page.last_page, 0);
        assert_eq!(page.current_page, 2);
        assert!(!page.has_more);
    }

    #[test]
    fn test_envelope_map() {
        let page = PageEnvelope::new(vec![1, 2, 3], 1, 10, 3);
        let mapped = page.map(|x| x * 2);
        assert_eq!(mapped.items, vec![2, 4, 6]);
        assert_eq!(mapped.total, 3);
    }

    #[test]
    fn test_envelope_try_map_reports_failing_index() {
        let page = PageEnvelope::new(vec![2, 4, 5, 6], 1, 10, 4);
        let err = page
            .try_map(|x| {
                if x % 2 == 0 {
                    Ok(x / 2)
                } else {
                    Err(MappingError::new(format!("{x} is odd")))
                }
            })
            .unwrap_err();
        assert_eq!(err.index, 2);
        assert_eq!(err.message, "5 is odd");
    }

    #[test]
    fn test_envelope_try_map_keeps_order_and_length() {
        let page = PageEnvelope::new(vec!["a", "bb", "ccc"], 2, 3, 9);
        let mapped = page.try_map(|s| Ok::<_, MappingError>(s.len())).unwrap();
        assert_eq!(mapped.items, vec![1, 2, 3]);
        assert_eq!(mapped.current_page, 2);
        assert!(mapped.has_more);
    }

    #[test]
    fn test_envelope_map_lenient_skips_failures() {
        let page = PageEnvelope::new(vec![1, -1, 2], 1, 10, 3);
        let mapped = page.map_lenient(|x| {
            u32::try_from(x).map_err(|_| MappingError::new("negative"))
        });
        assert_eq!(mapped.items, vec![1, 2]);
        assert_eq!(mapped.total, 3);
    }

    #[test]
    fn test_envelope_serialization_shape() {
        let page = PageEnvelope::new(vec![1], 1, 10, 1);
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "items": [1],
                "total": 1,
                "per_page": 10,
                "current_page": 1,
                "last_page": 1,
                "has_more": false
            })
        );
    }
}
