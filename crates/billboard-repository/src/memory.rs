//! In-memory store session.
//!
//! Serves a fixed data set through the same [`QuerySession`] trait the
//! Postgres session implements and records every statement it receives,
//! so callers can observe round-trip counts and ordering without a database.

use crate::row::{FromQueryRow, ScalarColumns};
use crate::{QuerySession, SelectQuery, SqlValue};
use async_trait::async_trait;
use billboard_core::{BillboardError, BillboardResult, MappingError};
use chrono::{NaiveDate, NaiveDateTime};
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::sync::{Mutex, PoisonError};

/// One row of named scalar columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryRow(BTreeMap<String, SqlValue>);

impl MemoryRow {
    /// Builds a row from a JSON object.
    ///
    /// Strings shaped like `YYYY-MM-DD` or `YYYY-MM-DDTHH:MM:SS` become dates
    /// and timestamps; non-object values yield an empty row.
    #[must_use]
    pub fn from_json(value: serde_json::Value) -> Self {
        let serde_json::Value::Object(map) = value else {
            return Self::default();
        };
        Self(
            map.into_iter()
                .map(|(name, value)| (name, json_to_sql(value)))
                .collect(),
        )
    }

    /// Returns a column by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&SqlValue> {
        self.0.get(name)
    }
}

fn json_to_sql(value: serde_json::Value) -> SqlValue {
    use serde_json::Value;

    match value {
        Value::Null => SqlValue::Null,
        Value::Bool(v) => SqlValue::Bool(v),
        Value::Number(n) => n
            .as_i64()
            .map(SqlValue::Int)
            .or_else(|| n.as_f64().map(SqlValue::Float))
            .unwrap_or(SqlValue::Null),
        Value::String(s) => {
            if let Ok(date) = NaiveDate::parse_from_str(&s, "%Y-%m-%d") {
                SqlValue::Date(date)
            } else if let Ok(ts) = s.parse::<NaiveDateTime>() {
                SqlValue::Timestamp(ts)
            } else {
                SqlValue::Text(s)
            }
        }
        other => SqlValue::Text(other.to_string()),
    }
}

impl<T: DeserializeOwned> FromQueryRow<MemoryRow> for T {
    fn from_query_row(row: &MemoryRow) -> Result<Self, MappingError> {
        let value =
            serde_json::to_value(&row.0).map_err(|e| MappingError::new(e.to_string()))?;
        serde_json::from_value(value).map_err(|e| MappingError::new(e.to_string()))
    }
}

impl ScalarColumns for MemoryRow {
    fn scalar(&self, name: &str) -> Result<SqlValue, MappingError> {
        self.0
            .get(name)
            .cloned()
            .ok_or_else(|| MappingError::new(format!("no column found for name: {name}")))
    }
}

/// A statement received by a [`MemorySession`].
#[derive(Debug, Clone, PartialEq)]
pub enum Executed {
    Count(SelectQuery),
    Rows(SelectQuery),
}

/// A [`QuerySession`] over a fixed list of rows.
///
/// Counts report the number of rows; page fetches slice them by the query's
/// offset and limit. Filters in the query are not evaluated.
#[derive(Debug, Default)]
pub struct MemorySession {
    rows: Vec<MemoryRow>,
    failure: Option<String>,
    log: Mutex<Vec<Executed>>,
}

impl MemorySession {
    /// Creates a session serving `rows`.
    #[must_use]
    pub fn new(rows: Vec<MemoryRow>) -> Self {
        Self {
            rows,
            failure: None,
            log: Mutex::new(Vec::new()),
        }
    }

    /// Creates a session serving JSON objects as rows.
    #[must_use]
    pub fn from_json(rows: impl IntoIterator<Item = serde_json::Value>) -> Self {
        Self::new(rows.into_iter().map(MemoryRow::from_json).collect())
    }

    /// Creates a session whose every statement fails with a store error.
    #[must_use]
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::default()
        }
    }

    /// Returns every statement received so far, in order.
    #[must_use]
    pub fn executed(&self) -> Vec<Executed> {
        self.log.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Number of count statements received.
    #[must_use]
    pub fn count_calls(&self) -> usize {
        self.executed()
            .iter()
            .filter(|e| matches!(e, Executed::Count(_)))
            .count()
    }

    /// Number of page fetches received.
    #[must_use]
    pub fn row_calls(&self) -> usize {
        self.executed()
            .iter()
            .filter(|e| matches!(e, Executed::Rows(_)))
            .count()
    }

    fn record(&self, executed: Executed) -> BillboardResult<()> {
        self.log
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(executed);
        match &self.failure {
            Some(message) => Err(BillboardError::Database(message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl QuerySession for MemorySession {
    type Row = MemoryRow;

    async fn fetch_count(&self, query: &SelectQuery) -> BillboardResult<u64> {
        self.record(Executed::Count(query.clone()))?;
        Ok(self.rows.len() as u64)
    }

    async fn fetch_rows(&self, query: &SelectQuery) -> BillboardResult<Vec<MemoryRow>> {
        self.record(Executed::Rows(query.clone()))?;

        let offset = usize::try_from(query.offset().unwrap_or(0)).unwrap_or(usize::MAX);
        let limit = query
            .limit()
            .map_or(usize::MAX, |l| usize::try_from(l).unwrap_or(usize::MAX));

        Ok(self.rows.iter().skip(offset).take(limit).cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_recognises_dates() {
        let row = MemoryRow::from_json(json!({
            "start": "2024-01-31",
            "at": "2024-01-31T08:30:00",
            "name": "Gate 4",
            "n": 2,
            "ratio": 0.5
        }));
        assert!(matches!(row.get("start"), Some(SqlValue::Date(_))));
        assert!(matches!(row.get("at"), Some(SqlValue::Timestamp(_))));
        assert_eq!(row.get("name"), Some(&SqlValue::from("Gate 4")));
        assert_eq!(row.get("n"), Some(&SqlValue::Int(2)));
        assert_eq!(row.get("ratio"), Some(&SqlValue::Float(0.5)));
    }

    #[tokio::test]
    async fn test_fetch_rows_slices_by_page() {
        let session = MemorySession::from_json((1..=5).map(|id| json!({ "id": id })));
        let query = SelectQuery::table("t").with_page(2, 2);

        let rows = session.fetch_rows(&query).await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("id"), Some(&SqlValue::Int(3)));
        assert_eq!(session.row_calls(), 1);
        assert_eq!(session.count_calls(), 0);
    }

    #[tokio::test]
    async fn test_failing_session_records_then_fails() {
        let session = MemorySession::failing("connection reset");
        let err = session
            .fetch_count(&SelectQuery::table("t").count_query())
            .await
            .unwrap_err();

        assert!(err.is_store_failure());
        assert_eq!(session.count_calls(), 1);
    }
}
