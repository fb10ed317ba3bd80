//! Decoding fetched rows into entities and composite rows.
//!
//! The shape of a row is declared by the caller: either a plain entity
//! ([`FromQueryRow`]) or an entity plus named extra scalars ([`Annotated`]).

use crate::SqlValue;
use billboard_core::MappingError;
use chrono::NaiveDate;
use serde::Serialize;
use sqlx::postgres::{PgRow, Postgres};
use sqlx::{Column, FromRow, Row, TypeInfo};
use std::collections::BTreeMap;

/// Decodes one entity from a row of type `R`.
pub trait FromQueryRow<R>: Sized {
    fn from_query_row(row: &R) -> Result<Self, MappingError>;
}

impl<T> FromQueryRow<PgRow> for T
where
    T: for<'r> FromRow<'r, PgRow>,
{
    fn from_query_row(row: &PgRow) -> Result<Self, MappingError> {
        T::from_row(row).map_err(|e| MappingError::new(e.to_string()))
    }
}

/// Reads a named column as a [`SqlValue`].
pub trait ScalarColumns {
    fn scalar(&self, name: &str) -> Result<SqlValue, MappingError>;
}

impl ScalarColumns for PgRow {
    fn scalar(&self, name: &str) -> Result<SqlValue, MappingError> {
        let column = self
            .try_column(name)
            .map_err(|e| MappingError::new(e.to_string()))?;

        let value = match column.type_info().name() {
            "INT8" => decode::<i64>(self, name)?.map_or(SqlValue::Null, SqlValue::Int),
            "INT4" => decode::<i32>(self, name)?.map_or(SqlValue::Null, SqlValue::from),
            "INT2" => decode::<i16>(self, name)?
                .map_or(SqlValue::Null, |v| SqlValue::Int(i64::from(v))),
            "FLOAT8" => decode::<f64>(self, name)?.map_or(SqlValue::Null, SqlValue::Float),
            "FLOAT4" => decode::<f32>(self, name)?
                .map_or(SqlValue::Null, |v| SqlValue::Float(f64::from(v))),
            "BOOL" => decode::<bool>(self, name)?.map_or(SqlValue::Null, SqlValue::Bool),
            "TEXT" | "VARCHAR" | "BPCHAR" | "NAME" => {
                decode::<String>(self, name)?.map_or(SqlValue::Null, SqlValue::Text)
            }
            "DATE" => decode::<NaiveDate>(self, name)?.map_or(SqlValue::Null, SqlValue::Date),
            "TIMESTAMP" => decode::<chrono::NaiveDateTime>(self, name)?
                .map_or(SqlValue::Null, SqlValue::Timestamp),
            "TIMESTAMPTZ" => decode::<chrono::DateTime<chrono::Utc>>(self, name)?
                .map_or(SqlValue::Null, SqlValue::TimestampTz),
            other => {
                return Err(MappingError::new(format!(
                    "column '{name}' has unsupported type {other}"
                )))
            }
        };

        Ok(value)
    }
}

fn decode<'r, T>(row: &'r PgRow, name: &str) -> Result<Option<T>, MappingError>
where
    T: sqlx::Decode<'r, Postgres> + sqlx::Type<Postgres>,
{
    row.try_get::<Option<T>, _>(name)
        .map_err(|e| MappingError::new(format!("column '{name}': {e}")))
}

/// An entity together with extra scalar columns selected alongside it.
///
/// Serialises flattened: the extras appear as attributes of the entity
/// under their column alias.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Annotated<E> {
    #[serde(flatten)]
    pub entity: E,
    #[serde(flatten)]
    pub extras: BTreeMap<String, SqlValue>,
}

impl<E> Annotated<E> {
    /// Decodes the entity and every named extra column from `row`.
    ///
    /// A named column missing from the row is an error.
    pub fn decode<R>(row: &R, extras: &[String]) -> Result<Self, MappingError>
    where
        E: FromQueryRow<R>,
        R: ScalarColumns,
    {
        let entity = E::from_query_row(row)?;
        let extras = extras
            .iter()
            .map(|name| Ok((name.clone(), row.scalar(name)?)))
            .collect::<Result<BTreeMap<_, _>, MappingError>>()?;

        Ok(Self { entity, extras })
    }

    /// Returns an extra column by name.
    #[must_use]
    pub fn extra(&self, name: &str) -> Option<&SqlValue> {
        self.extras.get(name)
    }

    /// Reads an integer extra; `NULL` reads as `0`.
    pub fn extra_count(&self, name: &str) -> Result<i64, MappingError> {
        match self.extra(name) {
            Some(SqlValue::Int(v)) => Ok(*v),
            Some(SqlValue::Null) => Ok(0),
            Some(other) => Err(MappingError::new(format!(
                "extra '{name}' is not an integer: {other:?}"
            ))),
            None => Err(missing_extra(name)),
        }
    }

    /// Reads a nullable date extra.
    pub fn extra_date(&self, name: &str) -> Result<Option<NaiveDate>, MappingError> {
        match self.extra(name) {
            Some(SqlValue::Date(v)) => Ok(Some(*v)),
            Some(SqlValue::Null) => Ok(None),
            Some(other) => Err(MappingError::new(format!(
                "extra '{name}' is not a date: {other:?}"
            ))),
            None => Err(missing_extra(name)),
        }
    }

    /// Reads a nullable text extra.
    pub fn extra_text(&self, name: &str) -> Result<Option<String>, MappingError> {
        match self.extra(name) {
            Some(SqlValue::Text(v)) => Ok(Some(v.clone())),
            Some(SqlValue::Null) => Ok(None),
            Some(other) => Err(MappingError::new(format!(
                "extra '{name}' is not text: {other:?}"
            ))),
            None => Err(missing_extra(name)),
        }
    }
}

fn missing_extra(name: &str) -> MappingError {
    MappingError::new(format!("extra column '{name}' was not selected"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryRow;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Board {
        id: i64,
        name: String,
    }

    #[test]
    fn test_annotated_decode_attaches_extras() {
        let row = MemoryRow::from_json(json!({"id": 1, "name": "A", "billboard_count": 4}));
        let item: Annotated<Board> =
            Annotated::decode(&row, &["billboard_count".to_string()]).unwrap();

        assert_eq!(item.entity, Board { id: 1, name: "A".to_string() });
        assert_eq!(item.extra_count("billboard_count").unwrap(), 4);
    }

    #[test]
    fn test_annotated_serializes_flat() {
        let row = MemoryRow::from_json(json!({"id": 2, "name": "B", "billboard_count": 0}));
        let item: Annotated<Board> =
            Annotated::decode(&row, &["billboard_count".to_string()]).unwrap();

        assert_eq!(
            serde_json::to_value(&item).unwrap(),
            json!({"id": 2, "name": "B", "billboard_count": 0})
        );
    }

    #[test]
    fn test_missing_extra_column_is_an_error() {
        let row = MemoryRow::from_json(json!({"id": 3, "name": "C"}));
        let err = Annotated::<Board>::decode(&row, &["billboard_count".to_string()]).unwrap_err();
        assert!(err.message.contains("billboard_count"));
    }

    #[test]
    fn test_extra_readers() {
        let row = MemoryRow::from_json(json!({
            "id": 4,
            "name": "D",
            "start_date": "2024-03-01",
            "end_date": null,
            "campaigns_count": null,
            "operator_first_name": "Ana"
        }));
        let names: Vec<String> = ["start_date", "end_date", "campaigns_count", "operator_first_name"]
            .iter()
            .map(ToString::to_string)
            .collect();
        let item: Annotated<Board> = Annotated::decode(&row, &names).unwrap();

        assert_eq!(
            item.extra_date("start_date").unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 1)
        );
        assert_eq!(item.extra_date("end_date").unwrap(), None);
        assert_eq!(item.extra_count("campaigns_count").unwrap(), 0);
        assert_eq!(item.extra_text("operator_first_name").unwrap().as_deref(), Some("Ana"));
        assert!(item.extra_count("operator_first_name").is_err());
        assert!(item.extra_text("nope").is_err());
    }
}
