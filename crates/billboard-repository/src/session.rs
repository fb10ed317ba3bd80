//! Store sessions: the executors queries run through.

use crate::{SelectQuery, SqlValue};
use async_trait::async_trait;
use billboard_core::{BillboardError, BillboardResult};
use sqlx::postgres::{PgArguments, PgPool, PgRow, Postgres};
use sqlx::Arguments;
use tracing::debug;

/// Something that can execute a count query and a page query.
///
/// Sessions are borrowed by their callers; they never own the connections
/// they run on.
#[async_trait]
pub trait QuerySession: Send + Sync {
    /// The row type produced by page fetches.
    type Row: Send + Sync;

    /// Executes a `SELECT COUNT(*) ...` query and returns the count.
    async fn fetch_count(&self, query: &SelectQuery) -> BillboardResult<u64>;

    /// Executes a query and returns its rows.
    async fn fetch_rows(&self, query: &SelectQuery) -> BillboardResult<Vec<Self::Row>>;
}

/// A [`QuerySession`] over a borrowed Postgres pool.
#[derive(Debug, Clone, Copy)]
pub struct PgSession<'a> {
    pool: &'a PgPool,
    log_queries: bool,
}

impl<'a> PgSession<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            pool,
            log_queries: false,
        }
    }

    /// Logs every statement at `debug` before it runs.
    #[must_use]
    pub const fn with_query_logging(mut self, enabled: bool) -> Self {
        self.log_queries = enabled;
        self
    }

    fn prepare(&self, query: &SelectQuery) -> BillboardResult<(String, PgArguments)> {
        let (sql, params) = query.to_sql()?;
        if self.log_queries {
            debug!(sql = %sql, params = params.len(), "Executing query");
        }
        Ok((sql, bind_all(params)?))
    }
}

fn bind_all(params: Vec<SqlValue>) -> BillboardResult<PgArguments> {
    let mut args = PgArguments::default();
    for (i, value) in params.into_iter().enumerate() {
        let bound = match value {
            SqlValue::Null => args.add(None::<String>),
            SqlValue::Bool(v) => args.add(v),
            SqlValue::Int(v) => args.add(v),
            SqlValue::Float(v) => args.add(v),
            SqlValue::Text(v) => args.add(v),
            SqlValue::Date(v) => args.add(v),
            SqlValue::Timestamp(v) => args.add(v),
            SqlValue::TimestampTz(v) => args.add(v),
        };
        bound.map_err(|e| {
            BillboardError::Database(format!("Failed to bind parameter ${}: {}", i + 1, e))
        })?;
    }
    Ok(args)
}

#[async_trait]
impl QuerySession for PgSession<'_> {
    type Row = PgRow;

    async fn fetch_count(&self, query: &SelectQuery) -> BillboardResult<u64> {
        let (sql, args) = self.prepare(query)?;
        let count: i64 = sqlx::query_scalar_with::<Postgres, i64, _>(&sql, args)
            .fetch_one(self.pool)
            .await?;

        u64::try_from(count)
            .map_err(|_| BillboardError::Database(format!("Negative row count: {count}")))
    }

    async fn fetch_rows(&self, query: &SelectQuery) -> BillboardResult<Vec<PgRow>> {
        let (sql, args) = self.prepare(query)?;
        let rows = sqlx::query_with::<Postgres, _>(&sql, args)
            .fetch_all(self.pool)
            .await?;
        Ok(rows)
    }
}
