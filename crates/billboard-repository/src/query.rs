//! Composable `SELECT` queries.
//!
//! A [`SelectQuery`] is an owned description of one statement. Filter and
//! `HAVING` fragments use `?` as the parameter marker; [`SelectQuery::to_sql`]
//! numbers them `$1..$n` in textual order, nested subqueries included, and
//! returns the parameters in the same order.
//!
//! Every transformation the paginator needs (`count_query`, `with_page`)
//! returns a new query and leaves the original untouched.

use billboard_core::{BillboardError, BillboardResult};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Serialize;
use std::fmt;

/// Alias given to the wrapped query inside a count query.
pub const COUNT_SOURCE_ALIAS: &str = "paginated_source";

/// A scalar value, used both for bound parameters and for the extra columns
/// of composite rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SqlValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Date(NaiveDate),
    Timestamp(NaiveDateTime),
    TimestampTz(DateTime<Utc>),
}

impl SqlValue {
    /// Returns true for SQL `NULL`.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub const fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(v) => Some(v),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Date(v) => Some(*v),
            _ => None,
        }
    }
}

impl From<i64> for SqlValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for SqlValue {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<f64> for SqlValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<bool> for SqlValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<String> for SqlValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<&str> for SqlValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<NaiveDate> for SqlValue {
    fn from(v: NaiveDate) -> Self {
        Self::Date(v)
    }
}

impl From<NaiveDateTime> for SqlValue {
    fn from(v: NaiveDateTime) -> Self {
        Self::Timestamp(v)
    }
}

impl From<DateTime<Utc>> for SqlValue {
    fn from(v: DateTime<Utc>) -> Self {
        Self::TimestampTz(v)
    }
}

impl<T: Into<SqlValue>> From<Option<T>> for SqlValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Order {
    Asc,
    #[default]
    Desc,
}

impl Order {
    /// Parses `asc`/`desc` case-insensitively; anything else is `Desc`.
    #[must_use]
    pub fn parse_or_desc(value: &str) -> Self {
        if value.eq_ignore_ascii_case("asc") {
            Self::Asc
        } else {
            Self::Desc
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asc => write!(f, "ASC"),
            Self::Desc => write!(f, "DESC"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Source {
    Table(String),
    Subquery(Box<SelectQuery>, String),
}

#[derive(Debug, Clone, PartialEq)]
struct Fragment {
    sql: String,
    params: Vec<SqlValue>,
}

impl Fragment {
    fn new(sql: impl Into<String>, params: Vec<SqlValue>) -> Self {
        Self {
            sql: sql.into(),
            params,
        }
    }

    /// Copies the fragment into `out`, binding one parameter per marker.
    ///
    /// A `?` inside a single-quoted literal is left alone and `??` renders a
    /// literal `?`, so operators such as jsonb `?|` can still be written.
    fn render(&self, out: &mut Rendered) -> BillboardResult<()> {
        let mut params = self.params.iter();
        let mut chars = self.sql.chars().peekable();
        let mut quoted = false;

        while let Some(ch) = chars.next() {
            match ch {
                '\'' => {
                    quoted = !quoted;
                    out.sql.push(ch);
                }
                '?' if quoted => out.sql.push(ch),
                '?' if chars.peek() == Some(&'?') => {
                    chars.next();
                    out.sql.push('?');
                }
                '?' => {
                    let value = params.next().ok_or_else(|| self.mismatch())?;
                    out.bind(value.clone());
                }
                _ => out.sql.push(ch),
            }
        }

        match params.next() {
            Some(_) => Err(self.mismatch()),
            None => Ok(()),
        }
    }

    fn mismatch(&self) -> BillboardError {
        BillboardError::internal(format!(
            "markers in `{}` do not match its {} parameter(s)",
            self.sql,
            self.params.len()
        ))
    }
}

/// A statement being rendered: SQL text plus parameters in `$n` order.
#[derive(Debug, Default)]
struct Rendered {
    sql: String,
    params: Vec<SqlValue>,
}

impl Rendered {
    fn push(&mut self, text: &str) {
        self.sql.push_str(text);
    }

    fn bind(&mut self, value: SqlValue) {
        self.params.push(value);
        self.sql.push('$');
        self.sql.push_str(&self.params.len().to_string());
    }

    fn bind_bound(&mut self, clause: &str, value: u64) -> BillboardResult<()> {
        let value = i64::try_from(value)
            .map_err(|_| BillboardError::validation(format!("{clause} {value} is out of range")))?;
        self.bind(SqlValue::Int(value));
        Ok(())
    }
}

/// An owned, composable `SELECT` statement.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectQuery {
    columns: Vec<String>,
    source: Source,
    joins: Vec<String>,
    filters: Vec<Fragment>,
    group_by: Vec<String>,
    having: Vec<Fragment>,
    order_by: Vec<(String, Order)>,
    limit: Option<u64>,
    offset: Option<u64>,
}

impl SelectQuery {
    /// Starts a query selecting from `table`.
    #[must_use]
    pub fn table(name: impl Into<String>) -> Self {
        Self::from_source(Source::Table(name.into()))
    }

    /// Starts a query selecting from a nested query.
    #[must_use]
    pub fn from_subquery(query: Self, alias: impl Into<String>) -> Self {
        Self::from_source(Source::Subquery(Box::new(query), alias.into()))
    }

    fn from_source(source: Source) -> Self {
        Self {
            columns: Vec::new(),
            source,
            joins: Vec::new(),
            filters: Vec::new(),
            group_by: Vec::new(),
            having: Vec::new(),
            order_by: Vec::new(),
            limit: None,
            offset: None,
        }
    }

    /// Adds a result column. With no columns the query selects `*`.
    #[must_use]
    pub fn column(mut self, expr: impl Into<String>) -> Self {
        self.columns.push(expr.into());
        self
    }

    /// Adds an aliased result column, `<expr> AS <alias>`.
    #[must_use]
    pub fn column_as(self, expr: impl AsRef<str>, alias: impl AsRef<str>) -> Self {
        let column = format!("{} AS {}", expr.as_ref(), alias.as_ref());
        self.column(column)
    }

    /// Adds a raw join clause, e.g. `INNER JOIN teams ON teams.id = users.team_id`.
    #[must_use]
    pub fn join(mut self, clause: impl Into<String>) -> Self {
        self.joins.push(clause.into());
        self
    }

    /// Adds `LEFT JOIN <table> ON <on>`.
    #[must_use]
    pub fn left_join(self, table: impl AsRef<str>, on: impl AsRef<str>) -> Self {
        let clause = format!("LEFT JOIN {} ON {}", table.as_ref(), on.as_ref());
        self.join(clause)
    }

    /// Adds a `WHERE` predicate; predicates are joined with `AND`.
    #[must_use]
    pub fn filter(mut self, sql: impl Into<String>, params: Vec<SqlValue>) -> Self {
        self.filters.push(Fragment::new(sql, params));
        self
    }

    /// Adds `<column> = ?`.
    #[must_use]
    pub fn filter_eq(self, column: impl AsRef<str>, value: impl Into<SqlValue>) -> Self {
        let sql = format!("{} = ?", column.as_ref());
        self.filter(sql, vec![value.into()])
    }

    /// Adds a case-insensitive substring match of `keyword` against any of
    /// `columns`. The keyword is trimmed; a blank keyword adds nothing.
    #[must_use]
    pub fn filter_ilike_any(self, columns: &[&str], keyword: &str) -> Self {
        let keyword = keyword.trim();
        if keyword.is_empty() || columns.is_empty() {
            return self;
        }

        let pattern = format!("%{keyword}%");
        let sql = columns
            .iter()
            .map(|column| format!("{column} ILIKE ?"))
            .collect::<Vec<_>>()
            .join(" OR ");
        let params = vec![SqlValue::Text(pattern); columns.len()];

        if columns.len() == 1 {
            self.filter(sql, params)
        } else {
            self.filter(format!("({sql})"), params)
        }
    }

    /// Adds a `GROUP BY` expression.
    #[must_use]
    pub fn group_by(mut self, expr: impl Into<String>) -> Self {
        self.group_by.push(expr.into());
        self
    }

    /// Adds a `HAVING` predicate; predicates are joined with `AND`.
    #[must_use]
    pub fn having(mut self, sql: impl Into<String>, params: Vec<SqlValue>) -> Self {
        self.having.push(Fragment::new(sql, params));
        self
    }

    /// Adds an `ORDER BY` term.
    #[must_use]
    pub fn order_by(mut self, expr: impl Into<String>, order: Order) -> Self {
        self.order_by.push((expr.into(), order));
        self
    }

    /// Returns a query counting the rows this query yields.
    ///
    /// The query is wrapped as a subquery, so filters, joins and grouping all
    /// apply to the count. Paging already applied to `self` is dropped.
    #[must_use]
    pub fn count_query(&self) -> Self {
        let mut inner = self.clone();
        inner.limit = None;
        inner.offset = None;
        Self::from_subquery(inner, COUNT_SOURCE_ALIAS).column("COUNT(*)")
    }

    /// Returns a copy of this query restricted to one page.
    #[must_use]
    pub fn with_page(&self, offset: u64, limit: u64) -> Self {
        let mut paged = self.clone();
        paged.offset = Some(offset);
        paged.limit = Some(limit);
        paged
    }

    /// The nested query, when this query selects from one.
    #[must_use]
    pub fn subquery(&self) -> Option<&Self> {
        match &self.source {
            Source::Subquery(query, _) => Some(query),
            Source::Table(_) => None,
        }
    }

    /// Returns the `LIMIT`, if any.
    #[must_use]
    pub const fn limit(&self) -> Option<u64> {
        self.limit
    }

    /// Returns the `OFFSET`, if any.
    #[must_use]
    pub const fn offset(&self) -> Option<u64> {
        self.offset
    }

    /// Renders the statement with `$n` placeholders and returns its
    /// parameters in placeholder order.
    ///
    /// Markers are only read from `filter` and `having` fragments; columns,
    /// joins and sort terms are copied verbatim. `LIMIT` and `OFFSET` are
    /// bound as `BIGINT` parameters.
    ///
    /// # Errors
    ///
    /// Fails when a fragment's markers and parameters disagree, or when the
    /// paging values do not fit a `BIGINT`.
    pub fn to_sql(&self) -> BillboardResult<(String, Vec<SqlValue>)> {
        let mut out = Rendered::default();
        self.write(&mut out)?;
        Ok((out.sql, out.params))
    }

    /// Renders the statement with `$n` placeholders.
    pub fn sql(&self) -> BillboardResult<String> {
        self.to_sql().map(|(sql, _)| sql)
    }

    /// Returns the parameters in placeholder order.
    pub fn params(&self) -> BillboardResult<Vec<SqlValue>> {
        self.to_sql().map(|(_, params)| params)
    }

    fn write(&self, out: &mut Rendered) -> BillboardResult<()> {
        out.push("SELECT ");
        if self.columns.is_empty() {
            out.push("*");
        } else {
            out.push(&self.columns.join(", "));
        }

        out.push(" FROM ");
        match &self.source {
            Source::Table(name) => out.push(name),
            Source::Subquery(query, alias) => {
                out.push("(");
                query.write(out)?;
                out.push(") AS ");
                out.push(alias);
            }
        }

        for join in &self.joins {
            out.push(" ");
            out.push(join);
        }

        write_predicates(out, " WHERE ", &self.filters)?;

        if !self.group_by.is_empty() {
            out.push(" GROUP BY ");
            out.push(&self.group_by.join(", "));
        }

        write_predicates(out, " HAVING ", &self.having)?;

        if !self.order_by.is_empty() {
            let terms = self
                .order_by
                .iter()
                .map(|(expr, order)| format!("{expr} {order}"))
                .collect::<Vec<_>>()
                .join(", ");
            out.push(" ORDER BY ");
            out.push(&terms);
        }

        if let Some(limit) = self.limit {
            out.push(" LIMIT ");
            out.bind_bound("LIMIT", limit)?;
        }
        if let Some(offset) = self.offset {
            out.push(" OFFSET ");
            out.bind_bound("OFFSET", offset)?;
        }
        Ok(())
    }
}

fn write_predicates(out: &mut Rendered, keyword: &str, fragments: &[Fragment]) -> BillboardResult<()> {
    if fragments.is_empty() {
        return Ok(());
    }

    out.push(keyword);
    for (i, fragment) in fragments.iter().enumerate() {
        if i > 0 {
            out.push(" AND ");
        }
        fragment.render(out)?;
    }
    Ok(())
}
