//! The query paginator.
//!
//! A [`Paginator`] wraps one [`SelectQuery`] and a borrowed [`QuerySession`].
//! Each [`Paginator::paginate`] call counts the query's rows (once per
//! instance), fetches the requested page, decodes every row into the declared
//! shape and runs the registered processors in order.
//!
//! Pages past the last one are not an error: they come back empty with the
//! paging metadata intact.

use crate::row::{Annotated, FromQueryRow, ScalarColumns};
use crate::{QuerySession, SelectQuery};
use billboard_core::pagination::last_page_for;
use billboard_core::{BillboardResult, BoxFuture, MappingError, PageEnvelope, PageRequest};
use tracing::debug;

type Decoder<'s, R, T> = Box<dyn Fn(&R) -> Result<T, MappingError> + Send + Sync + 's>;

/// A transform applied to the fetched item list.
pub enum Processor<'s, T> {
    Sync(Box<dyn Fn(Vec<T>) -> Vec<T> + Send + Sync + 's>),
    Async(Box<dyn Fn(Vec<T>) -> BoxFuture<'s, Vec<T>> + Send + Sync + 's>),
}

/// Paginates one query over a borrowed session.
pub struct Paginator<'s, S: QuerySession, T> {
    query: SelectQuery,
    session: &'s S,
    decode: Decoder<'s, S::Row, T>,
    processors: Vec<Processor<'s, T>>,
    items: Vec<T>,
    total: Option<u64>,
    per_page: u64,
    page: u64,
    last_page: u64,
}

impl<'s, S: QuerySession, T> Paginator<'s, S, T> {
    /// Creates a paginator decoding each row with `decode`.
    pub fn new<F>(query: SelectQuery, session: &'s S, decode: F) -> Self
    where
        F: Fn(&S::Row) -> Result<T, MappingError> + Send + Sync + 's,
    {
        Self {
            query,
            session,
            decode: Box::new(decode),
            processors: Vec::new(),
            items: Vec::new(),
            total: None,
            per_page: PageRequest::DEFAULT_PER_PAGE,
            page: 1,
            last_page: 0,
        }
    }

    /// Registers a synchronous processor.
    #[must_use]
    pub fn process<F>(mut self, f: F) -> Self
    where
        F: Fn(Vec<T>) -> Vec<T> + Send + Sync + 's,
    {
        self.processors.push(Processor::Sync(Box::new(f)));
        self
    }

    /// Registers an asynchronous processor. Processors are awaited one at a
    /// time in registration order.
    #[must_use]
    pub fn process_async<F>(mut self, f: F) -> Self
    where
        F: Fn(Vec<T>) -> BoxFuture<'s, Vec<T>> + Send + Sync + 's,
    {
        self.processors.push(Processor::Async(Box::new(f)));
        self
    }

    /// Fetches one page. `page` and `per_page` below 1 are treated as 1.
    pub async fn paginate(&mut self, page: i64, per_page: i64) -> BillboardResult<&mut Self> {
        self.fetch(PageRequest::new(page, per_page)).await
    }

    /// Fetches the page described by `request`.
    ///
    /// The count runs before the page fetch and only on the first call;
    /// later calls reuse it. A page starting at or beyond the total skips
    /// the page fetch and comes back empty.
    pub async fn fetch(&mut self, request: PageRequest) -> BillboardResult<&mut Self> {
        self.page = request.page.max(1);
        self.per_page = request.per_page.max(1);

        let total = match self.total {
            Some(total) => total,
            None => {
                let total = self.session.fetch_count(&self.query.count_query()).await?;
                self.total = Some(total);
                total
            }
        };
        self.last_page = last_page_for(total, self.per_page);

        let offset = (self.page - 1).checked_mul(self.per_page).filter(|&o| o < total);
        debug!(
            page = self.page,
            per_page = self.per_page,
            total,
            last_page = self.last_page,
            "Fetching page"
        );

        // Pages at or past the end never reach the store.
        let rows = match offset {
            Some(offset) => {
                self.session
                    .fetch_rows(&self.query.with_page(offset, self.per_page))
                    .await?
            }
            None => Vec::new(),
        };

        let mut items = rows
            .iter()
            .enumerate()
            .map(|(i, row)| (self.decode)(row).map_err(|e| e.at(i)))
            .collect::<Result<Vec<_>, _>>()?;
        drop(rows);

        for processor in &self.processors {
            items = match processor {
                Processor::Sync(f) => f(items),
                Processor::Async(f) => f(items).await?,
            };
        }

        self.items = items;
        Ok(self)
    }

    /// Items of the current page.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Total rows across all pages; `0` before the first fetch.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.total.unwrap_or(0)
    }

    #[must_use]
    pub const fn per_page(&self) -> u64 {
        self.per_page
    }

    #[must_use]
    pub const fn current_page(&self) -> u64 {
        self.page
    }

    #[must_use]
    pub const fn last_page(&self) -> u64 {
        self.last_page
    }

    #[must_use]
    pub const fn has_more(&self) -> bool {
        self.page < self.last_page
    }

    /// Consumes the paginator into its page envelope.
    #[must_use]
    pub fn into_page(self) -> PageEnvelope<T> {
        let total = self.total();
        PageEnvelope::new(self.items, self.page, self.per_page, total)
    }

    /// Maps every item, failing on the first item that cannot be mapped.
    pub fn map<U, F>(self, f: F) -> Result<PageEnvelope<U>, MappingError>
    where
        F: FnMut(T) -> Result<U, MappingError>,
    {
        self.into_page().try_map(f)
    }

    /// Maps every item, skipping (and logging) the ones that cannot be mapped.
    #[must_use]
    pub fn map_lenient<U, F>(self, f: F) -> PageEnvelope<U>
    where
        F: FnMut(T) -> Result<U, MappingError>,
    {
        self.into_page().map_lenient(f)
    }
}

impl<'s, S, E> Paginator<'s, S, E>
where
    S: QuerySession,
    E: FromQueryRow<S::Row> + 's,
{
    /// A paginator whose rows are plain entities.
    pub fn entities(query: SelectQuery, session: &'s S) -> Self {
        Self::new(query, session, E::from_query_row)
    }
}

impl<'s, S, E> Paginator<'s, S, Annotated<E>>
where
    S: QuerySession,
    S::Row: ScalarColumns,
    E: FromQueryRow<S::Row> + 's,
{
    /// A paginator whose rows are an entity plus the named extra columns.
    pub fn annotated(query: SelectQuery, session: &'s S, extras: &[&str]) -> Self {
        let extras: Vec<String> = extras.iter().map(ToString::to_string).collect();
        Self::new(query, session, move |row| Annotated::decode(row, &extras))
    }
}
