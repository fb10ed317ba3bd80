//! # Billboard Repository
//!
//! Data access for the billboard inventory backend:
//!
//! ```text
//! Service
//!   ↓  Arc<dyn ListingRepository>   (listing interface)
//! PgListingRepository               (builds the listing query, paginates it)
//!   ↓  Paginator<PgSession, T>      (count + page fetch + row decoding)
//! PgSession                         (borrowed PgPool)
//!   ↓
//! Postgres
//! ```
//!
//! ## Structure
//!
//! ```text
//! src/
//!   query.rs        ← SelectQuery, SqlValue
//!   session.rs      ← QuerySession trait, PgSession
//!   memory.rs       ← MemorySession (in-memory QuerySession, `test-support`)
//!   row.rs          ← FromQueryRow, ScalarColumns, Annotated
//!   paginator.rs    ← Paginator
//!   entities.rs     ← row types per table
//!   listing/        ← filters and listing queries per resource
//!   traits.rs       ← ListingRepository trait
//!   postgres/       ← PgListingRepository
//! ```

pub mod entities;
pub mod listing;
#[cfg(any(test, feature = "test-support"))]
pub mod memory;
pub mod paginator;
pub mod pool;
pub mod postgres;
pub mod query;
pub mod row;
pub mod session;
pub mod traits;

#[cfg(any(test, feature = "test-support"))]
pub use memory::{MemoryRow, MemorySession};
pub use paginator::{Paginator, Processor};
pub use pool::*;
pub use postgres::*;
pub use query::{Order, SelectQuery, SqlValue, COUNT_SOURCE_ALIAS};
pub use row::{Annotated, FromQueryRow, ScalarColumns};
pub use session::{PgSession, QuerySession};
pub use traits::*;
