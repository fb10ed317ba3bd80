//! Result type aliases for the billboard backend.

use crate::BillboardError;

/// A specialized `Result` type for billboard operations.
pub type BillboardResult<T> = Result<T, BillboardError>;

/// A boxed future returning a `BillboardResult`.
pub type BoxFuture<'a, T> = futures::future::BoxFuture<'a, BillboardResult<T>>;
