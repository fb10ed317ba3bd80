//! Custom Axum extractors and query parameter types.

mod filters;
mod pagination;
mod validated;

pub use filters::*;
pub use pagination::*;
pub use validated::*;
