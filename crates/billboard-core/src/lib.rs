//! # Billboard Core
//!
//! Core types and error definitions shared by every layer of the billboard
//! inventory backend: the error taxonomy, paging request and page envelope
//! types, validation helpers, and tracing initialisation.

pub mod error;
pub mod pagination;
pub mod result;
pub mod telemetry;
pub mod validation;

pub use error::*;
pub use pagination::*;
pub use result::*;
pub use telemetry::{init_tracing, LogFormat, LoggingConfig};
pub use validation::*;

// Re-export shaku for dependency injection
pub use shaku::{module, HasComponent, Interface};
