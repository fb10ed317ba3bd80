//! # Billboard REST
//!
//! HTTP-facing surface of the billboard inventory backend: the
//! `{code, message, data}` response envelope, error rendering, paging and
//! filter query parameters, and the list handlers. Route wiring and
//! authentication live with the hosting server, which places the caller's
//! `TeamScope` or `AdminPrincipal` in the request extensions.

pub mod controllers;
pub mod extractors;
pub mod responses;
pub mod state;

pub use state::*;
