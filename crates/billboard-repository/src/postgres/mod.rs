//! Postgres-backed repositories.

mod listing_repository;

pub use listing_repository::{PgListingRepository, PgListingRepositoryParameters};
