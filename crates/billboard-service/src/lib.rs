//! # Billboard Service
//!
//! Listing services for the billboard inventory backend. Each listing
//! builds its filtered query through the repository, paginates it and turns
//! the rows into response DTOs.

pub mod clock;
pub mod di;
pub mod dto;
pub mod listing_service;
pub mod listing_service_impl;

pub use clock::*;
pub use di::*;
pub use dto::*;
pub use listing_service::*;
pub use listing_service_impl::ListingServiceComponent;
