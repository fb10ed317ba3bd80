//! Application state for Axum handlers.

use billboard_config::PaginationConfig;
use billboard_service::ListingService;
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub listing_service: Arc<dyn ListingService>,
    pub pagination: PaginationConfig,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(listing_service: Arc<dyn ListingService>, pagination: PaginationConfig) -> Self {
        Self {
            listing_service,
            pagination,
        }
    }
}
