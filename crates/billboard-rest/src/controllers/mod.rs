//! REST API controllers.

pub mod listing_controller;

pub use listing_controller::*;
