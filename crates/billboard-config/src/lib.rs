//! # Billboard Config
//!
//! Layered configuration for the billboard inventory backend: TOML files,
//! an optional `.env`, and `BILLBOARD__*` environment variables.

mod app_config;
mod loader;

pub use app_config::*;
pub use loader::*;
