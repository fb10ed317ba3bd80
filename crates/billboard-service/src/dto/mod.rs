//! Data Transfer Objects for the listing endpoints.

pub mod admin_dto;
pub mod campaign_dto;
pub mod inventory_dto;
pub mod media_plan_dto;
pub mod team_dto;

pub use admin_dto::*;
pub use campaign_dto::*;
pub use inventory_dto::*;
pub use media_plan_dto::*;
pub use team_dto::*;
