//! Repository trait definitions.

use crate::entities::{Admin, Campaign, Inventory, MediaPlan, TeamMember};
use crate::listing::{
    AdminFilter, CampaignFilter, InventoryFilter, MediaPlanFilter, TeamMemberFilter, TeamScope,
};
use crate::Annotated;
use async_trait::async_trait;
use billboard_core::{BillboardResult, Interface, PageEnvelope, PageRequest};
use chrono::NaiveDate;

/// A campaign with its `billboard_count`.
pub type CampaignRow = Annotated<Campaign>;

/// A media plan with its aggregated span, campaign count and operator name.
pub type MediaPlanRow = Annotated<MediaPlan>;

/// Paginated listings of every listed resource.
///
/// `today` anchors the date-based status filters.
#[async_trait]
pub trait ListingRepository: Interface + Send + Sync {
    /// Lists inventories.
    async fn inventories(
        &self,
        filter: &InventoryFilter,
        page: PageRequest,
    ) -> BillboardResult<PageEnvelope<Inventory>>;

    /// Lists campaigns with their billboard counts.
    async fn campaigns(
        &self,
        filter: &CampaignFilter,
        today: NaiveDate,
        page: PageRequest,
    ) -> BillboardResult<PageEnvelope<CampaignRow>>;

    /// Lists media plans with their aggregates.
    async fn media_plans(
        &self,
        filter: &MediaPlanFilter,
        today: NaiveDate,
        page: PageRequest,
    ) -> BillboardResult<PageEnvelope<MediaPlanRow>>;

    /// Lists the members of one team.
    async fn team_members(
        &self,
        scope: &TeamScope,
        filter: &TeamMemberFilter,
        page: PageRequest,
    ) -> BillboardResult<PageEnvelope<TeamMember>>;

    /// Lists back-office admins.
    async fn admins(
        &self,
        filter: &AdminFilter,
        page: PageRequest,
    ) -> BillboardResult<PageEnvelope<Admin>>;
}
