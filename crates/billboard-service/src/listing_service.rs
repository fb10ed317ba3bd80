//! Listing service trait definition.

use crate::dto::{
    AdminPrincipal, AdminResponse, CampaignListItem, InventoryItem, MediaPlanListItem,
    TeamMemberItem,
};
use async_trait::async_trait;
use billboard_core::{BillboardResult, Interface, PageEnvelope, PageRequest};
use billboard_repository::listing::{
    AdminFilter, CampaignFilter, InventoryFilter, MediaPlanFilter, TeamMemberFilter, TeamScope,
};

/// Paginated listings behind the table views.
#[async_trait]
pub trait ListingService: Interface + Send + Sync {
    /// Lists billboard faces.
    async fn list_inventories(
        &self,
        filter: InventoryFilter,
        page: PageRequest,
    ) -> BillboardResult<PageEnvelope<InventoryItem>>;

    /// Lists campaigns with their billboard counts and mock KPIs.
    async fn list_campaigns(
        &self,
        filter: CampaignFilter,
        page: PageRequest,
    ) -> BillboardResult<PageEnvelope<CampaignListItem>>;

    /// Lists media plans with their campaign span.
    async fn list_media_plans(
        &self,
        filter: MediaPlanFilter,
        page: PageRequest,
    ) -> BillboardResult<PageEnvelope<MediaPlanListItem>>;

    /// Lists the members of the caller's company.
    async fn list_team_members(
        &self,
        scope: TeamScope,
        filter: TeamMemberFilter,
        page: PageRequest,
    ) -> BillboardResult<PageEnvelope<TeamMemberItem>>;

    /// Lists administrators. Superadmin only.
    async fn list_admins(
        &self,
        caller: AdminPrincipal,
        filter: AdminFilter,
        page: PageRequest,
    ) -> BillboardResult<PageEnvelope<AdminResponse>>;
}
