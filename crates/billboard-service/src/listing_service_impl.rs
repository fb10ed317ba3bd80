//! Listing service implementation.

use crate::clock::Clock;
use crate::dto::{
    AdminPrincipal, AdminResponse, CampaignListItem, InventoryItem, MediaPlanListItem,
    TeamMemberItem,
};
use crate::listing_service::ListingService;
use async_trait::async_trait;
use billboard_core::{BillboardError, BillboardResult, PageEnvelope, PageRequest};
use billboard_repository::listing::{
    AdminFilter, CampaignFilter, InventoryFilter, MediaPlanFilter, TeamMemberFilter, TeamScope,
};
use billboard_repository::ListingRepository;
use shaku::Component;
use std::sync::Arc;
use tracing::{debug, warn};

/// Listing service component for Shaku DI.
#[derive(Component)]
#[shaku(interface = ListingService)]
pub struct ListingServiceComponent {
    #[shaku(inject)]
    listing_repository: Arc<dyn ListingRepository>,
    #[shaku(inject)]
    clock: Arc<dyn Clock>,
}

impl ListingServiceComponent {
    /// Creates a listing service outside of a DI module.
    pub fn new(listing_repository: Arc<dyn ListingRepository>, clock: Arc<dyn Clock>) -> Self {
        Self {
            listing_repository,
            clock,
        }
    }
}

#[async_trait]
impl ListingService for ListingServiceComponent {
    async fn list_inventories(
        &self,
        filter: InventoryFilter,
        page: PageRequest,
    ) -> BillboardResult<PageEnvelope<InventoryItem>> {
        let rows = self.listing_repository.inventories(&filter, page).await?;
        Ok(rows.map(InventoryItem::from))
    }

    async fn list_campaigns(
        &self,
        filter: CampaignFilter,
        page: PageRequest,
    ) -> BillboardResult<PageEnvelope<CampaignListItem>> {
        let today = self.clock.today();
        let rows = self.listing_repository.campaigns(&filter, today, page).await?;
        debug!(total = rows.total, "Campaign page fetched");

        Ok(rows.try_map(|row| CampaignListItem::from_row(row, today))?)
    }

    async fn list_media_plans(
        &self,
        filter: MediaPlanFilter,
        page: PageRequest,
    ) -> BillboardResult<PageEnvelope<MediaPlanListItem>> {
        let today = self.clock.today();
        let rows = self
            .listing_repository
            .media_plans(&filter, today, page)
            .await?;
        debug!(total = rows.total, "Media plan page fetched");

        Ok(rows.try_map(|row| MediaPlanListItem::from_row(row, today))?)
    }

    async fn list_team_members(
        &self,
        scope: TeamScope,
        filter: TeamMemberFilter,
        page: PageRequest,
    ) -> BillboardResult<PageEnvelope<TeamMemberItem>> {
        let rows = self
            .listing_repository
            .team_members(&scope, &filter, page)
            .await?;
        Ok(rows.map(TeamMemberItem::from))
    }

    async fn list_admins(
        &self,
        caller: AdminPrincipal,
        filter: AdminFilter,
        page: PageRequest,
    ) -> BillboardResult<PageEnvelope<AdminResponse>> {
        if !caller.is_superadmin() {
            warn!(admin_id = caller.id, role = %caller.role, "Admin list denied");
            return Err(BillboardError::forbidden("Not enough permissions"));
        }

        let rows = self.listing_repository.admins(&filter, page).await?;
        Ok(rows.map(AdminResponse::from))
    }
}

impl std::fmt::Debug for ListingServiceComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListingServiceComponent").finish_non_exhaustive()
    }
}
