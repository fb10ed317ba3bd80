//! Postgres listing repository.

use crate::entities::{Admin, Inventory, TeamMember};
use crate::listing::{
    admin_query, campaign_query, inventory_query, media_plan_query, team_member_query,
    AdminFilter, CampaignFilter, InventoryFilter, MediaPlanFilter, TeamMemberFilter, TeamScope,
    BILLBOARD_COUNT, MEDIA_PLAN_EXTRAS,
};
use crate::traits::{CampaignRow, ListingRepository, MediaPlanRow};
use crate::{DatabasePoolInterface, Paginator, PgSession};
use async_trait::async_trait;
use billboard_core::{BillboardResult, PageEnvelope, PageRequest};
use chrono::NaiveDate;
use shaku::Component;
use std::sync::Arc;
use tracing::debug;

/// Listing repository running every listing through the paginator on a
/// Postgres session.
#[derive(Component, Clone)]
#[shaku(interface = ListingRepository)]
pub struct PgListingRepository {
    #[shaku(inject)]
    pool: Arc<dyn DatabasePoolInterface>,
    #[shaku(default = false)]
    log_queries: bool,
}

impl PgListingRepository {
    /// Creates a new Postgres listing repository.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self {
            pool,
            log_queries: false,
        }
    }

    /// Logs the SQL of every statement at `debug`.
    #[must_use]
    pub const fn with_query_logging(mut self, enabled: bool) -> Self {
        self.log_queries = enabled;
        self
    }

    fn session(&self) -> PgSession<'_> {
        PgSession::new(self.pool.inner()).with_query_logging(self.log_queries)
    }
}

#[async_trait]
impl ListingRepository for PgListingRepository {
    async fn inventories(
        &self,
        filter: &InventoryFilter,
        page: PageRequest,
    ) -> BillboardResult<PageEnvelope<Inventory>> {
        debug!(?filter, page = page.page, per_page = page.per_page, "Listing inventories");

        let session = self.session();
        let mut paginator = Paginator::<_, Inventory>::entities(inventory_query(filter), &session);
        paginator.fetch(page).await?;
        Ok(paginator.into_page())
    }

    async fn campaigns(
        &self,
        filter: &CampaignFilter,
        today: NaiveDate,
        page: PageRequest,
    ) -> BillboardResult<PageEnvelope<CampaignRow>> {
        debug!(?filter, %today, page = page.page, per_page = page.per_page, "Listing campaigns");

        let session = self.session();
        let mut paginator = Paginator::<_, CampaignRow>::annotated(
            campaign_query(filter, today),
            &session,
            &[BILLBOARD_COUNT],
        );
        paginator.fetch(page).await?;
        Ok(paginator.into_page())
    }

    async fn media_plans(
        &self,
        filter: &MediaPlanFilter,
        today: NaiveDate,
        page: PageRequest,
    ) -> BillboardResult<PageEnvelope<MediaPlanRow>> {
        debug!(?filter, %today, page = page.page, per_page = page.per_page, "Listing media plans");

        let session = self.session();
        let mut paginator = Paginator::<_, MediaPlanRow>::annotated(
            media_plan_query(filter, today),
            &session,
            &MEDIA_PLAN_EXTRAS,
        );
        paginator.fetch(page).await?;
        Ok(paginator.into_page())
    }

    async fn team_members(
        &self,
        scope: &TeamScope,
        filter: &TeamMemberFilter,
        page: PageRequest,
    ) -> BillboardResult<PageEnvelope<TeamMember>> {
        debug!(
            company = %scope.company_name,
            ?filter,
            page = page.page,
            per_page = page.per_page,
            "Listing team members"
        );

        let session = self.session();
        let mut paginator =
            Paginator::<_, TeamMember>::entities(team_member_query(scope, filter), &session);
        paginator.fetch(page).await?;
        Ok(paginator.into_page())
    }

    async fn admins(
        &self,
        filter: &AdminFilter,
        page: PageRequest,
    ) -> BillboardResult<PageEnvelope<Admin>> {
        debug!(?filter, page = page.page, per_page = page.per_page, "Listing admins");

        let session = self.session();
        let mut paginator = Paginator::<_, Admin>::entities(admin_query(filter), &session);
        paginator.fetch(page).await?;
        Ok(paginator.into_page())
    }
}
