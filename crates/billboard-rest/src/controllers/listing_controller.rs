//! List endpoints for the table views.
//!
//! Every handler resolves paging against the configured defaults, turns the
//! validated query into a repository filter and answers with the paginated
//! envelope.

use crate::{
    extractors::{
        AdminQuery, InventoryQuery, PaginationQuery, ScheduleQuery, TeamMemberQuery,
        ValidatedQuery,
    },
    responses::{paginated, ApiResult},
    state::AppState,
};
use axum::extract::{Extension, State};
use billboard_core::PageEnvelope;
use billboard_repository::listing::TeamScope;
use billboard_service::{
    AdminPrincipal, AdminResponse, CampaignListItem, InventoryItem, MediaPlanListItem,
    TeamMemberItem,
};
use tracing::debug;

/// List billboard faces.
pub async fn list_inventories(
    State(state): State<AppState>,
    ValidatedQuery(paging): ValidatedQuery<PaginationQuery>,
    ValidatedQuery(query): ValidatedQuery<InventoryQuery>,
) -> ApiResult<PageEnvelope<InventoryItem>> {
    let page = paging.to_page_request(&state.pagination);
    debug!(page = page.page, per_page = page.per_page, "List inventories request");

    let result = state
        .listing_service
        .list_inventories(query.into(), page)
        .await?;
    paginated(result)
}

/// List campaigns.
pub async fn list_campaigns(
    State(state): State<AppState>,
    ValidatedQuery(paging): ValidatedQuery<PaginationQuery>,
    ValidatedQuery(query): ValidatedQuery<ScheduleQuery>,
) -> ApiResult<PageEnvelope<CampaignListItem>> {
    let page = paging.to_page_request(&state.pagination);
    debug!(page = page.page, per_page = page.per_page, "List campaigns request");

    let result = state
        .listing_service
        .list_campaigns(query.try_into()?, page)
        .await?;
    paginated(result)
}

/// List media plans.
pub async fn list_media_plans(
    State(state): State<AppState>,
    ValidatedQuery(paging): ValidatedQuery<PaginationQuery>,
    ValidatedQuery(query): ValidatedQuery<ScheduleQuery>,
) -> ApiResult<PageEnvelope<MediaPlanListItem>> {
    let page = paging.to_page_request(&state.pagination);
    debug!(page = page.page, per_page = page.per_page, "List media plans request");

    let result = state
        .listing_service
        .list_media_plans(query.try_into()?, page)
        .await?;
    paginated(result)
}

/// List members of the caller's company.
pub async fn list_team_members(
    State(state): State<AppState>,
    Extension(scope): Extension<TeamScope>,
    ValidatedQuery(paging): ValidatedQuery<PaginationQuery>,
    ValidatedQuery(query): ValidatedQuery<TeamMemberQuery>,
) -> ApiResult<PageEnvelope<TeamMemberItem>> {
    let page = paging.to_page_request(&state.pagination);
    debug!(company = %scope.company_name, page = page.page, "List team members request");

    let result = state
        .listing_service
        .list_team_members(scope, query.into(), page)
        .await?;
    paginated(result)
}

/// List administrators (superadmin only).
pub async fn list_admins(
    State(state): State<AppState>,
    Extension(caller): Extension<AdminPrincipal>,
    ValidatedQuery(paging): ValidatedQuery<PaginationQuery>,
    ValidatedQuery(query): ValidatedQuery<AdminQuery>,
) -> ApiResult<PageEnvelope<AdminResponse>> {
    let page = paging.to_page_request(&state.pagination);
    debug!(admin_id = caller.id, page = page.page, "List admins request");

    let result = state
        .listing_service
        .list_admins(caller, query.into(), page)
        .await?;
    paginated(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        response::{IntoResponse, Response},
        routing::get,
        Router,
    };
    use billboard_config::PaginationConfig;
    use billboard_core::{BillboardError, BillboardResult, PageRequest};
    use billboard_repository::listing::{
        AdminFilter, CampaignFilter, InventoryFilter, MediaPlanFilter, ScheduleStatus,
        TeamMemberFilter,
    };
    use billboard_service::{ListingService, SUPERADMIN_ROLE};
    use http_body_util::BodyExt;
    use serde_json::Value;
    use std::sync::{Arc, Mutex};
    use tower::ServiceExt;

    /// Fake listing service that records the last request it saw.
    #[derive(Default)]
    struct FakeListingService {
        last_page: Mutex<Option<PageRequest>>,
        last_campaign_filter: Mutex<Option<CampaignFilter>>,
        last_scope: Mutex<Option<TeamScope>>,
    }

    impl FakeListingService {
        fn seen_page(&self) -> PageRequest {
            self.last_page.lock().unwrap().expect("no request seen")
        }
    }

    fn empty<T>(page: PageRequest, total: u64) -> PageEnvelope<T> {
        PageEnvelope::new(Vec::new(), page.page, page.per_page, total)
    }

    #[async_trait]
    impl ListingService for FakeListingService {
        async fn list_inventories(
            &self,
            _filter: InventoryFilter,
            page: PageRequest,
        ) -> BillboardResult<PageEnvelope<InventoryItem>> {
            *self.last_page.lock().unwrap() = Some(page);
            let item = InventoryItem {
                id: 7,
                face_id: "FACE-7".to_string(),
                latitude: 24.7,
                longitude: 46.6,
                address: None,
                media_owner_name: "Acme Media".to_string(),
                network_name: "North".to_string(),
                billboard_type: "Digital".to_string(),
                status: "active".to_string(),
            };
            Ok(PageEnvelope::new(vec![item], page.page, page.per_page, 25))
        }

        async fn list_campaigns(
            &self,
            filter: CampaignFilter,
            page: PageRequest,
        ) -> BillboardResult<PageEnvelope<CampaignListItem>> {
            *self.last_page.lock().unwrap() = Some(page);
            *self.last_campaign_filter.lock().unwrap() = Some(filter);
            Ok(empty(page, 0))
        }

        async fn list_media_plans(
            &self,
            _filter: MediaPlanFilter,
            _page: PageRequest,
        ) -> BillboardResult<PageEnvelope<MediaPlanListItem>> {
            Err(BillboardError::Database("connection reset".to_string()))
        }

        async fn list_team_members(
            &self,
            scope: TeamScope,
            _filter: TeamMemberFilter,
            page: PageRequest,
        ) -> BillboardResult<PageEnvelope<TeamMemberItem>> {
            *self.last_scope.lock().unwrap() = Some(scope);
            Ok(empty(page, 0))
        }

        async fn list_admins(
            &self,
            caller: AdminPrincipal,
            _filter: AdminFilter,
            page: PageRequest,
        ) -> BillboardResult<PageEnvelope<AdminResponse>> {
            if !caller.is_superadmin() {
                return Err(BillboardError::forbidden("Not enough permissions"));
            }
            Ok(empty(page, 0))
        }
    }

    fn state(service: Arc<FakeListingService>) -> AppState {
        AppState::new(
            service,
            PaginationConfig {
                default_per_page: 10,
                max_per_page: 100,
            },
        )
    }

    async fn body_json(response: Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn get_uri(app: Router, uri: &str) -> Response {
        app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_list_inventories_envelope() {
        let service = Arc::new(FakeListingService::default());
        let app = Router::new()
            .route("/inventories", get(list_inventories))
            .with_state(state(Arc::clone(&service)));

        let response = get_uri(app, "/inventories?page=2&per_page=10&status=active").await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["code"], 200);
        assert_eq!(body["message"], "Success");
        assert_eq!(body["data"]["total"], 25);
        assert_eq!(body["data"]["current_page"], 2);
        assert_eq!(body["data"]["last_page"], 3);
        assert_eq!(body["data"]["has_more"], true);
        assert_eq!(body["data"]["items"][0]["face_id"], "FACE-7");
        assert_eq!(service.seen_page(), PageRequest::new(2, 10));
    }

    #[tokio::test]
    async fn test_per_page_is_capped() {
        let service = Arc::new(FakeListingService::default());
        let app = Router::new()
            .route("/inventories", get(list_inventories))
            .with_state(state(Arc::clone(&service)));

        get_uri(app, "/inventories?page=0&per_page=1000").await;
        assert_eq!(service.seen_page(), PageRequest::new(1, 100));
    }

    #[tokio::test]
    async fn test_largest_page_number_is_accepted() {
        let service = Arc::new(FakeListingService::default());
        let app = Router::new()
            .route("/inventories", get(list_inventories))
            .with_state(state(Arc::clone(&service)));

        let response = get_uri(app, "/inventories?page=9223372036854775807").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(service.seen_page().page, i64::MAX as u64);

        let body = body_json(response).await;
        assert_eq!(body["data"]["current_page"], i64::MAX);
        assert_eq!(body["data"]["last_page"], 3);
        assert_eq!(body["data"]["has_more"], false);
    }

    #[tokio::test]
    async fn test_list_campaigns_passes_filters() {
        let service = Arc::new(FakeListingService::default());
        let app = Router::new()
            .route("/campaigns", get(list_campaigns))
            .with_state(state(Arc::clone(&service)));

        let response = get_uri(
            app,
            "/campaigns?keyword=summer&start_date=2024-06-01&status=upcoming",
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let filter = service.last_campaign_filter.lock().unwrap().clone().unwrap();
        assert_eq!(filter.keyword.as_deref(), Some("summer"));
        assert_eq!(filter.start_date, chrono::NaiveDate::from_ymd_opt(2024, 6, 1));
        assert_eq!(filter.status, Some(ScheduleStatus::Upcoming));
        assert_eq!(service.seen_page(), PageRequest::first());
    }

    #[tokio::test]
    async fn test_bad_date_is_rejected_with_envelope() {
        let service = Arc::new(FakeListingService::default());
        let app = Router::new()
            .route("/campaigns", get(list_campaigns))
            .with_state(state(Arc::clone(&service)));

        let response = get_uri(app, "/campaigns?end_date=2024-13-40").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["code"], 400);
        assert!(body["message"].as_str().unwrap().contains("end_date"));
        assert!(service.last_campaign_filter.lock().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_store_failure_renders_500() {
        let service = Arc::new(FakeListingService::default());
        let response = list_media_plans(
            State(state(service)),
            ValidatedQuery(PaginationQuery::default()),
            ValidatedQuery(ScheduleQuery::default()),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["code"], 500);
        assert!(body.get("data").is_none());
    }

    #[tokio::test]
    async fn test_team_members_use_caller_scope() {
        let service = Arc::new(FakeListingService::default());
        let scope = TeamScope {
            organization_type: "advertiser".to_string(),
            company_name: "Acme".to_string(),
        };
        let app = Router::new()
            .route("/team", get(list_team_members))
            .layer(Extension(scope.clone()))
            .with_state(state(Arc::clone(&service)));

        let response = get_uri(app, "/team?role=operator").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(service.last_scope.lock().unwrap().clone(), Some(scope));
    }

    #[tokio::test]
    async fn test_list_admins_forbidden_for_plain_admin() {
        let service = Arc::new(FakeListingService::default());
        let caller = AdminPrincipal {
            id: 2,
            role: "admin".to_string(),
        };

        let response = list_admins(
            State(state(Arc::clone(&service))),
            Extension(caller),
            ValidatedQuery(PaginationQuery::default()),
            ValidatedQuery(AdminQuery::default()),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        let body = body_json(response).await;
        assert_eq!(body["code"], 403);
        assert_eq!(body["message"], "Not enough permissions");
    }

    #[tokio::test]
    async fn test_list_admins_for_superadmin() {
        let service = Arc::new(FakeListingService::default());
        let caller = AdminPrincipal {
            id: 1,
            role: SUPERADMIN_ROLE.to_string(),
        };

        let response = list_admins(
            State(state(service)),
            Extension(caller),
            ValidatedQuery(PaginationQuery::default()),
            ValidatedQuery(AdminQuery::default()),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["data"]["items"], serde_json::json!([]));
        assert_eq!(body["data"]["last_page"], 0);
    }
}
