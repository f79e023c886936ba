// Organization CRUD HTTP routes

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use registrar_core::Organization;
use registrar_storage::StorageBackend;

use crate::auth::middleware::{AuthState, AuthUser, FromRef, RequireAdmin};
use crate::services::OrganizationService;

use super::common::{service_error, ErrorResponse, ListResponse, PageQuery, PagedResponse};

/// Request to create a new organization
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateOrganizationRequest {
    /// Organization name (unique)
    #[schema(example = "Polytechnic Institute")]
    pub name: String,
}

/// Request to update an organization
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateOrganizationRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// App state for organization routes
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<OrganizationService>,
    pub auth: AuthState,
}

impl AppState {
    pub fn new(db: StorageBackend, auth: AuthState) -> Self {
        Self {
            service: Arc::new(OrganizationService::new(db)),
            auth,
        }
    }
}

impl FromRef<AppState> for AuthState {
    fn from_ref(input: &AppState) -> Self {
        input.auth.clone()
    }
}

/// Create organization routes
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route(
            "/v1/organizations",
            post(create_organization).get(list_organizations),
        )
        .route("/v1/organizations/all", get(list_all_organizations))
        .route(
            "/v1/organizations/:organization_id",
            get(get_organization)
                .patch(update_organization)
                .delete(delete_organization),
        )
        .with_state(state)
}

/// POST /v1/organizations - Create a new organization
#[utoipa::path(
    post,
    path = "/v1/organizations",
    request_body = CreateOrganizationRequest,
    responses(
        (status = 201, description = "Organization created", body = Organization),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Administrator role required"),
        (status = 409, description = "Name already taken", body = ErrorResponse)
    ),
    tag = "organizations"
)]
pub async fn create_organization(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Json(req): Json<CreateOrganizationRequest>,
) -> Result<(StatusCode, Json<Organization>), (StatusCode, Json<ErrorResponse>)> {
    let organization = state.service.create(req).await.map_err(service_error)?;
    Ok((StatusCode::CREATED, Json(organization)))
}

/// GET /v1/organizations - List organizations (paginated)
#[utoipa::path(
    get,
    path = "/v1/organizations",
    params(
        ("page" = Option<i64>, Query, description = "1-based page number"),
        ("page_size" = Option<i64>, Query, description = "Page size (max 100)")
    ),
    responses(
        (status = 200, description = "Page of organizations", body = PagedResponse<Organization>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "organizations"
)]
pub async fn list_organizations(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(query): Query<PageQuery>,
) -> Result<Json<PagedResponse<Organization>>, (StatusCode, Json<ErrorResponse>)> {
    let (page, page_size) = query.resolve();
    let (organizations, total) = state
        .service
        .list(page, page_size)
        .await
        .map_err(service_error)?;
    Ok(Json(PagedResponse::new(
        organizations,
        total,
        page,
        page_size,
    )))
}

/// GET /v1/organizations/all - List every organization (for pickers)
#[utoipa::path(
    get,
    path = "/v1/organizations/all",
    responses(
        (status = 200, description = "All organizations", body = ListResponse<Organization>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "organizations"
)]
pub async fn list_all_organizations(
    State(state): State<AppState>,
    _user: AuthUser,
) -> Result<Json<ListResponse<Organization>>, (StatusCode, Json<ErrorResponse>)> {
    let organizations = state.service.list_all().await.map_err(service_error)?;
    Ok(Json(ListResponse::new(organizations)))
}

/// GET /v1/organizations/:organization_id - Get an organization
#[utoipa::path(
    get,
    path = "/v1/organizations/{organization_id}",
    params(("organization_id" = Uuid, Path, description = "Organization ID")),
    responses(
        (status = 200, description = "Organization", body = Organization),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Organization not found", body = ErrorResponse)
    ),
    tag = "organizations"
)]
pub async fn get_organization(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(organization_id): Path<Uuid>,
) -> Result<Json<Organization>, (StatusCode, Json<ErrorResponse>)> {
    let organization = state
        .service
        .get(organization_id)
        .await
        .map_err(service_error)?;
    Ok(Json(organization))
}

/// PATCH /v1/organizations/:organization_id - Update an organization
#[utoipa::path(
    patch,
    path = "/v1/organizations/{organization_id}",
    params(("organization_id" = Uuid, Path, description = "Organization ID")),
    request_body = UpdateOrganizationRequest,
    responses(
        (status = 200, description = "Updated organization", body = Organization),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Administrator role required"),
        (status = 404, description = "Organization not found", body = ErrorResponse)
    ),
    tag = "organizations"
)]
pub async fn update_organization(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(organization_id): Path<Uuid>,
    Json(req): Json<UpdateOrganizationRequest>,
) -> Result<Json<Organization>, (StatusCode, Json<ErrorResponse>)> {
    let organization = state
        .service
        .update(organization_id, req)
        .await
        .map_err(service_error)?;
    Ok(Json(organization))
}

/// DELETE /v1/organizations/:organization_id - Delete an organization
#[utoipa::path(
    delete,
    path = "/v1/organizations/{organization_id}",
    params(("organization_id" = Uuid, Path, description = "Organization ID")),
    responses(
        (status = 204, description = "Organization deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Administrator role required"),
        (status = 404, description = "Organization not found", body = ErrorResponse)
    ),
    tag = "organizations"
)]
pub async fn delete_organization(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(organization_id): Path<Uuid>,
) -> Result<StatusCode, (StatusCode, Json<ErrorResponse>)> {
    state
        .service
        .delete(organization_id)
        .await
        .map_err(service_error)?;
    Ok(StatusCode::NO_CONTENT)
}
