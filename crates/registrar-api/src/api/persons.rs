// Person CRUD HTTP routes

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

use registrar_core::{Person, PersonStatus};
use registrar_storage::StorageBackend;

use crate::auth::middleware::{AuthState, AuthUser, FromRef, RequireAdmin};
use crate::services::PersonService;

use super::common::{service_error, ErrorResponse, PageQuery, PagedResponse};

/// Request to create a new person record
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreatePersonRequest {
    #[schema(example = "Ada Lovelace")]
    pub name: String,
    /// Contact email (unique)
    #[schema(example = "ada@example.com")]
    pub email: String,
    /// Organization this person belongs to (must exist)
    #[serde(default)]
    pub organization_id: Option<Uuid>,
    /// Enrollment status (default: active)
    #[serde(default)]
    pub status: Option<PersonStatus>,
}

/// Request to update a person record. Only provided fields will be updated.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdatePersonRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PersonStatus>,
}

/// App state for person routes
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<PersonService>,
    pub auth: AuthState,
}

impl AppState {
    pub fn new(db: StorageBackend, auth: AuthState) -> Self {
        Self {
            service: Arc::new(PersonService::new(db)),
            auth,
        }
    }
}

impl FromRef<AppState> for AuthState {
    fn from_ref(input: &AppState) -> Self {
        input.auth.clone()
    }
}

/// Create person routes
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/v1/persons", post(create_person).get(list_persons))
        .route(
            "/v1/persons/:person_id",
            get(get_person).patch(update_person).delete(delete_person),
        )
        .with_state(state)
}

/// POST /v1/persons - Create a new person record
#[utoipa::path(
    post,
    path = "/v1/persons",
    request_body = CreatePersonRequest,
    responses(
        (status = 201, description = "Person created", body = Person),
        (status = 400, description = "Unknown organization", body = ErrorResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Administrator role required"),
        (status = 409, description = "Email already registered", body = ErrorResponse)
    ),
    tag = "persons"
)]
pub async fn create_person(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Json(req): Json<CreatePersonRequest>,
) -> Result<(StatusCode, Json<Person>), (StatusCode, Json<ErrorResponse>)> {
    let person = state.service.create(req).await.map_err(service_error)?;
    Ok((StatusCode::CREATED, Json(person)))
}

/// GET /v1/persons - List person records (paginated)
#[utoipa::path(
    get,
    path = "/v1/persons",
    params(
        ("page" = Option<i64>, Query, description = "1-based page number"),
        ("page_size" = Option<i64>, Query, description = "Page size (max 100)")
    ),
    responses(
        (status = 200, description = "Page of persons", body = PagedResponse<Person>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "persons"
)]
pub async fn list_persons(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(query): Query<PageQuery>,
) -> Result<Json<PagedResponse<Person>>, (StatusCode, Json<ErrorResponse>)> {
    let (page, page_size) = query.resolve();
    let (persons, total) = state
        .service
        .list(page, page_size)
        .await
        .map_err(service_error)?;
    Ok(Json(PagedResponse::new(persons, total, page, page_size)))
}

/// GET /v1/persons/:person_id - Get a person record
#[utoipa::path(
    get,
    path = "/v1/persons/{person_id}",
    params(("person_id" = Uuid, Path, description = "Person ID")),
    responses(
        (status = 200, description = "Person", body = Person),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Person not found", body = ErrorResponse)
    ),
    tag = "persons"
)]
pub async fn get_person(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(person_id): Path<Uuid>,
) -> Result<Json<Person>, (StatusCode, Json<ErrorResponse>)> {
    let person = state.service.get(person_id).await.map_err(service_error)?;
    Ok(Json(person))
}

/// PATCH /v1/persons/:person_id - Update a person record
#[utoipa::path(
    patch,
    path = "/v1/persons/{person_id}",
    params(("person_id" = Uuid, Path, description = "Person ID")),
    request_body = UpdatePersonRequest,
    responses(
        (status = 200, description = "Updated person", body = Person),
        (status = 400, description = "Unknown organization", body = ErrorResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Administrator role required"),
        (status = 404, description = "Person not found", body = ErrorResponse)
    ),
    tag = "persons"
)]
pub async fn update_person(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(person_id): Path<Uuid>,
    Json(req): Json<UpdatePersonRequest>,
) -> Result<Json<Person>, (StatusCode, Json<ErrorResponse>)> {
    let person = state
        .service
        .update(person_id, req)
        .await
        .map_err(service_error)?;
    Ok(Json(person))
}

/// DELETE /v1/persons/:person_id - Delete a person record
#[utoipa::path(
    delete,
    path = "/v1/persons/{person_id}",
    params(("person_id" = Uuid, Path, description = "Person ID")),
    responses(
        (status = 204, description = "Person deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Administrator role required"),
        (status = 404, description = "Person not found", body = ErrorResponse)
    ),
    tag = "persons"
)]
pub async fn delete_person(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(person_id): Path<Uuid>,
) -> Result<StatusCode, (StatusCode, Json<ErrorResponse>)> {
    state
        .service
        .delete(person_id)
        .await
        .map_err(service_error)?;
    Ok(StatusCode::NO_CONTENT)
}
