// Account CRUD HTTP routes
//
// Reads require authentication; mutations require the administrator role.
// Password hashes never leave the storage layer.

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

use registrar_core::{Account, AccountStatus, Role};
use registrar_storage::StorageBackend;

use crate::auth::middleware::{AuthState, AuthUser, FromRef, RequireAdmin};
use crate::services::AccountService;

use super::common::{service_error, ErrorResponse, PageQuery, PagedResponse};

/// Request to create a new account
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateAccountRequest {
    /// Login email (unique)
    #[schema(example = "clerk@example.com")]
    pub email: String,
    /// Initial password (stored as an Argon2id hash)
    pub password: String,
    /// Privilege level (default: standard)
    #[serde(default)]
    pub role: Option<Role>,
    /// Activation status (default: enabled)
    #[serde(default)]
    pub status: Option<AccountStatus>,
}

/// Request to update an account. Only provided fields will be updated.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateAccountRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// New password (re-hashed on update)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AccountStatus>,
}

/// App state for account routes
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<AccountService>,
    pub auth: AuthState,
}

impl AppState {
    pub fn new(db: StorageBackend, auth: AuthState) -> Self {
        Self {
            service: Arc::new(AccountService::new(db)),
            auth,
        }
    }
}

impl FromRef<AppState> for AuthState {
    fn from_ref(input: &AppState) -> Self {
        input.auth.clone()
    }
}

/// Create account routes
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/v1/accounts", post(create_account).get(list_accounts))
        .route(
            "/v1/accounts/:account_id",
            get(get_account)
                .patch(update_account)
                .delete(delete_account),
        )
        .with_state(state)
}

/// POST /v1/accounts - Create a new account
#[utoipa::path(
    post,
    path = "/v1/accounts",
    request_body = CreateAccountRequest,
    responses(
        (status = 201, description = "Account created", body = Account),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Administrator role required"),
        (status = 409, description = "Email already registered", body = ErrorResponse)
    ),
    tag = "accounts"
)]
pub async fn create_account(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Json(req): Json<CreateAccountRequest>,
) -> Result<(StatusCode, Json<Account>), (StatusCode, Json<ErrorResponse>)> {
    let account = state.service.create(req).await.map_err(service_error)?;
    Ok((StatusCode::CREATED, Json(account)))
}

/// GET /v1/accounts - List accounts (paginated)
#[utoipa::path(
    get,
    path = "/v1/accounts",
    params(
        ("page" = Option<i64>, Query, description = "1-based page number"),
        ("page_size" = Option<i64>, Query, description = "Page size (max 100)")
    ),
    responses(
        (status = 200, description = "Page of accounts", body = PagedResponse<Account>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "accounts"
)]
pub async fn list_accounts(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(query): Query<PageQuery>,
) -> Result<Json<PagedResponse<Account>>, (StatusCode, Json<ErrorResponse>)> {
    let (page, page_size) = query.resolve();
    let (accounts, total) = state
        .service
        .list(page, page_size)
        .await
        .map_err(service_error)?;
    Ok(Json(PagedResponse::new(accounts, total, page, page_size)))
}

/// GET /v1/accounts/:account_id - Get an account
#[utoipa::path(
    get,
    path = "/v1/accounts/{account_id}",
    params(("account_id" = Uuid, Path, description = "Account ID")),
    responses(
        (status = 200, description = "Account", body = Account),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Account not found", body = ErrorResponse)
    ),
    tag = "accounts"
)]
pub async fn get_account(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(account_id): Path<Uuid>,
) -> Result<Json<Account>, (StatusCode, Json<ErrorResponse>)> {
    let account = state
        .service
        .get(account_id)
        .await
        .map_err(service_error)?;
    Ok(Json(account))
}

/// PATCH /v1/accounts/:account_id - Update an account
#[utoipa::path(
    patch,
    path = "/v1/accounts/{account_id}",
    params(("account_id" = Uuid, Path, description = "Account ID")),
    request_body = UpdateAccountRequest,
    responses(
        (status = 200, description = "Updated account", body = Account),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Administrator role required"),
        (status = 404, description = "Account not found", body = ErrorResponse)
    ),
    tag = "accounts"
)]
pub async fn update_account(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(account_id): Path<Uuid>,
    Json(req): Json<UpdateAccountRequest>,
) -> Result<Json<Account>, (StatusCode, Json<ErrorResponse>)> {
    let account = state
        .service
        .update(account_id, req)
        .await
        .map_err(service_error)?;
    Ok(Json(account))
}

/// DELETE /v1/accounts/:account_id - Delete an account
#[utoipa::path(
    delete,
    path = "/v1/accounts/{account_id}",
    params(("account_id" = Uuid, Path, description = "Account ID")),
    responses(
        (status = 204, description = "Account deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Administrator role required"),
        (status = 404, description = "Account not found", body = ErrorResponse)
    ),
    tag = "accounts"
)]
pub async fn delete_account(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(account_id): Path<Uuid>,
) -> Result<StatusCode, (StatusCode, Json<ErrorResponse>)> {
    state
        .service
        .delete(account_id)
        .await
        .map_err(service_error)?;
    Ok(StatusCode::NO_CONTENT)
}
