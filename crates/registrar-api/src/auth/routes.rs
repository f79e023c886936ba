// Authentication HTTP routes
// Decision: /v1/auth/* prefix, consistent with the other API routes
// Decision: Login failures are uniform; unknown email, wrong password and
// disabled account are indistinguishable to the caller

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use registrar_core::{AccountStatus, Role};
use registrar_storage::{
    hash_password, verify_password, CreateAccountRow, StorageBackend,
};

use super::config::AdminConfig;
use super::middleware::{AuthError, AuthState, AuthUser};
use super::transport::ACCESS_TOKEN_COOKIE;

/// Login request
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Token response
#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// Identity response for /auth/me
#[derive(Debug, Serialize, ToSchema)]
pub struct MeResponse {
    pub id: Uuid,
    pub email: String,
    #[schema(value_type = String)]
    pub role: Role,
}

/// Create auth routes
pub fn routes(state: AuthState) -> Router {
    Router::new()
        .route("/v1/auth/login", post(login))
        .route("/v1/auth/logout", post(logout))
        .route("/v1/auth/me", get(me))
        .with_state(state)
}

/// POST /v1/auth/login - Login with email and password
#[utoipa::path(
    post,
    path = "/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = TokenResponse),
        (status = 401, description = "Invalid credentials"),
        (status = 500, description = "Internal server error")
    ),
    tag = "auth"
)]
pub async fn login(
    State(state): State<AuthState>,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> Result<(CookieJar, Json<TokenResponse>), AuthError> {
    let account = state
        .db
        .get_account_by_email(&req.email)
        .await
        .map_err(|e| {
            tracing::error!("Credential lookup failed: {}", e);
            AuthError::Internal
        })?
        .ok_or(AuthError::InvalidCredentials)?;

    if AccountStatus::from(account.status.as_str()) != AccountStatus::Enabled {
        return Err(AuthError::InvalidCredentials);
    }

    // Argon2 verification is CPU-bound; keep it off the async workers
    let password = req.password;
    let password_hash = account.password_hash.clone();
    let valid = tokio::task::spawn_blocking(move || verify_password(&password, &password_hash))
        .await
        .map_err(|e| {
            tracing::error!("Password verification task failed: {}", e);
            AuthError::Internal
        })?
        .map_err(|e| {
            tracing::error!("Password verification error: {}", e);
            AuthError::Internal
        })?;

    if !valid {
        return Err(AuthError::InvalidCredentials);
    }

    let role = Role::from(account.role.as_str());
    let (token, _expires_at) = state
        .tokens
        .issue(account.id, &account.email, role)
        .map_err(|e| {
            tracing::error!("Token signing failed: {}", e);
            AuthError::Internal
        })?;

    // Best-effort bookkeeping; a failed write must never fail the login
    let db = state.db.clone();
    let account_id = account.id;
    tokio::spawn(async move {
        if let Err(e) = db.update_account_last_login(account_id, Utc::now()).await {
            tracing::warn!("Failed to record last login for {}: {}", account_id, e);
        }
    });

    let expires_in = state.tokens.token_lifetime_secs();
    let cookie = session_cookie(token.clone(), expires_in, state.config.cookie_secure);

    Ok((
        jar.add(cookie),
        Json(TokenResponse {
            access_token: token,
            token_type: "Bearer".to_string(),
            expires_in,
        }),
    ))
}

/// POST /v1/auth/logout - Logout (clear session cookie)
///
/// Stateless sessions: a bearer token already held by the caller stays
/// valid until it expires. Only the cookie transport is cleared.
#[utoipa::path(
    post,
    path = "/v1/auth/logout",
    responses(
        (status = 200, description = "Session cookie cleared")
    ),
    tag = "auth"
)]
pub async fn logout(jar: CookieJar) -> CookieJar {
    jar.remove(Cookie::build(ACCESS_TOKEN_COOKIE).path("/"))
}

/// GET /v1/auth/me - Identity attributes of the caller
#[utoipa::path(
    get,
    path = "/v1/auth/me",
    responses(
        (status = 200, description = "Caller identity", body = MeResponse),
        (status = 401, description = "Unauthorized")
    ),
    tag = "auth"
)]
pub async fn me(user: AuthUser) -> Json<MeResponse> {
    Json(MeResponse {
        id: user.id,
        email: user.email,
        role: user.role,
    })
}

/// Session cookie carrying the signed token.
///
/// HttpOnly always; max-age equals the token's validity window so cookie
/// and token expire together.
fn session_cookie(token: String, max_age_secs: i64, secure: bool) -> Cookie<'static> {
    Cookie::build((ACCESS_TOKEN_COOKIE, token))
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::seconds(max_age_secs))
        .build()
}

/// Create the bootstrap administrator account if it does not exist yet.
pub async fn ensure_bootstrap_admin(
    db: &StorageBackend,
    admin: &AdminConfig,
) -> anyhow::Result<()> {
    if db.get_account_by_email(&admin.email).await?.is_some() {
        return Ok(());
    }

    let password_hash = hash_password(&admin.password)?;
    db.create_account(CreateAccountRow {
        email: admin.email.clone(),
        password_hash,
        role: Role::Administrator.to_string(),
        status: AccountStatus::Enabled.to_string(),
    })
    .await?;

    tracing::info!(email = %admin.email, "Bootstrap administrator account created");
    Ok(())
}
