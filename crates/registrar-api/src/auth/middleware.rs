// Authentication and authorization gates
// Decision: Token validation never touches the credential store; a request
// is authenticated by signature and embedded timestamps alone
// Decision: 401 (bad/missing credential) and 403 (valid identity, role too
// low) stay distinct so clients can tell "log in again" from "no permission"

use std::sync::Arc;

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use registrar_core::Role;
use registrar_storage::StorageBackend;

use super::config::AuthConfig;
use super::jwt::{TokenError, TokenService};
use super::transport::extract_token;

/// Authentication/authorization failure.
///
/// All variants are request-local: each terminates the current request with
/// a structured response and never propagates as a process fault.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown email, wrong password or disabled account; merged on purpose
    /// so callers cannot enumerate identifiers
    #[error("invalid email or password")]
    InvalidCredentials,
    /// No token in either transport channel
    #[error("no credentials supplied")]
    MissingToken,
    /// Signature, algorithm, format or time-window failure
    #[error("invalid or expired token")]
    InvalidToken,
    /// Valid identity, insufficient privilege level
    #[error("insufficient privileges")]
    InsufficientRole,
    /// Hashing, signing or collaborator I/O failure; details are logged
    /// server-side, never sent to the caller
    #[error("internal error")]
    Internal,
}

impl AuthError {
    fn status(&self) -> StatusCode {
        match self {
            AuthError::InvalidCredentials
            | AuthError::MissingToken
            | AuthError::InvalidToken => StatusCode::UNAUTHORIZED,
            AuthError::InsufficientRole => StatusCode::FORBIDDEN,
            AuthError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            AuthError::InvalidCredentials => "invalid_credentials",
            AuthError::MissingToken => "token_missing",
            AuthError::InvalidToken => "invalid_token",
            AuthError::InsufficientRole => "insufficient_role",
            AuthError::Internal => "internal_error",
        }
    }
}

/// Error response body for auth failures.
#[derive(Debug, Serialize)]
struct AuthErrorBody {
    error: String,
    code: &'static str,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let body = AuthErrorBody {
            error: self.to_string(),
            code: self.code(),
        };
        (self.status(), Json(body)).into_response()
    }
}

/// Verified identity attributes for the current request.
///
/// Populated by the authentication gate from validated claims, read by
/// handlers and the authorization gate. Created per request, never shared.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// Account ID
    pub id: Uuid,
    /// Account email
    pub email: String,
    /// Privilege level
    pub role: Role,
}

impl AuthUser {
    /// Check if this identity is an administrator
    pub fn is_admin(&self) -> bool {
        self.role >= Role::Administrator
    }

    /// Require a minimum privilege level.
    ///
    /// Roles form a total order, so this is a plain comparison.
    pub fn require_role(&self, minimum: Role) -> Result<(), AuthError> {
        if self.role >= minimum {
            Ok(())
        } else {
            Err(AuthError::InsufficientRole)
        }
    }
}

/// Auth state shared across routes
#[derive(Clone)]
pub struct AuthState {
    pub config: AuthConfig,
    pub tokens: Arc<TokenService>,
    pub db: StorageBackend,
}

impl AuthState {
    pub fn new(config: AuthConfig, db: StorageBackend) -> Self {
        let tokens = Arc::new(TokenService::new(config.jwt.clone()));
        Self { config, tokens, db }
    }
}

impl std::fmt::Debug for AuthState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthState")
            .field("tokens", &self.tokens)
            .finish_non_exhaustive()
    }
}

/// Helper trait for extracting AuthState from application state
pub trait FromRef<T> {
    fn from_ref(input: &T) -> Self;
}

impl FromRef<AuthState> for AuthState {
    fn from_ref(input: &AuthState) -> Self {
        input.clone()
    }
}

/// Extractor for the authentication gate.
///
/// Use this in handler parameters to require a valid session token; the
/// request short-circuits with 401 before the handler runs otherwise.
#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AuthState: FromRef<S>,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth_state = AuthState::from_ref(state);
        authenticate(parts, &auth_state)
    }
}

/// Validate the request's token and build the identity context.
///
/// Pure in-memory check: signature, algorithm, issuer and time window.
fn authenticate(parts: &Parts, auth_state: &AuthState) -> Result<AuthUser, AuthError> {
    let token = extract_token(parts).ok_or(AuthError::MissingToken)?;

    let claims = auth_state.tokens.verify(&token).map_err(|e| {
        match e {
            // Expiry is worth telling apart in logs; the caller sees the
            // same response either way
            TokenError::Expired => tracing::debug!("rejected expired token"),
            ref other => tracing::debug!("token validation failed: {}", other),
        }
        AuthError::InvalidToken
    })?;

    let id = Uuid::parse_str(&claims.sub).map_err(|_| {
        tracing::debug!("token subject is not a valid account id");
        AuthError::InvalidToken
    })?;

    Ok(AuthUser {
        id,
        email: claims.email,
        role: claims.role,
    })
}

/// Extractor for the authorization gate: administrator required.
///
/// Runs the authentication gate first, then compares the established role;
/// failing the comparison is 403, distinct from the 401 of a bad credential.
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub AuthUser);

#[axum::async_trait]
impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
    AuthState: FromRef<S>,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        user.require_role(Role::Administrator)?;
        Ok(RequireAdmin(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: Role) -> AuthUser {
        AuthUser {
            id: Uuid::nil(),
            email: "test@example.com".to_string(),
            role,
        }
    }

    #[test]
    fn test_role_gate() {
        let standard = user(Role::Standard);
        assert!(!standard.is_admin());
        assert!(standard.require_role(Role::Standard).is_ok());
        assert!(matches!(
            standard.require_role(Role::Administrator),
            Err(AuthError::InsufficientRole)
        ));

        let admin = user(Role::Administrator);
        assert!(admin.is_admin());
        assert!(admin.require_role(Role::Standard).is_ok());
        assert!(admin.require_role(Role::Administrator).is_ok());
    }

    #[test]
    fn test_error_status_mapping() {
        assert_eq!(AuthError::MissingToken.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AuthError::InvalidToken.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            AuthError::InvalidCredentials.status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(AuthError::InsufficientRole.status(), StatusCode::FORBIDDEN);
        assert_eq!(
            AuthError::Internal.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(AuthError::MissingToken.code(), "token_missing");
        assert_eq!(AuthError::InvalidToken.code(), "invalid_token");
        assert_eq!(AuthError::InsufficientRole.code(), "insufficient_role");
    }
}
