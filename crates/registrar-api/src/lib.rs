// Registrar API library
// Decision: Router assembly lives here so the binary and the integration
// tests build the exact same application

// API routes and types (shared for OpenAPI generation)
pub mod api;

// Authentication module
pub mod auth;

// Services layer
pub mod services;

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use utoipa::OpenApi;

use registrar_core::{Account, AccountStatus, Organization, Person, PersonStatus, Role};
use registrar_storage::StorageBackend;

use auth::{AuthConfig, AuthState};

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    storage: &'static str,
}

/// State for health endpoint
#[derive(Clone)]
struct HealthState {
    storage: &'static str,
}

async fn health(State(state): State<HealthState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        storage: state.storage,
    })
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        auth::routes::login,
        auth::routes::logout,
        auth::routes::me,
        api::accounts::create_account,
        api::accounts::list_accounts,
        api::accounts::get_account,
        api::accounts::update_account,
        api::accounts::delete_account,
        api::organizations::create_organization,
        api::organizations::list_organizations,
        api::organizations::list_all_organizations,
        api::organizations::get_organization,
        api::organizations::update_organization,
        api::organizations::delete_organization,
        api::persons::create_person,
        api::persons::list_persons,
        api::persons::get_person,
        api::persons::update_person,
        api::persons::delete_person,
    ),
    components(
        schemas(
            Account, Role, AccountStatus,
            Organization,
            Person, PersonStatus,
            auth::routes::LoginRequest,
            auth::routes::TokenResponse,
            auth::routes::MeResponse,
            api::accounts::CreateAccountRequest,
            api::accounts::UpdateAccountRequest,
            api::organizations::CreateOrganizationRequest,
            api::organizations::UpdateOrganizationRequest,
            api::persons::CreatePersonRequest,
            api::persons::UpdatePersonRequest,
            api::ErrorResponse,
            api::PagedResponse<Account>,
            api::PagedResponse<Organization>,
            api::PagedResponse<Person>,
            api::ListResponse<Organization>,
        )
    ),
    tags(
        (name = "auth", description = "Authentication endpoints"),
        (name = "accounts", description = "Account management endpoints"),
        (name = "organizations", description = "Organization management endpoints"),
        (name = "persons", description = "Person record endpoints")
    ),
    info(
        title = "Registrar API",
        version = "0.2.0",
        description = "Administrative record management with token-based authentication",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    )
)]
pub struct ApiDoc;

/// Build the application router.
///
/// Used by both the server binary and the integration tests, so every test
/// exercises the same middleware chain as production.
pub fn app(db: StorageBackend, auth_config: AuthConfig) -> Router {
    let auth_state = AuthState::new(auth_config, db.clone());

    let health_state = HealthState {
        storage: if db.is_dev_mode() { "memory" } else { "postgres" },
    };
    let accounts_state = api::accounts::AppState::new(db.clone(), auth_state.clone());
    let organizations_state = api::organizations::AppState::new(db.clone(), auth_state.clone());
    let persons_state = api::persons::AppState::new(db, auth_state.clone());

    Router::new()
        .route("/health", get(health).with_state(health_state))
        .merge(api::accounts::routes(accounts_state))
        .merge(api::organizations::routes(organizations_state))
        .merge(api::persons::routes(persons_state))
        .merge(auth::routes(auth_state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn test_app() -> Router {
        let mut config = AuthConfig::default();
        config.jwt.secret = "test-secret".to_string();
        app(StorageBackend::in_memory(), config)
    }

    #[tokio::test]
    async fn test_health_is_public() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), 200);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["storage"], "memory");
    }

    #[tokio::test]
    async fn test_api_routes_require_auth() {
        for uri in ["/v1/accounts", "/v1/organizations", "/v1/persons"] {
            let response = test_app()
                .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), 401, "{uri} served without auth");
        }
    }
}
