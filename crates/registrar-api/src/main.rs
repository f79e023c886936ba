// Registrar API server
// Decision: Postgres when DATABASE_URL is set, in-memory storage otherwise
// Decision: The signing secret and token lifetime are loaded once at startup
// and shared read-only by every request worker

use anyhow::{Context, Result};
use axum::http::{header, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use registrar_api::{app, auth, ApiDoc};
use registrar_storage::{Database, StorageBackend};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "registrar_api=debug,tower_http=debug".into()),
        )
        .init();

    tracing::info!("registrar-api starting...");

    // Initialize storage
    let db = match std::env::var("DATABASE_URL") {
        Ok(url) => {
            let database = Database::from_url(&url)
                .await
                .context("Failed to connect to database")?;
            database
                .migrate()
                .await
                .context("Failed to run migrations")?;
            tracing::info!("Connected to database");
            StorageBackend::Postgres(database)
        }
        Err(_) => {
            tracing::warn!("DATABASE_URL not set, using in-memory storage (dev mode)");
            StorageBackend::in_memory()
        }
    };

    // Load authentication configuration
    let auth_config = auth::AuthConfig::from_env();
    tracing::info!(
        issuer = %auth_config.jwt.issuer,
        token_lifetime_secs = auth_config.jwt.token_lifetime.as_secs(),
        "Authentication configured"
    );

    // Create the bootstrap administrator if configured
    if let Some(admin) = &auth_config.admin {
        auth::ensure_bootstrap_admin(&db, admin)
            .await
            .context("Failed to create bootstrap administrator")?;
    }

    let app = app(db, auth_config);

    // Add Swagger UI
    let app =
        app.merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()));

    // Load CORS allowed origins from environment (optional)
    // Only needed when a UI is served from a different origin than the API
    let cors_origins: Vec<HeaderValue> = std::env::var("CORS_ALLOWED_ORIGINS")
        .ok()
        .filter(|s| !s.is_empty())
        .map(|s| s.split(',').filter_map(|s| s.trim().parse().ok()).collect())
        .unwrap_or_default();

    let app = if cors_origins.is_empty() {
        tracing::info!("CORS not configured (same-origin requests only)");
        app
    } else {
        tracing::info!(origins = ?cors_origins, "CORS origins configured");
        app.layer(
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(cors_origins))
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PATCH,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([
                    header::CONTENT_TYPE,
                    header::AUTHORIZATION,
                    header::ACCEPT,
                    header::ORIGIN,
                ])
                .allow_credentials(true),
        )
    };

    // Add tracing
    let app = app.layer(TraceLayer::new_for_http());

    // Start HTTP server
    let addr = std::env::var("SERVER_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;
    tracing::info!("HTTP server listening on {}", addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
