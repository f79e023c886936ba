// Common DTOs for public API
//
// These types are shared across multiple API endpoints.

use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::services::ServiceError;

/// Standard error response for API endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message describing what went wrong.
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Response wrapper for unpaginated list endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ListResponse<T> {
    /// Array of items returned by the list operation.
    pub data: Vec<T>,
}

impl<T> ListResponse<T> {
    pub fn new(data: Vec<T>) -> Self {
        Self { data }
    }
}

/// Response wrapper for paginated list endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PagedResponse<T> {
    /// Items on the requested page.
    pub data: Vec<T>,
    /// Total number of items across all pages.
    pub total: i64,
    /// 1-based page number.
    pub page: i64,
    /// Page size used for the query.
    pub page_size: i64,
}

impl<T> PagedResponse<T> {
    pub fn new(data: Vec<T>, total: i64, page: i64, page_size: i64) -> Self {
        Self {
            data,
            total,
            page,
            page_size,
        }
    }
}

/// Pagination query parameters shared by the list endpoints.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct PageQuery {
    /// 1-based page number (default 1)
    pub page: Option<i64>,
    /// Page size (default 20, max 100)
    pub page_size: Option<i64>,
}

impl PageQuery {
    /// Resolve to a clamped (page, page_size) pair.
    pub fn resolve(&self) -> (i64, i64) {
        let page = self.page.unwrap_or(1).max(1);
        let page_size = self.page_size.unwrap_or(20).clamp(1, 100);
        (page, page_size)
    }
}

/// Map a service error to an HTTP response.
pub fn service_error(err: ServiceError) -> (StatusCode, Json<ErrorResponse>) {
    match err {
        ServiceError::NotFound(what) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new(format!("{what} not found"))),
        ),
        ServiceError::Conflict(msg) => (StatusCode::CONFLICT, Json(ErrorResponse::new(msg))),
        ServiceError::InvalidReference(msg) => {
            (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(msg)))
        }
        ServiceError::Internal(e) => {
            tracing::error!("Internal error: {:#}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("internal error")),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_query_defaults() {
        let query = PageQuery::default();
        assert_eq!(query.resolve(), (1, 20));
    }

    #[test]
    fn test_page_query_clamping() {
        let query = PageQuery {
            page: Some(0),
            page_size: Some(1000),
        };
        assert_eq!(query.resolve(), (1, 100));

        let query = PageQuery {
            page: Some(-3),
            page_size: Some(0),
        };
        assert_eq!(query.resolve(), (1, 1));
    }

    #[test]
    fn test_service_error_mapping() {
        let (status, _) = service_error(ServiceError::NotFound("account"));
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = service_error(ServiceError::Conflict("duplicate".into()));
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, body) =
            service_error(ServiceError::Internal(anyhow::anyhow!("db exploded")));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        // Internal detail must not leak to the caller
        assert_eq!(body.error, "internal error");
    }
}
