// Services layer
//
// Business logic between the HTTP routes and the storage backend. Each
// service takes its StorageBackend as a constructor parameter so tests can
// inject the in-memory implementation.

pub mod account;
pub mod organization;
pub mod person;

pub use account::AccountService;
pub use organization::OrganizationService;
pub use person::PersonService;

use thiserror::Error;

/// Service-level failure, mapped to an HTTP response at the route layer.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    InvalidReference(String),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}
