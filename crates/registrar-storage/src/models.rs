// Database models (internal, may differ from public DTOs)

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

// ============================================
// Accounts (credential store)
// ============================================

#[derive(Debug, Clone, FromRow)]
pub struct AccountRow {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub status: String,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CreateAccountRow {
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub status: String,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateAccountRow {
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub role: Option<String>,
    pub status: Option<String>,
}

// ============================================
// Organizations
// ============================================

#[derive(Debug, Clone, FromRow)]
pub struct OrganizationRow {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CreateOrganizationRow {
    pub name: String,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateOrganizationRow {
    pub name: Option<String>,
}

// ============================================
// Persons
// ============================================

#[derive(Debug, Clone, FromRow)]
pub struct PersonRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub organization_id: Option<Uuid>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CreatePersonRow {
    pub name: String,
    pub email: String,
    pub organization_id: Option<Uuid>,
    pub status: String,
}

#[derive(Debug, Clone, Default)]
pub struct UpdatePersonRow {
    pub name: Option<String>,
    pub email: Option<String>,
    pub organization_id: Option<Uuid>,
    pub status: Option<String>,
}
