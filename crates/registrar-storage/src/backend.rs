// Storage backend abstraction
// Decision: Use enum dispatch for simplicity over trait objects
//
// This module provides a unified StorageBackend enum that can work with
// either PostgreSQL (production) or in-memory (dev mode) storage.

use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::memory::InMemoryDatabase;
use crate::models::*;
use crate::repositories::Database;

/// Storage backend that can be either PostgreSQL or in-memory
#[derive(Clone)]
pub enum StorageBackend {
    /// PostgreSQL database (production)
    Postgres(Database),
    /// In-memory database (dev mode)
    InMemory(std::sync::Arc<InMemoryDatabase>),
}

impl StorageBackend {
    /// Create a PostgreSQL storage backend from a database URL
    pub async fn postgres(database_url: &str) -> Result<Self> {
        let db = Database::from_url(database_url).await?;
        Ok(Self::Postgres(db))
    }

    /// Create an in-memory storage backend
    pub fn in_memory() -> Self {
        Self::InMemory(std::sync::Arc::new(InMemoryDatabase::new()))
    }

    /// Check if this is dev mode (in-memory)
    pub fn is_dev_mode(&self) -> bool {
        matches!(self, Self::InMemory(_))
    }

    /// Get the PostgreSQL pool if using PostgreSQL backend
    /// Returns None for in-memory backend
    pub fn pool(&self) -> Option<&PgPool> {
        match self {
            Self::Postgres(db) => Some(db.pool()),
            Self::InMemory(_) => None,
        }
    }

    // ============================================
    // Accounts
    // ============================================

    pub async fn create_account(&self, input: CreateAccountRow) -> Result<AccountRow> {
        match self {
            Self::Postgres(db) => db.create_account(input).await,
            Self::InMemory(db) => db.create_account(input).await,
        }
    }

    pub async fn get_account(&self, id: Uuid) -> Result<Option<AccountRow>> {
        match self {
            Self::Postgres(db) => db.get_account(id).await,
            Self::InMemory(db) => db.get_account(id).await,
        }
    }

    pub async fn get_account_by_email(&self, email: &str) -> Result<Option<AccountRow>> {
        match self {
            Self::Postgres(db) => db.get_account_by_email(email).await,
            Self::InMemory(db) => db.get_account_by_email(email).await,
        }
    }

    pub async fn update_account(
        &self,
        id: Uuid,
        input: UpdateAccountRow,
    ) -> Result<Option<AccountRow>> {
        match self {
            Self::Postgres(db) => db.update_account(id, input).await,
            Self::InMemory(db) => db.update_account(id, input).await,
        }
    }

    pub async fn update_account_last_login(&self, id: Uuid, at: DateTime<Utc>) -> Result<()> {
        match self {
            Self::Postgres(db) => db.update_account_last_login(id, at).await,
            Self::InMemory(db) => db.update_account_last_login(id, at).await,
        }
    }

    pub async fn list_accounts(
        &self,
        page: i64,
        page_size: i64,
    ) -> Result<(Vec<AccountRow>, i64)> {
        match self {
            Self::Postgres(db) => db.list_accounts(page, page_size).await,
            Self::InMemory(db) => db.list_accounts(page, page_size).await,
        }
    }

    pub async fn delete_account(&self, id: Uuid) -> Result<bool> {
        match self {
            Self::Postgres(db) => db.delete_account(id).await,
            Self::InMemory(db) => db.delete_account(id).await,
        }
    }

    // ============================================
    // Organizations
    // ============================================

    pub async fn create_organization(
        &self,
        input: CreateOrganizationRow,
    ) -> Result<OrganizationRow> {
        match self {
            Self::Postgres(db) => db.create_organization(input).await,
            Self::InMemory(db) => db.create_organization(input).await,
        }
    }

    pub async fn get_organization(&self, id: Uuid) -> Result<Option<OrganizationRow>> {
        match self {
            Self::Postgres(db) => db.get_organization(id).await,
            Self::InMemory(db) => db.get_organization(id).await,
        }
    }

    pub async fn get_organization_by_name(&self, name: &str) -> Result<Option<OrganizationRow>> {
        match self {
            Self::Postgres(db) => db.get_organization_by_name(name).await,
            Self::InMemory(db) => db.get_organization_by_name(name).await,
        }
    }

    pub async fn list_organizations(
        &self,
        page: i64,
        page_size: i64,
    ) -> Result<(Vec<OrganizationRow>, i64)> {
        match self {
            Self::Postgres(db) => db.list_organizations(page, page_size).await,
            Self::InMemory(db) => db.list_organizations(page, page_size).await,
        }
    }

    pub async fn list_all_organizations(&self) -> Result<Vec<OrganizationRow>> {
        match self {
            Self::Postgres(db) => db.list_all_organizations().await,
            Self::InMemory(db) => db.list_all_organizations().await,
        }
    }

    pub async fn update_organization(
        &self,
        id: Uuid,
        input: UpdateOrganizationRow,
    ) -> Result<Option<OrganizationRow>> {
        match self {
            Self::Postgres(db) => db.update_organization(id, input).await,
            Self::InMemory(db) => db.update_organization(id, input).await,
        }
    }

    pub async fn delete_organization(&self, id: Uuid) -> Result<bool> {
        match self {
            Self::Postgres(db) => db.delete_organization(id).await,
            Self::InMemory(db) => db.delete_organization(id).await,
        }
    }

    // ============================================
    // Persons
    // ============================================

    pub async fn create_person(&self, input: CreatePersonRow) -> Result<PersonRow> {
        match self {
            Self::Postgres(db) => db.create_person(input).await,
            Self::InMemory(db) => db.create_person(input).await,
        }
    }

    pub async fn get_person(&self, id: Uuid) -> Result<Option<PersonRow>> {
        match self {
            Self::Postgres(db) => db.get_person(id).await,
            Self::InMemory(db) => db.get_person(id).await,
        }
    }

    pub async fn get_person_by_email(&self, email: &str) -> Result<Option<PersonRow>> {
        match self {
            Self::Postgres(db) => db.get_person_by_email(email).await,
            Self::InMemory(db) => db.get_person_by_email(email).await,
        }
    }

    pub async fn list_persons(&self, page: i64, page_size: i64) -> Result<(Vec<PersonRow>, i64)> {
        match self {
            Self::Postgres(db) => db.list_persons(page, page_size).await,
            Self::InMemory(db) => db.list_persons(page, page_size).await,
        }
    }

    pub async fn update_person(
        &self,
        id: Uuid,
        input: UpdatePersonRow,
    ) -> Result<Option<PersonRow>> {
        match self {
            Self::Postgres(db) => db.update_person(id, input).await,
            Self::InMemory(db) => db.update_person(id, input).await,
        }
    }

    pub async fn delete_person(&self, id: Uuid) -> Result<bool> {
        match self {
            Self::Postgres(db) => db.delete_person(id).await,
            Self::InMemory(db) => db.delete_person(id).await,
        }
    }
}
