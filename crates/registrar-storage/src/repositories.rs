// Repository layer for database operations
//
// Explicit SQL per operation; the narrow credential-store surface the auth
// subsystem consumes is get_account_by_email / get_account /
// update_account_last_login.

use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::*;

#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create database connection from URL
    pub async fn from_url(database_url: &str) -> Result<Self> {
        let pool = PgPool::connect(database_url).await?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Apply embedded migrations
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("../../migrations").run(&self.pool).await?;
        Ok(())
    }

    // ============================================
    // Accounts
    // ============================================

    pub async fn create_account(&self, input: CreateAccountRow) -> Result<AccountRow> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            INSERT INTO accounts (email, password_hash, role, status)
            VALUES ($1, $2, $3, $4)
            RETURNING id, email, password_hash, role, status, last_login_at, created_at, updated_at
            "#,
        )
        .bind(&input.email)
        .bind(&input.password_hash)
        .bind(&input.role)
        .bind(&input.status)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn get_account(&self, id: Uuid) -> Result<Option<AccountRow>> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT id, email, password_hash, role, status, last_login_at, created_at, updated_at
            FROM accounts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn get_account_by_email(&self, email: &str) -> Result<Option<AccountRow>> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT id, email, password_hash, role, status, last_login_at, created_at, updated_at
            FROM accounts
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn update_account(
        &self,
        id: Uuid,
        input: UpdateAccountRow,
    ) -> Result<Option<AccountRow>> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            UPDATE accounts
            SET
                email = COALESCE($2, email),
                password_hash = COALESCE($3, password_hash),
                role = COALESCE($4, role),
                status = COALESCE($5, status),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, email, password_hash, role, status, last_login_at, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&input.email)
        .bind(&input.password_hash)
        .bind(&input.role)
        .bind(&input.status)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn update_account_last_login(
        &self,
        id: Uuid,
        at: DateTime<Utc>,
    ) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE accounts SET last_login_at = $2 WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn list_accounts(
        &self,
        page: i64,
        page_size: i64,
    ) -> Result<(Vec<AccountRow>, i64)> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM accounts")
            .fetch_one(&self.pool)
            .await?;

        let rows = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT id, email, password_hash, role, status, last_login_at, created_at, updated_at
            FROM accounts
            ORDER BY created_at DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(page_size)
        .bind((page - 1) * page_size)
        .fetch_all(&self.pool)
        .await?;

        Ok((rows, total))
    }

    pub async fn delete_account(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM accounts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    // ============================================
    // Organizations
    // ============================================

    pub async fn create_organization(
        &self,
        input: CreateOrganizationRow,
    ) -> Result<OrganizationRow> {
        let row = sqlx::query_as::<_, OrganizationRow>(
            r#"
            INSERT INTO organizations (name)
            VALUES ($1)
            RETURNING id, name, created_at, updated_at
            "#,
        )
        .bind(&input.name)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn get_organization(&self, id: Uuid) -> Result<Option<OrganizationRow>> {
        let row = sqlx::query_as::<_, OrganizationRow>(
            r#"
            SELECT id, name, created_at, updated_at
            FROM organizations
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn get_organization_by_name(&self, name: &str) -> Result<Option<OrganizationRow>> {
        let row = sqlx::query_as::<_, OrganizationRow>(
            r#"
            SELECT id, name, created_at, updated_at
            FROM organizations
            WHERE name = $1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn list_organizations(
        &self,
        page: i64,
        page_size: i64,
    ) -> Result<(Vec<OrganizationRow>, i64)> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM organizations")
            .fetch_one(&self.pool)
            .await?;

        let rows = sqlx::query_as::<_, OrganizationRow>(
            r#"
            SELECT id, name, created_at, updated_at
            FROM organizations
            ORDER BY created_at DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(page_size)
        .bind((page - 1) * page_size)
        .fetch_all(&self.pool)
        .await?;

        Ok((rows, total))
    }

    pub async fn list_all_organizations(&self) -> Result<Vec<OrganizationRow>> {
        let rows = sqlx::query_as::<_, OrganizationRow>(
            r#"
            SELECT id, name, created_at, updated_at
            FROM organizations
            ORDER BY name ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn update_organization(
        &self,
        id: Uuid,
        input: UpdateOrganizationRow,
    ) -> Result<Option<OrganizationRow>> {
        let row = sqlx::query_as::<_, OrganizationRow>(
            r#"
            UPDATE organizations
            SET
                name = COALESCE($2, name),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&input.name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn delete_organization(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM organizations WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    // ============================================
    // Persons
    // ============================================

    pub async fn create_person(&self, input: CreatePersonRow) -> Result<PersonRow> {
        let row = sqlx::query_as::<_, PersonRow>(
            r#"
            INSERT INTO persons (name, email, organization_id, status)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, email, organization_id, status, created_at, updated_at
            "#,
        )
        .bind(&input.name)
        .bind(&input.email)
        .bind(input.organization_id)
        .bind(&input.status)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn get_person(&self, id: Uuid) -> Result<Option<PersonRow>> {
        let row = sqlx::query_as::<_, PersonRow>(
            r#"
            SELECT id, name, email, organization_id, status, created_at, updated_at
            FROM persons
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn get_person_by_email(&self, email: &str) -> Result<Option<PersonRow>> {
        let row = sqlx::query_as::<_, PersonRow>(
            r#"
            SELECT id, name, email, organization_id, status, created_at, updated_at
            FROM persons
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn list_persons(
        &self,
        page: i64,
        page_size: i64,
    ) -> Result<(Vec<PersonRow>, i64)> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM persons")
            .fetch_one(&self.pool)
            .await?;

        let rows = sqlx::query_as::<_, PersonRow>(
            r#"
            SELECT id, name, email, organization_id, status, created_at, updated_at
            FROM persons
            ORDER BY created_at DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(page_size)
        .bind((page - 1) * page_size)
        .fetch_all(&self.pool)
        .await?;

        Ok((rows, total))
    }

    pub async fn update_person(
        &self,
        id: Uuid,
        input: UpdatePersonRow,
    ) -> Result<Option<PersonRow>> {
        let row = sqlx::query_as::<_, PersonRow>(
            r#"
            UPDATE persons
            SET
                name = COALESCE($2, name),
                email = COALESCE($3, email),
                organization_id = COALESCE($4, organization_id),
                status = COALESCE($5, status),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, email, organization_id, status, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&input.name)
        .bind(&input.email)
        .bind(input.organization_id)
        .bind(&input.status)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn delete_person(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM persons WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
