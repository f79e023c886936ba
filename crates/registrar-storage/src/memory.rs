// In-memory storage implementation for dev mode
// Decision: Use parking_lot for thread-safe access
// Decision: UUIDs generated via uuid v7 (time-ordered)
//
// This implementation provides a PostgreSQL-compatible API backed by in-memory
// HashMaps, allowing the server to run without a database for development and
// letting tests exercise the full request path.

use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::collections::HashMap;
use uuid::Uuid;

use crate::models::*;

/// In-memory database for dev mode
/// All data is stored in memory and lost on restart
#[derive(Default)]
pub struct InMemoryDatabase {
    accounts: RwLock<HashMap<Uuid, AccountRow>>,
    organizations: RwLock<HashMap<Uuid, OrganizationRow>>,
    persons: RwLock<HashMap<Uuid, PersonRow>>,
}

impl InMemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    fn now() -> DateTime<Utc> {
        Utc::now()
    }

    // ============================================
    // Accounts
    // ============================================

    pub async fn create_account(&self, input: CreateAccountRow) -> Result<AccountRow> {
        let mut accounts = self.accounts.write();
        if accounts.values().any(|a| a.email == input.email) {
            return Err(anyhow!("account email already exists: {}", input.email));
        }
        let now = Self::now();
        let id = Uuid::now_v7();
        let row = AccountRow {
            id,
            email: input.email,
            password_hash: input.password_hash,
            role: input.role,
            status: input.status,
            last_login_at: None,
            created_at: now,
            updated_at: now,
        };
        accounts.insert(id, row.clone());
        Ok(row)
    }

    pub async fn get_account(&self, id: Uuid) -> Result<Option<AccountRow>> {
        Ok(self.accounts.read().get(&id).cloned())
    }

    pub async fn get_account_by_email(&self, email: &str) -> Result<Option<AccountRow>> {
        Ok(self
            .accounts
            .read()
            .values()
            .find(|a| a.email == email)
            .cloned())
    }

    pub async fn update_account(
        &self,
        id: Uuid,
        input: UpdateAccountRow,
    ) -> Result<Option<AccountRow>> {
        let mut accounts = self.accounts.write();
        if let Some(account) = accounts.get_mut(&id) {
            if let Some(email) = input.email {
                account.email = email;
            }
            if let Some(password_hash) = input.password_hash {
                account.password_hash = password_hash;
            }
            if let Some(role) = input.role {
                account.role = role;
            }
            if let Some(status) = input.status {
                account.status = status;
            }
            account.updated_at = Self::now();
            return Ok(Some(account.clone()));
        }
        Ok(None)
    }

    pub async fn update_account_last_login(&self, id: Uuid, at: DateTime<Utc>) -> Result<()> {
        if let Some(account) = self.accounts.write().get_mut(&id) {
            account.last_login_at = Some(at);
        }
        Ok(())
    }

    pub async fn list_accounts(
        &self,
        page: i64,
        page_size: i64,
    ) -> Result<(Vec<AccountRow>, i64)> {
        let accounts = self.accounts.read();
        let total = accounts.len() as i64;
        let mut rows: Vec<_> = accounts.values().cloned().collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok((paginate(rows, page, page_size), total))
    }

    pub async fn delete_account(&self, id: Uuid) -> Result<bool> {
        Ok(self.accounts.write().remove(&id).is_some())
    }

    // ============================================
    // Organizations
    // ============================================

    pub async fn create_organization(
        &self,
        input: CreateOrganizationRow,
    ) -> Result<OrganizationRow> {
        let mut organizations = self.organizations.write();
        if organizations.values().any(|o| o.name == input.name) {
            return Err(anyhow!("organization name already exists: {}", input.name));
        }
        let now = Self::now();
        let id = Uuid::now_v7();
        let row = OrganizationRow {
            id,
            name: input.name,
            created_at: now,
            updated_at: now,
        };
        organizations.insert(id, row.clone());
        Ok(row)
    }

    pub async fn get_organization(&self, id: Uuid) -> Result<Option<OrganizationRow>> {
        Ok(self.organizations.read().get(&id).cloned())
    }

    pub async fn get_organization_by_name(&self, name: &str) -> Result<Option<OrganizationRow>> {
        Ok(self
            .organizations
            .read()
            .values()
            .find(|o| o.name == name)
            .cloned())
    }

    pub async fn list_organizations(
        &self,
        page: i64,
        page_size: i64,
    ) -> Result<(Vec<OrganizationRow>, i64)> {
        let organizations = self.organizations.read();
        let total = organizations.len() as i64;
        let mut rows: Vec<_> = organizations.values().cloned().collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok((paginate(rows, page, page_size), total))
    }

    pub async fn list_all_organizations(&self) -> Result<Vec<OrganizationRow>> {
        let mut rows: Vec<_> = self.organizations.read().values().cloned().collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(rows)
    }

    pub async fn update_organization(
        &self,
        id: Uuid,
        input: UpdateOrganizationRow,
    ) -> Result<Option<OrganizationRow>> {
        let mut organizations = self.organizations.write();
        if let Some(organization) = organizations.get_mut(&id) {
            if let Some(name) = input.name {
                organization.name = name;
            }
            organization.updated_at = Self::now();
            return Ok(Some(organization.clone()));
        }
        Ok(None)
    }

    pub async fn delete_organization(&self, id: Uuid) -> Result<bool> {
        Ok(self.organizations.write().remove(&id).is_some())
    }

    // ============================================
    // Persons
    // ============================================

    pub async fn create_person(&self, input: CreatePersonRow) -> Result<PersonRow> {
        let mut persons = self.persons.write();
        if persons.values().any(|p| p.email == input.email) {
            return Err(anyhow!("person email already exists: {}", input.email));
        }
        let now = Self::now();
        let id = Uuid::now_v7();
        let row = PersonRow {
            id,
            name: input.name,
            email: input.email,
            organization_id: input.organization_id,
            status: input.status,
            created_at: now,
            updated_at: now,
        };
        persons.insert(id, row.clone());
        Ok(row)
    }

    pub async fn get_person(&self, id: Uuid) -> Result<Option<PersonRow>> {
        Ok(self.persons.read().get(&id).cloned())
    }

    pub async fn get_person_by_email(&self, email: &str) -> Result<Option<PersonRow>> {
        Ok(self
            .persons
            .read()
            .values()
            .find(|p| p.email == email)
            .cloned())
    }

    pub async fn list_persons(&self, page: i64, page_size: i64) -> Result<(Vec<PersonRow>, i64)> {
        let persons = self.persons.read();
        let total = persons.len() as i64;
        let mut rows: Vec<_> = persons.values().cloned().collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok((paginate(rows, page, page_size), total))
    }

    pub async fn update_person(
        &self,
        id: Uuid,
        input: UpdatePersonRow,
    ) -> Result<Option<PersonRow>> {
        let mut persons = self.persons.write();
        if let Some(person) = persons.get_mut(&id) {
            if let Some(name) = input.name {
                person.name = name;
            }
            if let Some(email) = input.email {
                person.email = email;
            }
            if let Some(organization_id) = input.organization_id {
                person.organization_id = Some(organization_id);
            }
            if let Some(status) = input.status {
                person.status = status;
            }
            person.updated_at = Self::now();
            return Ok(Some(person.clone()));
        }
        Ok(None)
    }

    pub async fn delete_person(&self, id: Uuid) -> Result<bool> {
        Ok(self.persons.write().remove(&id).is_some())
    }
}

/// Page slicing shared by the list operations; page is 1-based.
fn paginate<T>(rows: Vec<T>, page: i64, page_size: i64) -> Vec<T> {
    let start = ((page - 1) * page_size).max(0) as usize;
    rows.into_iter()
        .skip(start)
        .take(page_size.max(0) as usize)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account_input(email: &str) -> CreateAccountRow {
        CreateAccountRow {
            email: email.to_string(),
            password_hash: "$argon2id$fake".to_string(),
            role: "standard".to_string(),
            status: "enabled".to_string(),
        }
    }

    #[tokio::test]
    async fn test_account_crud() {
        let db = InMemoryDatabase::new();

        let created = db.create_account(account_input("a@b.com")).await.unwrap();
        assert_eq!(created.email, "a@b.com");
        assert!(created.last_login_at.is_none());

        let by_email = db.get_account_by_email("a@b.com").await.unwrap().unwrap();
        assert_eq!(by_email.id, created.id);

        // Duplicate email rejected
        assert!(db.create_account(account_input("a@b.com")).await.is_err());

        let updated = db
            .update_account(
                created.id,
                UpdateAccountRow {
                    role: Some("administrator".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.role, "administrator");
        assert_eq!(updated.email, "a@b.com");

        assert!(db.delete_account(created.id).await.unwrap());
        assert!(!db.delete_account(created.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_last_login_update() {
        let db = InMemoryDatabase::new();
        let created = db.create_account(account_input("a@b.com")).await.unwrap();

        let at = Utc::now();
        db.update_account_last_login(created.id, at).await.unwrap();

        let fetched = db.get_account(created.id).await.unwrap().unwrap();
        assert_eq!(fetched.last_login_at, Some(at));
    }

    #[tokio::test]
    async fn test_pagination() {
        let db = InMemoryDatabase::new();
        for i in 0..5 {
            db.create_account(account_input(&format!("user{i}@b.com")))
                .await
                .unwrap();
        }

        let (page1, total) = db.list_accounts(1, 2).await.unwrap();
        assert_eq!(total, 5);
        assert_eq!(page1.len(), 2);

        let (page3, _) = db.list_accounts(3, 2).await.unwrap();
        assert_eq!(page3.len(), 1);

        let (beyond, _) = db.list_accounts(4, 2).await.unwrap();
        assert!(beyond.is_empty());
    }

    #[tokio::test]
    async fn test_organization_name_unique() {
        let db = InMemoryDatabase::new();
        db.create_organization(CreateOrganizationRow {
            name: "Acme".to_string(),
        })
        .await
        .unwrap();

        assert!(db
            .create_organization(CreateOrganizationRow {
                name: "Acme".to_string(),
            })
            .await
            .is_err());

        let found = db.get_organization_by_name("Acme").await.unwrap();
        assert!(found.is_some());
    }
}
