// Account service for business logic

use registrar_core::{Account, AccountStatus, Role};
use registrar_storage::{
    hash_password, AccountRow, CreateAccountRow, StorageBackend, UpdateAccountRow,
};
use uuid::Uuid;

use crate::api::accounts::{CreateAccountRequest, UpdateAccountRequest};

use super::ServiceError;

pub struct AccountService {
    db: StorageBackend,
}

impl AccountService {
    pub fn new(db: StorageBackend) -> Self {
        Self { db }
    }

    pub async fn create(&self, req: CreateAccountRequest) -> Result<Account, ServiceError> {
        if self.db.get_account_by_email(&req.email).await?.is_some() {
            return Err(ServiceError::Conflict(format!(
                "account with email {} already exists",
                req.email
            )));
        }

        let password_hash = hash_password(&req.password)?;
        let row = self
            .db
            .create_account(CreateAccountRow {
                email: req.email,
                password_hash,
                role: req.role.unwrap_or(Role::Standard).to_string(),
                status: req.status.unwrap_or(AccountStatus::Enabled).to_string(),
            })
            .await?;

        Ok(Self::row_to_account(row))
    }

    pub async fn get(&self, id: Uuid) -> Result<Account, ServiceError> {
        let row = self
            .db
            .get_account(id)
            .await?
            .ok_or(ServiceError::NotFound("account"))?;
        Ok(Self::row_to_account(row))
    }

    pub async fn list(
        &self,
        page: i64,
        page_size: i64,
    ) -> Result<(Vec<Account>, i64), ServiceError> {
        let (rows, total) = self.db.list_accounts(page, page_size).await?;
        Ok((rows.into_iter().map(Self::row_to_account).collect(), total))
    }

    pub async fn update(
        &self,
        id: Uuid,
        req: UpdateAccountRequest,
    ) -> Result<Account, ServiceError> {
        if let Some(email) = &req.email {
            if let Some(existing) = self.db.get_account_by_email(email).await? {
                if existing.id != id {
                    return Err(ServiceError::Conflict(format!(
                        "account with email {email} already exists"
                    )));
                }
            }
        }

        let password_hash = match req.password {
            Some(password) => Some(hash_password(&password)?),
            None => None,
        };

        let row = self
            .db
            .update_account(
                id,
                UpdateAccountRow {
                    email: req.email,
                    password_hash,
                    role: req.role.map(|r| r.to_string()),
                    status: req.status.map(|s| s.to_string()),
                },
            )
            .await?
            .ok_or(ServiceError::NotFound("account"))?;

        Ok(Self::row_to_account(row))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        if self.db.delete_account(id).await? {
            Ok(())
        } else {
            Err(ServiceError::NotFound("account"))
        }
    }

    fn row_to_account(row: AccountRow) -> Account {
        Account {
            id: row.id,
            email: row.email,
            role: Role::from(row.role.as_str()),
            status: AccountStatus::from(row.status.as_str()),
            last_login_at: row.last_login_at,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_request(email: &str) -> CreateAccountRequest {
        CreateAccountRequest {
            email: email.to_string(),
            password: "secret1".to_string(),
            role: None,
            status: None,
        }
    }

    #[tokio::test]
    async fn test_create_defaults_and_hash() {
        let service = AccountService::new(StorageBackend::in_memory());

        let account = service.create(create_request("a@b.com")).await.unwrap();
        assert_eq!(account.role, Role::Standard);
        assert_eq!(account.status, AccountStatus::Enabled);
        assert!(account.last_login_at.is_none());
    }

    #[tokio::test]
    async fn test_create_duplicate_email_conflicts() {
        let service = AccountService::new(StorageBackend::in_memory());
        service.create(create_request("a@b.com")).await.unwrap();

        let err = service.create(create_request("a@b.com")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_update_and_not_found() {
        let service = AccountService::new(StorageBackend::in_memory());
        let account = service.create(create_request("a@b.com")).await.unwrap();

        let updated = service
            .update(
                account.id,
                UpdateAccountRequest {
                    role: Some(Role::Administrator),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.role, Role::Administrator);

        let err = service
            .update(Uuid::now_v7(), UpdateAccountRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete() {
        let service = AccountService::new(StorageBackend::in_memory());
        let account = service.create(create_request("a@b.com")).await.unwrap();

        service.delete(account.id).await.unwrap();
        let err = service.delete(account.id).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }
}
