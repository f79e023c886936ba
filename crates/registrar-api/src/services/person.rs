// Person service for business logic

use registrar_core::{Person, PersonStatus};
use registrar_storage::{CreatePersonRow, PersonRow, StorageBackend, UpdatePersonRow};
use uuid::Uuid;

use crate::api::persons::{CreatePersonRequest, UpdatePersonRequest};

use super::ServiceError;

pub struct PersonService {
    db: StorageBackend,
}

impl PersonService {
    pub fn new(db: StorageBackend) -> Self {
        Self { db }
    }

    pub async fn create(&self, req: CreatePersonRequest) -> Result<Person, ServiceError> {
        if self.db.get_person_by_email(&req.email).await?.is_some() {
            return Err(ServiceError::Conflict(format!(
                "person with email {} already exists",
                req.email
            )));
        }

        self.check_organization(req.organization_id).await?;

        let row = self
            .db
            .create_person(CreatePersonRow {
                name: req.name,
                email: req.email,
                organization_id: req.organization_id,
                status: req.status.unwrap_or(PersonStatus::Active).to_string(),
            })
            .await?;

        Ok(Self::row_to_person(row))
    }

    pub async fn get(&self, id: Uuid) -> Result<Person, ServiceError> {
        let row = self
            .db
            .get_person(id)
            .await?
            .ok_or(ServiceError::NotFound("person"))?;
        Ok(Self::row_to_person(row))
    }

    pub async fn list(
        &self,
        page: i64,
        page_size: i64,
    ) -> Result<(Vec<Person>, i64), ServiceError> {
        let (rows, total) = self.db.list_persons(page, page_size).await?;
        Ok((rows.into_iter().map(Self::row_to_person).collect(), total))
    }

    pub async fn update(&self, id: Uuid, req: UpdatePersonRequest) -> Result<Person, ServiceError> {
        if let Some(email) = &req.email {
            if let Some(existing) = self.db.get_person_by_email(email).await? {
                if existing.id != id {
                    return Err(ServiceError::Conflict(format!(
                        "person with email {email} already exists"
                    )));
                }
            }
        }

        self.check_organization(req.organization_id).await?;

        let row = self
            .db
            .update_person(
                id,
                UpdatePersonRow {
                    name: req.name,
                    email: req.email,
                    organization_id: req.organization_id,
                    status: req.status.map(|s| s.to_string()),
                },
            )
            .await?
            .ok_or(ServiceError::NotFound("person"))?;

        Ok(Self::row_to_person(row))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        if self.db.delete_person(id).await? {
            Ok(())
        } else {
            Err(ServiceError::NotFound("person"))
        }
    }

    async fn check_organization(&self, organization_id: Option<Uuid>) -> Result<(), ServiceError> {
        if let Some(id) = organization_id {
            if self.db.get_organization(id).await?.is_none() {
                return Err(ServiceError::InvalidReference(format!(
                    "organization {id} does not exist"
                )));
            }
        }
        Ok(())
    }

    fn row_to_person(row: PersonRow) -> Person {
        Person {
            id: row.id,
            name: row.name,
            email: row.email,
            organization_id: row.organization_id,
            status: PersonStatus::from(row.status.as_str()),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use registrar_storage::CreateOrganizationRow;

    fn create_request(email: &str, organization_id: Option<Uuid>) -> CreatePersonRequest {
        CreatePersonRequest {
            name: "Test Person".to_string(),
            email: email.to_string(),
            organization_id,
            status: None,
        }
    }

    #[tokio::test]
    async fn test_create_with_unknown_organization_rejected() {
        let service = PersonService::new(StorageBackend::in_memory());

        let err = service
            .create(create_request("p@b.com", Some(Uuid::now_v7())))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::InvalidReference(_)));
    }

    #[tokio::test]
    async fn test_create_with_known_organization() {
        let db = StorageBackend::in_memory();
        let organization = db
            .create_organization(CreateOrganizationRow {
                name: "Acme".to_string(),
            })
            .await
            .unwrap();

        let service = PersonService::new(db);
        let person = service
            .create(create_request("p@b.com", Some(organization.id)))
            .await
            .unwrap();

        assert_eq!(person.organization_id, Some(organization.id));
        assert_eq!(person.status, PersonStatus::Active);
    }
}
