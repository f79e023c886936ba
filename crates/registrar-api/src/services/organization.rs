// Organization service for business logic

use registrar_core::Organization;
use registrar_storage::{
    CreateOrganizationRow, OrganizationRow, StorageBackend, UpdateOrganizationRow,
};
use uuid::Uuid;

use crate::api::organizations::{CreateOrganizationRequest, UpdateOrganizationRequest};

use super::ServiceError;

pub struct OrganizationService {
    db: StorageBackend,
}

impl OrganizationService {
    pub fn new(db: StorageBackend) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        req: CreateOrganizationRequest,
    ) -> Result<Organization, ServiceError> {
        if self.db.get_organization_by_name(&req.name).await?.is_some() {
            return Err(ServiceError::Conflict(format!(
                "organization named {} already exists",
                req.name
            )));
        }

        let row = self
            .db
            .create_organization(CreateOrganizationRow { name: req.name })
            .await?;

        Ok(Self::row_to_organization(row))
    }

    pub async fn get(&self, id: Uuid) -> Result<Organization, ServiceError> {
        let row = self
            .db
            .get_organization(id)
            .await?
            .ok_or(ServiceError::NotFound("organization"))?;
        Ok(Self::row_to_organization(row))
    }

    pub async fn list(
        &self,
        page: i64,
        page_size: i64,
    ) -> Result<(Vec<Organization>, i64), ServiceError> {
        let (rows, total) = self.db.list_organizations(page, page_size).await?;
        Ok((
            rows.into_iter().map(Self::row_to_organization).collect(),
            total,
        ))
    }

    pub async fn list_all(&self) -> Result<Vec<Organization>, ServiceError> {
        let rows = self.db.list_all_organizations().await?;
        Ok(rows.into_iter().map(Self::row_to_organization).collect())
    }

    pub async fn update(
        &self,
        id: Uuid,
        req: UpdateOrganizationRequest,
    ) -> Result<Organization, ServiceError> {
        if let Some(name) = &req.name {
            if let Some(existing) = self.db.get_organization_by_name(name).await? {
                if existing.id != id {
                    return Err(ServiceError::Conflict(format!(
                        "organization named {name} already exists"
                    )));
                }
            }
        }

        let row = self
            .db
            .update_organization(id, UpdateOrganizationRow { name: req.name })
            .await?
            .ok_or(ServiceError::NotFound("organization"))?;

        Ok(Self::row_to_organization(row))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        if self.db.delete_organization(id).await? {
            Ok(())
        } else {
            Err(ServiceError::NotFound("organization"))
        }
    }

    fn row_to_organization(row: OrganizationRow) -> Organization {
        Organization {
            id: row.id,
            name: row.name,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_list_all_sorted_by_name() {
        let service = OrganizationService::new(StorageBackend::in_memory());
        for name in ["Zenith", "Acme", "Mid"] {
            service
                .create(CreateOrganizationRequest {
                    name: name.to_string(),
                })
                .await
                .unwrap();
        }

        let all = service.list_all().await.unwrap();
        let names: Vec<_> = all.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["Acme", "Mid", "Zenith"]);
    }

    #[tokio::test]
    async fn test_duplicate_name_conflicts() {
        let service = OrganizationService::new(StorageBackend::in_memory());
        service
            .create(CreateOrganizationRequest {
                name: "Acme".to_string(),
            })
            .await
            .unwrap();

        let err = service
            .create(CreateOrganizationRequest {
                name: "Acme".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));
    }
}
