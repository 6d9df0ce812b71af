use std::sync::Arc;

use sqlx::PgPool;

use crate::error::{Error, Result};
use crate::models::requisition::{NewRequisition, Requisition, RequisitionChanges};
use crate::repositories::{ListFilter, PgRequisitionRepository, RequisitionRepository};
use crate::services::Page;

#[derive(Clone)]
pub struct RequisitionService {
    requisitions: Arc<dyn RequisitionRepository>,
}

impl RequisitionService {
    pub fn new(pool: PgPool) -> Self {
        Self::with_repository(Arc::new(PgRequisitionRepository::new(pool)))
    }

    pub fn with_repository(requisitions: Arc<dyn RequisitionRepository>) -> Self {
        Self { requisitions }
    }

    pub async fn create(&self, requisition: NewRequisition) -> Result<Requisition> {
        let created = self.requisitions.insert(&requisition).await?;
        tracing::info!(requisition_id = created.id, status = %created.status, "requisition created");
        Ok(created)
    }

    pub async fn get(&self, id: i64) -> Result<Requisition> {
        self.requisitions
            .find_by_id(id)
            .await?
            .ok_or_else(|| Error::not_found("requisition", id))
    }

    pub async fn list(
        &self,
        filter: &ListFilter,
        skip: i64,
        take: i64,
    ) -> Result<Page<Requisition>> {
        let items = self.requisitions.list(filter, skip, take).await?;
        let total_count = self.requisitions.count(filter).await?;
        Ok(Page {
            items,
            total_count,
            skip,
            take,
        })
    }

    pub async fn update(&self, id: i64, changes: RequisitionChanges) -> Result<Requisition> {
        self.requisitions
            .update(id, &changes)
            .await?
            .ok_or_else(|| Error::not_found("requisition", id))
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        if !self.requisitions.delete(id).await? {
            return Err(Error::not_found("requisition", id));
        }
        tracing::info!(requisition_id = id, "requisition deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::requisition_repository::MockRequisitionRepository;

    #[tokio::test]
    async fn list_reports_total_independent_of_page() {
        let mut repo = MockRequisitionRepository::new();
        repo.expect_list()
            .withf(|_, skip, take| *skip == 20 && *take == 10)
            .returning(|_, _, _| Ok(Vec::new()));
        repo.expect_count().returning(|_| Ok(21));
        let service = RequisitionService::with_repository(Arc::new(repo));

        let page = service.list(&ListFilter::default(), 20, 10).await.unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.total_count, 21);
    }

    #[tokio::test]
    async fn delete_of_missing_requisition_is_not_found() {
        let mut repo = MockRequisitionRepository::new();
        repo.expect_delete().returning(|_| Ok(false));
        let service = RequisitionService::with_repository(Arc::new(repo));

        let err = service.delete(9).await.unwrap_err();
        assert!(matches!(err, Error::NotFound { resource: "requisition", id: 9 }));
    }
}
