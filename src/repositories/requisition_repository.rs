use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::Result;
use crate::models::requisition::{NewRequisition, Requisition, RequisitionChanges};
use crate::repositories::{ListFilter, WhereBuilder};

const REQUISITION_COLUMNS: &str = "id, title, description, department, location, \
    employment_type, priority, is_draft, status, created_at, updated_at";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RequisitionRepository: Send + Sync {
    async fn exists(&self, id: i64) -> Result<bool>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Requisition>>;
    async fn insert(&self, requisition: &NewRequisition) -> Result<Requisition>;
    async fn update(&self, id: i64, changes: &RequisitionChanges) -> Result<Option<Requisition>>;
    async fn delete(&self, id: i64) -> Result<bool>;
    async fn list(&self, filter: &ListFilter, skip: i64, take: i64) -> Result<Vec<Requisition>>;
    async fn count(&self, filter: &ListFilter) -> Result<i64>;
}

#[derive(Clone)]
pub struct PgRequisitionRepository {
    pool: PgPool,
}

impl PgRequisitionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn predicate(filter: &ListFilter) -> WhereBuilder {
        let mut builder = WhereBuilder::default();
        builder
            .contains_any(&["title", "description"], filter.search_term.as_deref())
            .eq("status", filter.status.as_deref());
        builder
    }
}

#[async_trait]
impl RequisitionRepository for PgRequisitionRepository {
    async fn exists(&self, id: i64) -> Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM requisitions WHERE id = $1)",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Requisition>> {
        let query = format!("SELECT {REQUISITION_COLUMNS} FROM requisitions WHERE id = $1");
        let requisition = sqlx::query_as::<_, Requisition>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(requisition)
    }

    async fn insert(&self, requisition: &NewRequisition) -> Result<Requisition> {
        let query = format!(
            "INSERT INTO requisitions
                (title, description, department, location, employment_type, priority, is_draft, status)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {REQUISITION_COLUMNS}"
        );
        let row = sqlx::query_as::<_, Requisition>(&query)
            .bind(&requisition.title)
            .bind(&requisition.description)
            .bind(&requisition.department)
            .bind(&requisition.location)
            .bind(&requisition.employment_type)
            .bind(&requisition.priority)
            .bind(requisition.is_draft)
            .bind(&requisition.status)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn update(&self, id: i64, changes: &RequisitionChanges) -> Result<Option<Requisition>> {
        let query = format!(
            "UPDATE requisitions
             SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                department = COALESCE($4, department),
                location = COALESCE($5, location),
                employment_type = COALESCE($6, employment_type),
                priority = COALESCE($7, priority),
                is_draft = COALESCE($8, is_draft),
                status = COALESCE($9, status),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {REQUISITION_COLUMNS}"
        );
        let row = sqlx::query_as::<_, Requisition>(&query)
            .bind(id)
            .bind(&changes.title)
            .bind(&changes.description)
            .bind(&changes.department)
            .bind(&changes.location)
            .bind(&changes.employment_type)
            .bind(&changes.priority)
            .bind(changes.is_draft)
            .bind(&changes.status)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let res = sqlx::query("DELETE FROM requisitions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn list(&self, filter: &ListFilter, skip: i64, take: i64) -> Result<Vec<Requisition>> {
        let predicate = Self::predicate(filter);
        let query = format!(
            "SELECT {REQUISITION_COLUMNS} FROM requisitions
             {}
             ORDER BY created_at DESC, id DESC
             LIMIT ${} OFFSET ${}",
            predicate.clause(),
            predicate.next_param(),
            predicate.next_param() + 1
        );
        let mut statement = sqlx::query_as::<_, Requisition>(&query);
        for value in predicate.args() {
            statement = statement.bind(value);
        }
        let items = statement
            .bind(take)
            .bind(skip)
            .fetch_all(&self.pool)
            .await?;
        Ok(items)
    }

    async fn count(&self, filter: &ListFilter) -> Result<i64> {
        let predicate = Self::predicate(filter);
        let query = format!("SELECT COUNT(*) FROM requisitions {}", predicate.clause());
        let mut statement = sqlx::query_scalar::<_, i64>(&query);
        for value in predicate.args() {
            statement = statement.bind(value);
        }
        let total = statement.fetch_one(&self.pool).await?;
        Ok(total)
    }
}
