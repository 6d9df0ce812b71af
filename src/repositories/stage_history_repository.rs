use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::Result;
use crate::models::stage_history::{StageHistory, StageHistoryCorrection};
use crate::repositories::application_repository::HISTORY_COLUMNS;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StageHistoryRepository: Send + Sync {
    /// Newest first.
    async fn list_for_application(&self, application_id: i64) -> Result<Vec<StageHistory>>;
    async fn find_by_id(&self, id: i64) -> Result<Option<StageHistory>>;
    async fn correct(
        &self,
        id: i64,
        correction: &StageHistoryCorrection,
    ) -> Result<Option<StageHistory>>;
}

#[derive(Clone)]
pub struct PgStageHistoryRepository {
    pool: PgPool,
}

impl PgStageHistoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StageHistoryRepository for PgStageHistoryRepository {
    async fn list_for_application(&self, application_id: i64) -> Result<Vec<StageHistory>> {
        let query = format!(
            "SELECT {HISTORY_COLUMNS} FROM stage_histories
             WHERE application_id = $1
             ORDER BY moved_at DESC, id DESC"
        );
        let rows = sqlx::query_as::<_, StageHistory>(&query)
            .bind(application_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<StageHistory>> {
        let query = format!("SELECT {HISTORY_COLUMNS} FROM stage_histories WHERE id = $1");
        let row = sqlx::query_as::<_, StageHistory>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn correct(
        &self,
        id: i64,
        correction: &StageHistoryCorrection,
    ) -> Result<Option<StageHistory>> {
        let query = format!(
            "UPDATE stage_histories
             SET
                from_stage = COALESCE($2, from_stage),
                to_stage = COALESCE($3, to_stage),
                moved_by = COALESCE($4, moved_by),
                moved_at = COALESCE($5, moved_at)
             WHERE id = $1
             RETURNING {HISTORY_COLUMNS}"
        );
        let row = sqlx::query_as::<_, StageHistory>(&query)
            .bind(id)
            .bind(&correction.from_stage)
            .bind(&correction.to_stage)
            .bind(&correction.moved_by)
            .bind(correction.moved_at)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }
}
