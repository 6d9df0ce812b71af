use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Transaction};

use crate::error::{Error, Result};
use crate::models::application::{
    Application, ApplicationFilter, ApplicationSummary, NewApplication, StageCount, StageMove,
    StageMoveOutcome,
};
use crate::models::stage_history::StageHistory;
use crate::repositories::WhereBuilder;

const APPLICATION_COLUMNS: &str = "id, candidate_id, requisition_id, current_stage, status, \
    version, created_at, updated_at";

pub(crate) const HISTORY_COLUMNS: &str =
    "id, application_id, from_stage, to_stage, moved_by, moved_at";

const SUMMARY_COLUMNS: &str = "a.id, a.candidate_id, a.requisition_id, a.current_stage, \
    a.status, a.version, a.created_at, a.updated_at, \
    c.first_name AS candidate_first_name, c.last_name AS candidate_last_name, \
    c.email AS candidate_email, r.title AS requisition_title, \
    r.department AS requisition_department";

const SEARCH_FROM: &str = "FROM applications a
    JOIN candidates c ON c.id = a.candidate_id
    JOIN requisitions r ON r.id = a.requisition_id";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ApplicationRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<Application>>;
    async fn exists(&self, id: i64) -> Result<bool>;
    async fn insert(&self, application: &NewApplication) -> Result<Application>;
    /// Applies a stage change (and the optional status) and appends its
    /// history row in one transaction. Fails with `Conflict` when the stored
    /// version no longer matches.
    async fn record_stage_move(&self, stage_move: &StageMove) -> Result<StageMoveOutcome>;
    async fn update_status(
        &self,
        id: i64,
        status: &str,
        expected_version: i32,
        updated_at: DateTime<Utc>,
    ) -> Result<Application>;
    async fn delete(&self, id: i64) -> Result<bool>;
    async fn search(
        &self,
        filter: &ApplicationFilter,
        skip: i64,
        take: Option<i64>,
    ) -> Result<Vec<ApplicationSummary>>;
    async fn search_count(&self, filter: &ApplicationFilter) -> Result<i64>;
    async fn stage_counts(&self) -> Result<Vec<StageCount>>;
}

#[derive(Clone)]
pub struct PgApplicationRepository {
    pool: PgPool,
}

impl PgApplicationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn predicate(filter: &ApplicationFilter) -> WhereBuilder {
        let mut builder = WhereBuilder::default();
        builder
            .contains_any(
                &[
                    "c.first_name",
                    "c.last_name",
                    "c.email",
                    "r.title",
                    "r.description",
                    "a.current_stage",
                ],
                filter.search_term.as_deref(),
            )
            .eq("a.status", filter.status.as_deref())
            .eq("a.current_stage", filter.stage.as_deref())
            .eq("r.department", filter.department.as_deref());
        builder
    }

    /// Distinguishes a vanished row from a stale version after a guarded
    /// update matched nothing.
    async fn missing_or_conflict(
        tx: &mut Transaction<'_, Postgres>,
        id: i64,
        expected_version: i32,
    ) -> Error {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM applications WHERE id = $1)",
        )
        .bind(id)
        .fetch_one(&mut **tx)
        .await;
        match exists {
            Ok(true) => Error::Conflict(format!(
                "application {} was modified concurrently (expected version {})",
                id, expected_version
            )),
            Ok(false) => Error::not_found("application", id),
            Err(e) => e.into(),
        }
    }
}

/// Reports a foreign-key violation on insert as the missing parent.
fn map_insert_error(err: sqlx::Error, application: &NewApplication) -> Error {
    if let sqlx::Error::Database(ref db) = err {
        if db.code().as_deref() == Some("23503") {
            let constraint = db.constraint().unwrap_or_default();
            if constraint.contains("requisition") {
                return Error::not_found("requisition", application.requisition_id);
            }
            return Error::not_found("candidate", application.candidate_id);
        }
    }
    err.into()
}

#[async_trait]
impl ApplicationRepository for PgApplicationRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Application>> {
        let query = format!("SELECT {APPLICATION_COLUMNS} FROM applications WHERE id = $1");
        let application = sqlx::query_as::<_, Application>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(application)
    }

    async fn exists(&self, id: i64) -> Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM applications WHERE id = $1)",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    async fn insert(&self, application: &NewApplication) -> Result<Application> {
        let query = format!(
            "INSERT INTO applications
                (candidate_id, requisition_id, current_stage, status, version, created_at, updated_at)
             VALUES ($1, $2, $3, $4, 1, $5, $5)
             RETURNING {APPLICATION_COLUMNS}"
        );
        sqlx::query_as::<_, Application>(&query)
            .bind(application.candidate_id)
            .bind(application.requisition_id)
            .bind(&application.current_stage)
            .bind(&application.status)
            .bind(application.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_insert_error(e, application))
    }

    async fn record_stage_move(&self, stage_move: &StageMove) -> Result<StageMoveOutcome> {
        let mut tx = self.pool.begin().await?;

        // History for one application never goes backwards in time.
        let moved_at = sqlx::query_scalar::<_, DateTime<Utc>>(
            "SELECT GREATEST($2::timestamptz, COALESCE(MAX(moved_at), $2::timestamptz))
             FROM stage_histories
             WHERE application_id = $1",
        )
        .bind(stage_move.application_id)
        .bind(stage_move.moved_at)
        .fetch_one(&mut *tx)
        .await?;

        let update = format!(
            "UPDATE applications
             SET current_stage = $2, updated_at = $3, version = version + 1,
                 status = COALESCE($6, status)
             WHERE id = $1 AND version = $4 AND current_stage = $5
             RETURNING {APPLICATION_COLUMNS}"
        );
        let application = sqlx::query_as::<_, Application>(&update)
            .bind(stage_move.application_id)
            .bind(&stage_move.to_stage)
            .bind(moved_at)
            .bind(stage_move.expected_version)
            .bind(&stage_move.from_stage)
            .bind(&stage_move.status)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(application) = application else {
            return Err(Self::missing_or_conflict(
                &mut tx,
                stage_move.application_id,
                stage_move.expected_version,
            )
            .await);
        };

        let insert = format!(
            "INSERT INTO stage_histories (application_id, from_stage, to_stage, moved_by, moved_at)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {HISTORY_COLUMNS}"
        );
        let history = sqlx::query_as::<_, StageHistory>(&insert)
            .bind(stage_move.application_id)
            .bind(&stage_move.from_stage)
            .bind(&stage_move.to_stage)
            .bind(&stage_move.moved_by)
            .bind(moved_at)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(StageMoveOutcome {
            application,
            history,
        })
    }

    async fn update_status(
        &self,
        id: i64,
        status: &str,
        expected_version: i32,
        updated_at: DateTime<Utc>,
    ) -> Result<Application> {
        let mut tx = self.pool.begin().await?;
        let query = format!(
            "UPDATE applications
             SET status = $2, updated_at = $3, version = version + 1
             WHERE id = $1 AND version = $4
             RETURNING {APPLICATION_COLUMNS}"
        );
        let application = sqlx::query_as::<_, Application>(&query)
            .bind(id)
            .bind(status)
            .bind(updated_at)
            .bind(expected_version)
            .fetch_optional(&mut *tx)
            .await?;

        match application {
            Some(application) => {
                tx.commit().await?;
                Ok(application)
            }
            None => Err(Self::missing_or_conflict(&mut tx, id, expected_version).await),
        }
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        // stage_histories rows go with it via ON DELETE CASCADE.
        let res = sqlx::query("DELETE FROM applications WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn search(
        &self,
        filter: &ApplicationFilter,
        skip: i64,
        take: Option<i64>,
    ) -> Result<Vec<ApplicationSummary>> {
        let predicate = Self::predicate(filter);
        let offset_param = predicate.next_param();
        let limit = match take {
            Some(_) => format!("LIMIT ${}", offset_param + 1),
            None => String::new(),
        };
        let query = format!(
            "SELECT {SUMMARY_COLUMNS}
             {SEARCH_FROM}
             {}
             ORDER BY a.created_at DESC, a.id DESC
             OFFSET ${} {}",
            predicate.clause(),
            offset_param,
            limit
        );

        let mut statement = sqlx::query_as::<_, ApplicationSummary>(&query);
        for value in predicate.args() {
            statement = statement.bind(value);
        }
        statement = statement.bind(skip.max(0));
        if let Some(take) = take {
            statement = statement.bind(take);
        }
        let items = statement.fetch_all(&self.pool).await?;
        Ok(items)
    }

    async fn search_count(&self, filter: &ApplicationFilter) -> Result<i64> {
        let predicate = Self::predicate(filter);
        let query = format!("SELECT COUNT(*) {SEARCH_FROM} {}", predicate.clause());
        let mut statement = sqlx::query_scalar::<_, i64>(&query);
        for value in predicate.args() {
            statement = statement.bind(value);
        }
        let total = statement.fetch_one(&self.pool).await?;
        Ok(total)
    }

    async fn stage_counts(&self) -> Result<Vec<StageCount>> {
        let rows = sqlx::query_as::<_, StageCount>(
            "SELECT current_stage AS stage, COUNT(*) AS count
             FROM applications
             GROUP BY current_stage
             ORDER BY count DESC, stage ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
