use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::Result;
use crate::models::candidate::{Candidate, CandidateChanges, NewCandidate};
use crate::repositories::{ListFilter, WhereBuilder};

const CANDIDATE_COLUMNS: &str = "id, first_name, last_name, email, phone, skills, description, \
    status, created_at, updated_at";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CandidateRepository: Send + Sync {
    async fn exists(&self, id: i64) -> Result<bool>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Candidate>>;
    async fn insert(&self, candidate: &NewCandidate) -> Result<Candidate>;
    async fn update(&self, id: i64, changes: &CandidateChanges) -> Result<Option<Candidate>>;
    async fn delete(&self, id: i64) -> Result<bool>;
    async fn list(&self, filter: &ListFilter, skip: i64, take: i64) -> Result<Vec<Candidate>>;
    async fn count(&self, filter: &ListFilter) -> Result<i64>;
}

#[derive(Clone)]
pub struct PgCandidateRepository {
    pool: PgPool,
}

impl PgCandidateRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn predicate(filter: &ListFilter) -> WhereBuilder {
        let mut builder = WhereBuilder::default();
        builder
            .contains_any(
                &["first_name", "last_name", "email"],
                filter.search_term.as_deref(),
            )
            .eq("status", filter.status.as_deref());
        builder
    }
}

#[async_trait]
impl CandidateRepository for PgCandidateRepository {
    async fn exists(&self, id: i64) -> Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM candidates WHERE id = $1)",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Candidate>> {
        let query = format!("SELECT {CANDIDATE_COLUMNS} FROM candidates WHERE id = $1");
        let candidate = sqlx::query_as::<_, Candidate>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(candidate)
    }

    async fn insert(&self, candidate: &NewCandidate) -> Result<Candidate> {
        let query = format!(
            "INSERT INTO candidates
                (first_name, last_name, email, phone, skills, description, status)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {CANDIDATE_COLUMNS}"
        );
        let row = sqlx::query_as::<_, Candidate>(&query)
            .bind(&candidate.first_name)
            .bind(&candidate.last_name)
            .bind(&candidate.email)
            .bind(&candidate.phone)
            .bind(&candidate.skills)
            .bind(&candidate.description)
            .bind(&candidate.status)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn update(&self, id: i64, changes: &CandidateChanges) -> Result<Option<Candidate>> {
        let query = format!(
            "UPDATE candidates
             SET
                first_name = COALESCE($2, first_name),
                last_name = COALESCE($3, last_name),
                email = COALESCE($4, email),
                phone = COALESCE($5, phone),
                skills = COALESCE($6, skills),
                description = COALESCE($7, description),
                status = COALESCE($8, status),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {CANDIDATE_COLUMNS}"
        );
        let row = sqlx::query_as::<_, Candidate>(&query)
            .bind(id)
            .bind(&changes.first_name)
            .bind(&changes.last_name)
            .bind(&changes.email)
            .bind(&changes.phone)
            .bind(&changes.skills)
            .bind(&changes.description)
            .bind(&changes.status)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let res = sqlx::query("DELETE FROM candidates WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn list(&self, filter: &ListFilter, skip: i64, take: i64) -> Result<Vec<Candidate>> {
        let predicate = Self::predicate(filter);
        let query = format!(
            "SELECT {CANDIDATE_COLUMNS} FROM candidates
             {}
             ORDER BY created_at DESC, id DESC
             LIMIT ${} OFFSET ${}",
            predicate.clause(),
            predicate.next_param(),
            predicate.next_param() + 1
        );
        let mut statement = sqlx::query_as::<_, Candidate>(&query);
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
        let query = format!("SELECT COUNT(*) FROM candidates {}", predicate.clause());
        let mut statement = sqlx::query_scalar::<_, i64>(&query);
        for value in predicate.args() {
            statement = statement.bind(value);
        }
        let total = statement.fetch_one(&self.pool).await?;
        Ok(total)
    }
}
