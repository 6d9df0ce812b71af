use std::sync::Arc;

use sqlx::PgPool;

use crate::error::{Error, Result};
use crate::models::candidate::{Candidate, CandidateChanges, NewCandidate};
use crate::repositories::{CandidateRepository, ListFilter, PgCandidateRepository};
use crate::services::Page;

#[derive(Clone)]
pub struct CandidateService {
    candidates: Arc<dyn CandidateRepository>,
}

impl CandidateService {
    pub fn new(pool: PgPool) -> Self {
        Self::with_repository(Arc::new(PgCandidateRepository::new(pool)))
    }

    pub fn with_repository(candidates: Arc<dyn CandidateRepository>) -> Self {
        Self { candidates }
    }

    pub async fn create(&self, candidate: NewCandidate) -> Result<Candidate> {
        let created = self.candidates.insert(&candidate).await?;
        tracing::info!(candidate_id = created.id, "candidate created");
        Ok(created)
    }

    pub async fn get(&self, id: i64) -> Result<Candidate> {
        self.candidates
            .find_by_id(id)
            .await?
            .ok_or_else(|| Error::not_found("candidate", id))
    }

    pub async fn list(&self, filter: &ListFilter, skip: i64, take: i64) -> Result<Page<Candidate>> {
        let items = self.candidates.list(filter, skip, take).await?;
        let total_count = self.candidates.count(filter).await?;
        Ok(Page {
            items,
            total_count,
            skip,
            take,
        })
    }

    pub async fn update(&self, id: i64, changes: CandidateChanges) -> Result<Candidate> {
        self.candidates
            .update(id, &changes)
            .await?
            .ok_or_else(|| Error::not_found("candidate", id))
    }

    /// Removes the candidate together with its applications and their history.
    pub async fn delete(&self, id: i64) -> Result<()> {
        if !self.candidates.delete(id).await? {
            return Err(Error::not_found("candidate", id));
        }
        tracing::info!(candidate_id = id, "candidate deleted");
        Ok(())
    }
}
