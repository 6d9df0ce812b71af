use std::sync::Arc;

use chrono::Utc;
use sqlx::PgPool;

use crate::error::{Error, Result};
use crate::models::application::{
    Application, ApplicationFilter, ApplicationSummary, NewApplication, StageCount, StageMove,
    StageMoveOutcome,
};
use crate::models::stage::{Stage, INITIAL_STAGE};
use crate::models::stage_history::{StageHistory, StageHistoryCorrection};
use crate::repositories::{
    ApplicationRepository, CandidateRepository, PgApplicationRepository, PgCandidateRepository,
    PgRequisitionRepository, PgStageHistoryRepository, RequisitionRepository,
    StageHistoryRepository,
};
use crate::services::Page;

/// Whether stage moves are checked against the transition table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionPolicy {
    Enforced,
    /// Any non-empty stage name is accepted from any stage.
    Permissive,
}

impl TransitionPolicy {
    pub fn from_flag(enforce: bool) -> Self {
        if enforce {
            TransitionPolicy::Enforced
        } else {
            TransitionPolicy::Permissive
        }
    }
}

#[derive(Clone)]
pub struct ApplicationService {
    applications: Arc<dyn ApplicationRepository>,
    candidates: Arc<dyn CandidateRepository>,
    requisitions: Arc<dyn RequisitionRepository>,
    history: Arc<dyn StageHistoryRepository>,
    policy: TransitionPolicy,
}

impl ApplicationService {
    pub fn new(pool: PgPool, policy: TransitionPolicy) -> Self {
        Self::with_repositories(
            Arc::new(PgApplicationRepository::new(pool.clone())),
            Arc::new(PgCandidateRepository::new(pool.clone())),
            Arc::new(PgRequisitionRepository::new(pool.clone())),
            Arc::new(PgStageHistoryRepository::new(pool)),
            policy,
        )
    }

    pub fn with_repositories(
        applications: Arc<dyn ApplicationRepository>,
        candidates: Arc<dyn CandidateRepository>,
        requisitions: Arc<dyn RequisitionRepository>,
        history: Arc<dyn StageHistoryRepository>,
        policy: TransitionPolicy,
    ) -> Self {
        Self {
            applications,
            candidates,
            requisitions,
            history,
            policy,
        }
    }

    pub fn policy(&self) -> TransitionPolicy {
        self.policy
    }

    /// Creates an application in its initial stage. No history row is written;
    /// history starts with the first stage move.
    pub async fn create(
        &self,
        candidate_id: i64,
        requisition_id: i64,
        initial_stage: Option<String>,
        initial_status: Option<String>,
    ) -> Result<Application> {
        if !self.candidates.exists(candidate_id).await? {
            return Err(Error::not_found("candidate", candidate_id));
        }
        if !self.requisitions.exists(requisition_id).await? {
            return Err(Error::not_found("requisition", requisition_id));
        }

        let current_stage = match initial_stage.as_deref().map(str::trim) {
            None | Some("") => INITIAL_STAGE.as_str().to_string(),
            Some(stage) => self.canonical_stage(stage)?,
        };

        let application = self
            .applications
            .insert(&NewApplication {
                candidate_id,
                requisition_id,
                current_stage,
                status: initial_status,
                created_at: Utc::now(),
            })
            .await?;

        tracing::info!(
            application_id = application.id,
            candidate_id,
            requisition_id,
            stage = %application.current_stage,
            "application created"
        );
        Ok(application)
    }

    pub async fn get(&self, id: i64) -> Result<Application> {
        self.applications
            .find_by_id(id)
            .await?
            .ok_or_else(|| Error::not_found("application", id))
    }

    pub async fn move_to_stage(
        &self,
        id: i64,
        new_stage: &str,
        moved_by: &str,
        expected_version: Option<i32>,
    ) -> Result<StageMoveOutcome> {
        let application = self.get(id).await?;
        check_version(&application, expected_version)?;
        self.apply_stage_move(&application, new_stage, moved_by, None)
            .await
    }

    pub async fn change_status(
        &self,
        id: i64,
        new_status: &str,
        expected_version: Option<i32>,
    ) -> Result<Application> {
        let application = self.get(id).await?;
        check_version(&application, expected_version)?;
        self.apply_status(&application, new_status).await
    }

    /// Partial update. A stage change goes through the stage-move path so it
    /// is recorded in history, and any status is written in that same
    /// transaction.
    pub async fn update(
        &self,
        id: i64,
        current_stage: Option<String>,
        status: Option<String>,
        expected_version: Option<i32>,
        actor: &str,
    ) -> Result<Application> {
        let application = self.get(id).await?;
        check_version(&application, expected_version)?;

        let stage_change = match current_stage {
            Some(stage) if self.canonical_stage(&stage)? != application.current_stage => {
                Some(stage)
            }
            _ => None,
        };

        match (stage_change, status) {
            (Some(stage), status) => Ok(self
                .apply_stage_move(&application, &stage, actor, status.as_deref())
                .await?
                .application),
            (None, Some(status)) => self.apply_status(&application, &status).await,
            (None, None) => Ok(application),
        }
    }

    /// Stage history for an application, newest first.
    pub async fn history(&self, id: i64) -> Result<Vec<StageHistory>> {
        if !self.applications.exists(id).await? {
            return Err(Error::not_found("application", id));
        }
        self.history.list_for_application(id).await
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        if !self.applications.delete(id).await? {
            return Err(Error::not_found("application", id));
        }
        tracing::info!(application_id = id, "application deleted");
        Ok(())
    }

    pub async fn search(
        &self,
        filter: &ApplicationFilter,
        skip: i64,
        take: i64,
    ) -> Result<Page<ApplicationSummary>> {
        let items = self.applications.search(filter, skip, Some(take)).await?;
        let total_count = self.applications.search_count(filter).await?;
        Ok(Page {
            items,
            total_count,
            skip,
            take,
        })
    }

    pub async fn search_count(&self, filter: &ApplicationFilter) -> Result<i64> {
        self.applications.search_count(filter).await
    }

    pub async fn stage_counts(&self) -> Result<Vec<StageCount>> {
        self.applications.stage_counts().await
    }

    pub async fn get_history_entry(&self, id: i64) -> Result<StageHistory> {
        self.history
            .find_by_id(id)
            .await?
            .ok_or_else(|| Error::not_found("stage history", id))
    }

    /// Administrative data correction. Leaves the owning application untouched.
    pub async fn correct_history_entry(
        &self,
        id: i64,
        correction: &StageHistoryCorrection,
    ) -> Result<StageHistory> {
        let entry = self
            .history
            .correct(id, correction)
            .await?
            .ok_or_else(|| Error::not_found("stage history", id))?;
        tracing::warn!(history_id = id, application_id = entry.application_id, "stage history corrected");
        Ok(entry)
    }

    async fn apply_stage_move(
        &self,
        application: &Application,
        new_stage: &str,
        moved_by: &str,
        status: Option<&str>,
    ) -> Result<StageMoveOutcome> {
        let moved_by = moved_by.trim();
        if moved_by.is_empty() {
            return Err(Error::BadRequest("movedBy must not be empty".to_string()));
        }
        let to_stage = self.check_transition(&application.current_stage, new_stage)?;

        let outcome = self
            .applications
            .record_stage_move(&StageMove {
                application_id: application.id,
                from_stage: application.current_stage.clone(),
                to_stage,
                moved_by: moved_by.to_string(),
                moved_at: Utc::now(),
                expected_version: application.version,
                status: status.map(str::to_string),
            })
            .await?;

        tracing::info!(
            application_id = application.id,
            from = %application.current_stage,
            to = %outcome.application.current_stage,
            moved_by,
            "application stage moved"
        );
        Ok(outcome)
    }

    async fn apply_status(&self, application: &Application, new_status: &str) -> Result<Application> {
        let updated = self
            .applications
            .update_status(application.id, new_status, application.version, Utc::now())
            .await?;
        tracing::info!(
            application_id = application.id,
            status = new_status,
            "application status changed"
        );
        Ok(updated)
    }

    /// Returns the stage name to store for a move from `current` to `requested`.
    fn check_transition(&self, current: &str, requested: &str) -> Result<String> {
        let to_stage = self.canonical_stage(requested)?;
        if self.policy == TransitionPolicy::Permissive {
            return Ok(to_stage);
        }

        let (Ok(from), Ok(to)) = (current.parse::<Stage>(), to_stage.parse::<Stage>()) else {
            return Err(Error::OperationNotAllowed(format!(
                "application is in unrecognised stage '{}'",
                current
            )));
        };
        if from.is_terminal() {
            return Err(Error::OperationNotAllowed(format!(
                "application is in terminal stage '{}'",
                from
            )));
        }
        if !from.can_move_to(to) {
            return Err(Error::OperationNotAllowed(format!(
                "cannot move from '{}' to '{}'",
                from, to
            )));
        }
        Ok(to_stage)
    }

    fn canonical_stage(&self, requested: &str) -> Result<String> {
        let requested = requested.trim();
        if requested.is_empty() {
            return Err(Error::BadRequest("stage must not be empty".to_string()));
        }
        match self.policy {
            TransitionPolicy::Permissive => Ok(requested.to_string()),
            TransitionPolicy::Enforced => requested
                .parse::<Stage>()
                .map(|stage| stage.as_str().to_string())
                .map_err(|e| Error::BadRequest(e.to_string())),
        }
    }
}

fn check_version(application: &Application, expected_version: Option<i32>) -> Result<()> {
    match expected_version {
        Some(expected) if expected != application.version => Err(Error::Conflict(format!(
            "application {} is at version {}, not {}",
            application.id, application.version, expected
        ))),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::application_repository::MockApplicationRepository;
    use crate::repositories::candidate_repository::MockCandidateRepository;
    use crate::repositories::requisition_repository::MockRequisitionRepository;
    use crate::repositories::stage_history_repository::MockStageHistoryRepository;
    use mockall::predicate::eq;

    struct Mocks {
        applications: MockApplicationRepository,
        candidates: MockCandidateRepository,
        requisitions: MockRequisitionRepository,
        history: MockStageHistoryRepository,
    }

    impl Mocks {
        fn new() -> Self {
            Self {
                applications: MockApplicationRepository::new(),
                candidates: MockCandidateRepository::new(),
                requisitions: MockRequisitionRepository::new(),
                history: MockStageHistoryRepository::new(),
            }
        }

        fn service(self, policy: TransitionPolicy) -> ApplicationService {
            ApplicationService::with_repositories(
                Arc::new(self.applications),
                Arc::new(self.candidates),
                Arc::new(self.requisitions),
                Arc::new(self.history),
                policy,
            )
        }
    }

    fn application(id: i64, stage: &str, version: i32) -> Application {
        let now = Utc::now();
        Application {
            id,
            candidate_id: 1,
            requisition_id: 1,
            current_stage: stage.to_string(),
            status: None,
            version,
            created_at: now,
            updated_at: now,
        }
    }

    fn outcome_for(stage_move: &StageMove) -> StageMoveOutcome {
        let mut moved = application(stage_move.application_id, &stage_move.to_stage, 0);
        moved.version = stage_move.expected_version + 1;
        moved.updated_at = stage_move.moved_at;
        moved.status = stage_move.status.clone();
        StageMoveOutcome {
            application: moved,
            history: StageHistory {
                id: 1,
                application_id: stage_move.application_id,
                from_stage: Some(stage_move.from_stage.clone()),
                to_stage: stage_move.to_stage.clone(),
                moved_by: stage_move.moved_by.clone(),
                moved_at: stage_move.moved_at,
            },
        }
    }

    #[tokio::test]
    async fn create_defaults_to_applied_without_history() {
        let mut mocks = Mocks::new();
        mocks.candidates.expect_exists().with(eq(1)).returning(|_| Ok(true));
        mocks.requisitions.expect_exists().with(eq(2)).returning(|_| Ok(true));
        mocks
            .applications
            .expect_insert()
            .withf(|new| new.current_stage == "Applied" && new.status.is_none())
            .times(1)
            .returning(|new| {
                let mut app = application(10, &new.current_stage, 1);
                app.candidate_id = new.candidate_id;
                app.requisition_id = new.requisition_id;
                Ok(app)
            });
        // No expectation on record_stage_move: creating must not write history.

        let service = mocks.service(TransitionPolicy::Enforced);
        let app = service.create(1, 2, None, None).await.unwrap();
        assert_eq!(app.current_stage, "Applied");
        assert_eq!(app.status, None);
        assert_eq!((app.candidate_id, app.requisition_id), (1, 2));
    }

    #[tokio::test]
    async fn create_with_missing_candidate_writes_nothing() {
        let mut mocks = Mocks::new();
        mocks.candidates.expect_exists().returning(|_| Ok(false));
        mocks.applications.expect_insert().times(0);

        let service = mocks.service(TransitionPolicy::Enforced);
        let err = service.create(5, 2, None, None).await.unwrap_err();
        assert!(matches!(err, Error::NotFound { resource: "candidate", id: 5 }));
    }

    #[tokio::test]
    async fn create_with_missing_requisition_writes_nothing() {
        let mut mocks = Mocks::new();
        mocks.candidates.expect_exists().returning(|_| Ok(true));
        mocks.requisitions.expect_exists().returning(|_| Ok(false));
        mocks.applications.expect_insert().times(0);

        let service = mocks.service(TransitionPolicy::Enforced);
        let err = service.create(1, 8, None, None).await.unwrap_err();
        assert!(matches!(err, Error::NotFound { resource: "requisition", id: 8 }));
    }

    #[tokio::test]
    async fn create_canonicalises_supplied_stage() {
        let mut mocks = Mocks::new();
        mocks.candidates.expect_exists().returning(|_| Ok(true));
        mocks.requisitions.expect_exists().returning(|_| Ok(true));
        mocks
            .applications
            .expect_insert()
            .withf(|new| new.current_stage == "Phone Screen" && new.status.as_deref() == Some("Active"))
            .returning(|new| Ok(application(3, &new.current_stage, 1)));

        let service = mocks.service(TransitionPolicy::Enforced);
        let app = service
            .create(1, 1, Some("phone screen".into()), Some("Active".into()))
            .await
            .unwrap();
        assert_eq!(app.current_stage, "Phone Screen");
    }

    #[tokio::test]
    async fn move_records_previous_stage_and_actor() {
        let mut mocks = Mocks::new();
        mocks
            .applications
            .expect_find_by_id()
            .with(eq(7))
            .returning(|_| Ok(Some(application(7, "Applied", 1))));
        mocks
            .applications
            .expect_record_stage_move()
            .withf(|m| {
                m.application_id == 7
                    && m.from_stage == "Applied"
                    && m.to_stage == "Phone Screen"
                    && m.moved_by == "alice"
                    && m.expected_version == 1
            })
            .times(1)
            .returning(|m| Ok(outcome_for(m)));

        let service = mocks.service(TransitionPolicy::Enforced);
        let outcome = service
            .move_to_stage(7, "Phone Screen", "alice", None)
            .await
            .unwrap();
        assert_eq!(outcome.application.current_stage, "Phone Screen");
        assert_eq!(outcome.history.from_stage.as_deref(), Some("Applied"));
        assert_eq!(outcome.history.to_stage, "Phone Screen");
        assert_eq!(outcome.history.moved_by, "alice");
    }

    #[tokio::test]
    async fn move_on_missing_application_is_not_found() {
        let mut mocks = Mocks::new();
        mocks.applications.expect_find_by_id().returning(|_| Ok(None));
        mocks.applications.expect_record_stage_move().times(0);

        let service = mocks.service(TransitionPolicy::Enforced);
        let err = service.move_to_stage(999, "Offer", "bob", None).await.unwrap_err();
        assert!(matches!(err, Error::NotFound { resource: "application", id: 999 }));
    }

    #[tokio::test]
    async fn move_outside_transition_table_is_not_allowed() {
        let mut mocks = Mocks::new();
        mocks
            .applications
            .expect_find_by_id()
            .returning(|_| Ok(Some(application(7, "Applied", 1))));
        mocks.applications.expect_record_stage_move().times(0);

        let service = mocks.service(TransitionPolicy::Enforced);
        let err = service.move_to_stage(7, "Hired", "alice", None).await.unwrap_err();
        assert!(matches!(err, Error::OperationNotAllowed(_)));
    }

    #[tokio::test]
    async fn terminal_applications_cannot_move() {
        let mut mocks = Mocks::new();
        mocks
            .applications
            .expect_find_by_id()
            .returning(|_| Ok(Some(application(7, "Rejected", 4))));
        mocks.applications.expect_record_stage_move().times(0);

        let service = mocks.service(TransitionPolicy::Enforced);
        let err = service.move_to_stage(7, "Offer", "alice", None).await.unwrap_err();
        match err {
            Error::OperationNotAllowed(msg) => assert!(msg.contains("terminal")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn unknown_stage_names_are_rejected_when_enforced() {
        let mut mocks = Mocks::new();
        mocks
            .applications
            .expect_find_by_id()
            .returning(|_| Ok(Some(application(7, "Applied", 1))));

        let service = mocks.service(TransitionPolicy::Enforced);
        let err = service
            .move_to_stage(7, "Coffee Chat", "alice", None)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::BadRequest(_)));
    }

    #[tokio::test]
    async fn permissive_policy_accepts_any_stage_name() {
        let mut mocks = Mocks::new();
        mocks
            .applications
            .expect_find_by_id()
            .returning(|_| Ok(Some(application(7, "Hired", 2))));
        mocks
            .applications
            .expect_record_stage_move()
            .withf(|m| m.from_stage == "Hired" && m.to_stage == "Coffee Chat")
            .returning(|m| Ok(outcome_for(m)));

        let service = mocks.service(TransitionPolicy::Permissive);
        let outcome = service
            .move_to_stage(7, "Coffee Chat", "alice", None)
            .await
            .unwrap();
        assert_eq!(outcome.application.current_stage, "Coffee Chat");
    }

    #[tokio::test]
    async fn stale_expected_version_is_a_conflict() {
        let mut mocks = Mocks::new();
        mocks
            .applications
            .expect_find_by_id()
            .returning(|_| Ok(Some(application(7, "Applied", 3))));
        mocks.applications.expect_record_stage_move().times(0);

        let service = mocks.service(TransitionPolicy::Enforced);
        let err = service
            .move_to_stage(7, "Phone Screen", "alice", Some(2))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Conflict(_)));
    }

    #[tokio::test]
    async fn concurrent_write_surfaces_store_conflict() {
        let mut mocks = Mocks::new();
        mocks
            .applications
            .expect_find_by_id()
            .returning(|_| Ok(Some(application(7, "Applied", 1))));
        mocks
            .applications
            .expect_record_stage_move()
            .returning(|_| Err(Error::Conflict("modified concurrently".into())));

        let service = mocks.service(TransitionPolicy::Enforced);
        let err = service
            .move_to_stage(7, "Phone Screen", "alice", None)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Conflict(_)));
    }

    #[tokio::test]
    async fn blank_actor_is_rejected() {
        let mut mocks = Mocks::new();
        mocks
            .applications
            .expect_find_by_id()
            .returning(|_| Ok(Some(application(7, "Applied", 1))));

        let service = mocks.service(TransitionPolicy::Enforced);
        let err = service
            .move_to_stage(7, "Phone Screen", "  ", None)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::BadRequest(_)));
    }

    #[tokio::test]
    async fn status_change_uses_read_version_and_skips_history() {
        let mut mocks = Mocks::new();
        mocks
            .applications
            .expect_find_by_id()
            .returning(|_| Ok(Some(application(7, "Offer", 5))));
        mocks
            .applications
            .expect_update_status()
            .withf(|id, status, version, _| *id == 7 && status == "On Hold" && *version == 5)
            .times(1)
            .returning(|id, status, version, _| {
                let mut app = application(id, "Offer", version + 1);
                app.status = Some(status.to_string());
                Ok(app)
            });
        mocks.applications.expect_record_stage_move().times(0);

        let service = mocks.service(TransitionPolicy::Enforced);
        let app = service.change_status(7, "On Hold", None).await.unwrap();
        assert_eq!(app.status.as_deref(), Some("On Hold"));
        assert_eq!(app.version, 6);
        assert_eq!(app.current_stage, "Offer");
    }

    #[tokio::test]
    async fn update_routes_stage_change_through_history() {
        let mut mocks = Mocks::new();
        mocks
            .applications
            .expect_find_by_id()
            .returning(|_| Ok(Some(application(7, "Applied", 1))));
        mocks
            .applications
            .expect_record_stage_move()
            .withf(|m| {
                m.moved_by == "recruiter-1"
                    && m.to_stage == "Technical Interview"
                    && m.status.as_deref() == Some("Active")
                    && m.expected_version == 1
            })
            .times(1)
            .returning(|m| Ok(outcome_for(m)));
        mocks.applications.expect_update_status().times(0);

        let service = mocks.service(TransitionPolicy::Enforced);
        let app = service
            .update(
                7,
                Some("Technical Interview".into()),
                Some("Active".into()),
                Some(1),
                "recruiter-1",
            )
            .await
            .unwrap();
        assert_eq!(app.current_stage, "Technical Interview");
        assert_eq!(app.status.as_deref(), Some("Active"));
        assert_eq!(app.version, 2);
    }

    #[tokio::test]
    async fn update_with_status_only_skips_history() {
        let mut mocks = Mocks::new();
        mocks
            .applications
            .expect_find_by_id()
            .returning(|_| Ok(Some(application(7, "Applied", 1))));
        mocks.applications.expect_record_stage_move().times(0);
        mocks
            .applications
            .expect_update_status()
            .withf(|_, status, version, _| status == "Active" && *version == 1)
            .times(1)
            .returning(|id, status, version, _| {
                let mut app = application(id, "Applied", version + 1);
                app.status = Some(status.to_string());
                Ok(app)
            });

        let service = mocks.service(TransitionPolicy::Enforced);
        let app = service
            .update(7, Some("Applied".into()), Some("Active".into()), None, "recruiter-1")
            .await
            .unwrap();
        assert_eq!(app.status.as_deref(), Some("Active"));
    }

    #[tokio::test]
    async fn permissive_update_treats_case_change_as_a_move() {
        let mut mocks = Mocks::new();
        mocks
            .applications
            .expect_find_by_id()
            .returning(|_| Ok(Some(application(7, "Applied", 1))));
        mocks
            .applications
            .expect_record_stage_move()
            .withf(|m| m.from_stage == "Applied" && m.to_stage == "applied")
            .times(1)
            .returning(|m| Ok(outcome_for(m)));

        let service = mocks.service(TransitionPolicy::Permissive);
        let app = service
            .update(7, Some("applied".into()), None, None, "recruiter-1")
            .await
            .unwrap();
        assert_eq!(app.current_stage, "applied");
    }

    #[tokio::test]
    async fn update_with_unchanged_stage_does_not_move() {
        let mut mocks = Mocks::new();
        mocks
            .applications
            .expect_find_by_id()
            .returning(|_| Ok(Some(application(7, "Applied", 1))));
        mocks.applications.expect_record_stage_move().times(0);
        mocks.applications.expect_update_status().times(0);

        let service = mocks.service(TransitionPolicy::Enforced);
        let app = service
            .update(7, Some("applied".into()), None, None, "recruiter-1")
            .await
            .unwrap();
        assert_eq!(app.version, 1);
    }

    #[tokio::test]
    async fn history_of_missing_application_is_not_found() {
        let mut mocks = Mocks::new();
        mocks.applications.expect_exists().returning(|_| Ok(false));
        mocks.history.expect_list_for_application().times(0);

        let service = mocks.service(TransitionPolicy::Enforced);
        let err = service.history(42).await.unwrap_err();
        assert!(matches!(err, Error::NotFound { resource: "application", id: 42 }));
    }

    #[tokio::test]
    async fn history_without_moves_is_empty() {
        let mut mocks = Mocks::new();
        mocks.applications.expect_exists().returning(|_| Ok(true));
        mocks
            .history
            .expect_list_for_application()
            .with(eq(3))
            .returning(|_| Ok(Vec::new()));

        let service = mocks.service(TransitionPolicy::Enforced);
        assert!(service.history(3).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_missing_application_is_not_found() {
        let mut mocks = Mocks::new();
        mocks.applications.expect_delete().returning(|_| Ok(false));

        let service = mocks.service(TransitionPolicy::Enforced);
        let err = service.delete(11).await.unwrap_err();
        assert!(matches!(err, Error::NotFound { resource: "application", id: 11 }));
    }

    #[tokio::test]
    async fn search_pairs_page_with_count_for_same_filter() {
        let filter = ApplicationFilter {
            search_term: Some("john".into()),
            ..Default::default()
        };
        let mut mocks = Mocks::new();
        let expected = filter.clone();
        mocks
            .applications
            .expect_search()
            .withf(move |f, skip, take| *f == expected && *skip == 10 && *take == Some(10))
            .returning(|_, _, _| Ok(Vec::new()));
        let expected = filter.clone();
        mocks
            .applications
            .expect_search_count()
            .withf(move |f| *f == expected)
            .returning(|_| Ok(12));

        let service = mocks.service(TransitionPolicy::Enforced);
        let page = service.search(&filter, 10, 10).await.unwrap();
        assert_eq!(page.total_count, 12);
        assert_eq!((page.skip, page.take), (10, 10));
    }

    #[tokio::test]
    async fn correcting_missing_history_entry_is_not_found() {
        let mut mocks = Mocks::new();
        mocks.history.expect_correct().returning(|_, _| Ok(None));

        let service = mocks.service(TransitionPolicy::Enforced);
        let err = service
            .correct_history_entry(5, &StageHistoryCorrection::default())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotFound { resource: "stage history", id: 5 }));
    }
}
