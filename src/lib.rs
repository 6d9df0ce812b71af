pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod utils;

use std::sync::Arc;

use crate::config::Config;
use crate::services::{
    application_service::{ApplicationService, TransitionPolicy},
    audit_service::AuditService,
    candidate_service::CandidateService,
    requisition_service::RequisitionService,
};
use sqlx::PgPool;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub jwt_secret: Arc<String>,
    pub application_service: ApplicationService,
    pub candidate_service: CandidateService,
    pub requisition_service: RequisitionService,
    pub audit_service: AuditService,
}

impl AppState {
    pub fn new(pool: PgPool, config: &Config) -> Self {
        let policy = TransitionPolicy::from_flag(config.enforce_stage_transitions);
        if policy == TransitionPolicy::Permissive {
            tracing::warn!("stage transition checks are disabled");
        }

        let application_service = ApplicationService::new(pool.clone(), policy);
        let candidate_service = CandidateService::new(pool.clone());
        let requisition_service = RequisitionService::new(pool.clone());
        let audit_service = AuditService::new(pool.clone());

        Self {
            pool,
            jwt_secret: Arc::new(config.jwt_secret.clone()),
            application_service,
            candidate_service,
            requisition_service,
            audit_service,
        }
    }
}
