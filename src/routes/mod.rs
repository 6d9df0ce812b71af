pub mod admin;
pub mod application;
pub mod candidate;
pub mod docs;
pub mod health;
pub mod requisition;

use std::time::Duration;

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::{
    middleware::auth::{require_admin, require_pipeline_access},
    AppState,
};

/// Builds the full HTTP surface. Shared by `main` and the integration tests.
pub fn app_router(state: AppState, request_timeout: Duration) -> Router {
    let pipeline_api = Router::new()
        .route(
            "/applications",
            get(application::search_applications).post(application::create_application),
        )
        .route("/applications/stage-counts", get(application::stage_counts))
        .route(
            "/applications/:id",
            get(application::get_application)
                .put(application::update_application)
                .delete(application::delete_application),
        )
        .route("/applications/:id/stage", post(application::move_stage))
        .route("/applications/:id/status", put(application::change_status))
        .route("/applications/:id/history", get(application::get_history))
        .route(
            "/candidates",
            get(candidate::list_candidates).post(candidate::create_candidate),
        )
        .route(
            "/candidates/:id",
            get(candidate::get_candidate)
                .put(candidate::update_candidate)
                .delete(candidate::delete_candidate),
        )
        .route(
            "/requisitions",
            get(requisition::list_requisitions).post(requisition::create_requisition),
        )
        .route(
            "/requisitions/:id",
            get(requisition::get_requisition)
                .put(requisition::update_requisition)
                .delete(requisition::delete_requisition),
        )
        .layer(from_fn_with_state(state.clone(), require_pipeline_access));

    let admin_api = Router::new()
        .route(
            "/stage-history/:id",
            get(admin::get_stage_history).put(admin::correct_stage_history),
        )
        .route("/audit-logs", get(admin::list_audit_logs))
        .layer(from_fn_with_state(state.clone(), require_admin));

    let base_routes = Router::new()
        .route("/health", get(health::health))
        .route("/api-docs/openapi.json", get(docs::openapi_json));

    // Dropping the handler future on timeout also drops any open transaction.
    base_routes
        .merge(pipeline_api)
        .merge(admin_api)
        .with_state(state)
        .layer(TimeoutLayer::new(request_timeout))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
