#![allow(dead_code)]

use std::time::Duration;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, Response},
    Router,
};
use chrono::Utc;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::Value as JsonValue;
use sqlx::PgPool;
use tower::ServiceExt;

use hiring_pipeline_backend::{
    config::Config,
    middleware::auth::Claims,
    models::{
        candidate::{Candidate, NewCandidate},
        requisition::{NewRequisition, Requisition},
    },
    repositories::{
        CandidateRepository, PgCandidateRepository, PgRequisitionRepository,
        RequisitionRepository,
    },
    routes::app_router,
    AppState,
};

pub const TEST_SECRET: &str = "pipeline_test_secret";

pub fn test_config(enforce_stage_transitions: bool) -> Config {
    Config {
        server_address: "127.0.0.1:0".to_string(),
        database_url: String::new(),
        database_max_connections: 5,
        jwt_secret: TEST_SECRET.to_string(),
        request_timeout_secs: 30,
        enforce_stage_transitions,
        log_json: false,
    }
}

/// Router with the production middleware stack and enforced transitions.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config(true);
    let state = AppState::new(pool, &config);
    app_router(state, Duration::from_secs(config.request_timeout_secs))
}

pub fn token_for(sub: &str, role: &str) -> String {
    let claims = Claims {
        sub: sub.to_string(),
        exp: (Utc::now().timestamp() + 3600) as usize,
        role: Some(role.to_string()),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .expect("sign test token")
}

pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<JsonValue>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, token: &str, body: JsonValue) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn put_json(app: Router, uri: &str, token: &str, body: JsonValue) -> Response<Body> {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn delete(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(token), None).await
}

pub async fn body_json(response: Response<Body>) -> JsonValue {
    let bytes = to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn new_candidate(first_name: &str, last_name: &str, email: &str) -> NewCandidate {
    NewCandidate {
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        email: email.to_string(),
        phone: None,
        skills: None,
        description: None,
        status: "Applied".to_string(),
    }
}

pub fn new_requisition(title: &str, department: Option<&str>) -> NewRequisition {
    NewRequisition {
        title: title.to_string(),
        description: None,
        department: department.map(str::to_string),
        location: None,
        employment_type: None,
        priority: None,
        is_draft: false,
        status: "Open".to_string(),
    }
}

pub async fn seed_candidate(pool: &PgPool, first: &str, last: &str, email: &str) -> Candidate {
    PgCandidateRepository::new(pool.clone())
        .insert(&new_candidate(first, last, email))
        .await
        .unwrap()
}

pub async fn seed_requisition(pool: &PgPool, title: &str, department: Option<&str>) -> Requisition {
    PgRequisitionRepository::new(pool.clone())
        .insert(&new_requisition(title, department))
        .await
        .unwrap()
}

pub async fn history_row_count(pool: &PgPool) -> i64 {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM stage_histories")
        .fetch_one(pool)
        .await
        .unwrap()
}
