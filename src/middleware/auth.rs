use axum::{
    extract::{Request, State},
    http::{Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Json, Response},
};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::AppState;

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_HR: &str = "hr";
pub const ROLE_VIEWER: &str = "viewer";

const READ_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_HR, ROLE_VIEWER];
const WRITE_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_HR];
const ADMIN_ROLES: &[&str] = &[ROLE_ADMIN];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
    pub role: Option<String>,
}

fn reject(status: StatusCode, code: &str) -> Response {
    (status, Json(json!({ "error": code }))).into_response()
}

fn decode_bearer(req: &Request, secret: &str) -> std::result::Result<Claims, Response> {
    let Some(auth_header) = req.headers().get(axum::http::header::AUTHORIZATION) else {
        return Err(reject(StatusCode::UNAUTHORIZED, "missing_authorization"));
    };
    let Ok(auth_str) = auth_header.to_str() else {
        return Err(reject(StatusCode::UNAUTHORIZED, "bad_authorization"));
    };
    let Some(token) = auth_str.strip_prefix("Bearer ") else {
        return Err(reject(StatusCode::UNAUTHORIZED, "unsupported_scheme"));
    };

    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|_| reject(StatusCode::UNAUTHORIZED, "invalid_token"))
}

async fn authorize(secret: &str, mut req: Request, next: Next, allowed: &[&str]) -> Response {
    let claims = match decode_bearer(&req, secret) {
        Ok(claims) => claims,
        Err(resp) => return resp,
    };
    let role = claims.role.clone().unwrap_or_default();
    if !allowed.iter().any(|r| r.eq_ignore_ascii_case(&role)) {
        tracing::debug!(sub = %claims.sub, role = %role, "role not permitted");
        return reject(StatusCode::FORBIDDEN, "forbidden");
    }
    req.extensions_mut().insert(claims);
    next.run(req).await
}

/// Reads are open to every pipeline role; anything else needs `admin` or `hr`.
pub async fn require_pipeline_access(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    let allowed = if matches!(*req.method(), Method::GET | Method::HEAD) {
        READ_ROLES
    } else {
        WRITE_ROLES
    };
    authorize(&state.jwt_secret, req, next, allowed).await
}

pub async fn require_admin(State(state): State<AppState>, req: Request, next: Next) -> Response {
    authorize(&state.jwt_secret, req, next, ADMIN_ROLES).await
}
