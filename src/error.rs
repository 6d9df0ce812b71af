use std::collections::BTreeMap;

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("{resource} {id} not found")]
    NotFound { resource: &'static str, id: i64 },

    #[error("Operation not allowed: {0}")]
    OperationNotAllowed(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(sqlx::Error),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    /// Request body, query or path that could not be deserialized.
    #[error("Malformed {location}: {message}")]
    MalformedInput {
        location: &'static str,
        message: String,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    pub fn not_found(resource: &'static str, id: i64) -> Self {
        Error::NotFound { resource, id }
    }
}

/// Flattens validator output into `field -> [messages]`.
fn field_messages(errors: &validator::ValidationErrors) -> BTreeMap<String, Vec<String>> {
    errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let messages = errs
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string())
                })
                .collect();
            (field.to_string(), messages)
        })
        .collect()
}

/// Serde names the offending field as "... field `name` ..." when it can.
fn offending_field(message: &str) -> Option<&str> {
    let start = message.find("field `")? + "field `".len();
    let len = message[start..].find('`')?;
    Some(&message[start..start + len])
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        if let Error::Validation(ref errors) = self {
            let body = Json(json!({
                "error": "validation_failed",
                "fields": field_messages(errors),
            }));
            return (StatusCode::BAD_REQUEST, body).into_response();
        }
        if let Error::MalformedInput { location, ref message } = self {
            let key = offending_field(message).unwrap_or(location);
            let body = Json(json!({
                "error": "validation_failed",
                "fields": { key: [message] },
            }));
            return (StatusCode::BAD_REQUEST, body).into_response();
        }

        let (status, error_message) = match self {
            Error::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Error::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            Error::NotFound { .. } => (StatusCode::NOT_FOUND, self.to_string()),
            Error::OperationNotAllowed(msg) => (StatusCode::FORBIDDEN, msg),
            Error::Conflict(msg) => (StatusCode::CONFLICT, msg),
            other => {
                tracing::error!(error = %other, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => Error::Internal("Expected row was not returned".to_string()),
            sqlx::Error::Database(ref db) if db.code().as_deref() == Some("23505") => {
                tracing::debug!(constraint = ?db.constraint(), detail = %db.message(), "unique violation");
                Error::Conflict(unique_violation_message(db.constraint()).to_string())
            }
            other => Error::Database(other),
        }
    }
}

fn unique_violation_message(constraint: Option<&str>) -> &'static str {
    match constraint {
        Some("candidates_email_key") => "candidate email already exists",
        _ => "record already exists",
    }
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::MissingJsonContentType(_) => {
                Error::BadRequest("expected Content-Type: application/json".to_string())
            }
            other => Error::MalformedInput {
                location: "body",
                message: other.body_text(),
            },
        }
    }
}

impl From<QueryRejection> for Error {
    fn from(rejection: QueryRejection) -> Self {
        Error::MalformedInput {
            location: "query",
            message: rejection.body_text(),
        }
    }
}

impl From<PathRejection> for Error {
    fn from(rejection: PathRejection) -> Self {
        Error::MalformedInput {
            location: "path",
            message: rejection.body_text(),
        }
    }
}
