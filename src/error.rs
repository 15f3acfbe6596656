use std::fmt;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// Repository-level failure: a missing row is typed, everything else is the
/// underlying driver error.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("record not found")]
    NotFound,
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Storage operation in flight when a repository call failed. Used to tag
/// wrapped storage errors with context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityOp {
    Create,
    List,
    Get,
    Update,
    Delete,
}

impl EntityOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityOp::Create => "create",
            EntityOp::List => "list",
            EntityOp::Get => "get",
            EntityOp::Update => "update",
            EntityOp::Delete => "delete",
        }
    }
}

impl fmt::Display for EntityOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Application error surfaced to HTTP callers.
///
/// Every failure maps to the 400 class except authorization failures, which
/// map to 401. The response body is always the `{error, code}` envelope.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("email already exists")]
    EmailTaken,

    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("internal error: {0}")]
    Internal(#[source] anyhow::Error),

    #[error("cannot {op} {entity}: {source}")]
    Storage {
        entity: &'static str,
        op: EntityOp,
        #[source]
        source: RepoError,
    },
}

impl AppError {
    pub fn invalid_request(reason: impl Into<String>) -> Self {
        AppError::InvalidRequest(reason.into())
    }

    pub fn unauthorized(reason: impl Into<String>) -> Self {
        AppError::Unauthorized(reason.into())
    }

    pub fn storage(entity: &'static str, op: EntityOp, source: RepoError) -> Self {
        AppError::Storage { entity, op, source }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    pub fn code(&self) -> String {
        match self {
            AppError::InvalidRequest(_) => "invalid_request".into(),
            AppError::EmailTaken => "email_already_exists".into(),
            AppError::InvalidCredentials => "invalid_credentials".into(),
            AppError::Unauthorized(_) => "unauthorized".into(),
            AppError::Internal(_) => "internal_error".into(),
            AppError::Storage { entity, op, .. } => format!("cannot_{}_{}", op, entity),
        }
    }
}

/// Failure envelope returned for every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub code: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if matches!(self, AppError::Internal(_) | AppError::Storage { .. }) {
            error!(error = %self, "request failed");
        }

        let status = self.status();
        let body = ErrorBody {
            error: self.to_string(),
            code: self.code(),
        };

        (status, Json(body)).into_response()
    }
}
