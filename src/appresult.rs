use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{store::StoreError, validate::Violation};

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("participant already exists")]
    Conflict,

    #[error("not found")]
    NotFound,

    #[error("not the sender of this message")]
    Forbidden,

    #[error("unprocessable: {} violation(s)", .0.len())]
    Unprocessable(Vec<Violation>),

    #[error("store unavailable: {0}")]
    StoreUnavailable(#[from] StoreError),
}

impl AppError {
    pub fn unprocessable(field: &str, reason: impl Into<String>) -> Self {
        Self::Unprocessable(vec![Violation::new(field, reason)])
    }
}

impl From<Vec<Violation>> for AppError {
    fn from(violations: Vec<Violation>) -> Self {
        Self::Unprocessable(violations)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        use AppError::*;
        match self {
            Conflict => StatusCode::CONFLICT.into_response(),
            NotFound => StatusCode::NOT_FOUND.into_response(),
            // ownership mismatches have always been answered with 401
            Forbidden => StatusCode::UNAUTHORIZED.into_response(),
            Unprocessable(violations) => (StatusCode::UNPROCESSABLE_ENTITY, Json(violations)).into_response(),
            StoreUnavailable(err) => {
                tracing::error!(error = %err, "store unavailable");
                (StatusCode::INTERNAL_SERVER_ERROR, "store unavailable").into_response()
            }
        }
    }
}
