use crate::feed::FeedError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use orbit_types::errors::QueryError;
use serde_json::json;
use thiserror::Error;

/// Central error type for the tracker HTTP surface
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Upstream feed error: {0}")]
    BadGateway(String),

    #[error("Internal server error")]
    InternalError(#[from] anyhow::Error),
}

impl From<QueryError> for AppError {
    fn from(err: QueryError) -> Self {
        match err {
            QueryError::NotFound { .. } => AppError::NotFound(err.to_string()),
            QueryError::EmptyDataset => AppError::ServiceUnavailable(err.to_string()),
            QueryError::InvalidParameter { .. }
            | QueryError::InvalidVector { .. }
            | QueryError::InvalidTime { .. } => AppError::BadRequest(err.to_string()),
        }
    }
}

impl From<FeedError> for AppError {
    fn from(err: FeedError) -> Self {
        AppError::BadGateway(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message, code) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg, "BAD_REQUEST"),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, "NOT_FOUND"),
            AppError::ServiceUnavailable(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                msg,
                "SERVICE_UNAVAILABLE",
            ),
            AppError::BadGateway(msg) => (StatusCode::BAD_GATEWAY, msg, "UPSTREAM_FETCH_FAILED"),
            AppError::InternalError(err) => {
                tracing::error!(error = %err, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    "INTERNAL_ERROR",
                )
            }
        };

        let body = Json(json!({
            "error": code,
            "message": error_message
        }));

        (status, body).into_response()
    }
}
