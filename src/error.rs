use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;

/// Everything a student handler can fail with.
///
/// Only `NotFound` carries a structured body. Malformed input and store failures are
/// reported as a bare 500, the details only reach the log.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{message}")]
    NotFound { message: &'static str },

    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Path segment {0:?} is not a student id")]
    UnmatchedRoute(String),

    #[error("Store failure: {0:#}")]
    Store(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound { message } => {
                tracing::debug!("{}", message);
                (StatusCode::NOT_FOUND, Json(json!({ "message": message }))).into_response()
            }
            ApiError::UnmatchedRoute(segment) => {
                tracing::debug!("No route for student id {:?}", segment);
                StatusCode::NOT_FOUND.into_response()
            }
            ApiError::MalformedInput(_) | ApiError::Store(_) => {
                tracing::error!("{}", self);
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}
