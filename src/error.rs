use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Failures raised by the analysis core.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    /// The interval sequence violates the input contract.
    #[error("malformed input at interval {index}: {reason}")]
    MalformedInput { index: usize, reason: &'static str },

    /// Signal series that must be index-aligned have different lengths.
    #[error("series length mismatch: {name} has {actual} elements, expected {expected}")]
    LengthMismatch {
        name: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A moving-average window of zero.
    #[error("invalid window {window}: {reason}")]
    InvalidWindow { window: usize, reason: &'static str },

    /// Not enough preceding intervals to classify the local trend.
    #[error("insufficient history at index {index}: need at least {required} intervals before it")]
    InsufficientHistory { index: usize, required: usize },
}

/// Application error types.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("External API error: {0}")]
    ExternalApi(String),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),

    #[error(transparent)]
    SerdeJson(#[from] serde_json::Error),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl AppError {
    /// Copy of this error for another caller waiting on the same failure.
    /// Wrapped library errors keep their status and become their message.
    pub fn duplicate(&self) -> AppError {
        match self {
            AppError::NotFound(msg) => AppError::NotFound(msg.clone()),
            AppError::BadRequest(msg) => AppError::BadRequest(msg.clone()),
            AppError::Internal(msg) => AppError::Internal(msg.clone()),
            AppError::ExternalApi(msg) => AppError::ExternalApi(msg.clone()),
            AppError::Analysis(e) => AppError::Analysis(e.clone()),
            AppError::Io(e) => AppError::Internal(e.to_string()),
            AppError::Reqwest(e) => AppError::ExternalApi(e.to_string()),
            AppError::SerdeJson(e) => AppError::BadRequest(e.to_string()),
            AppError::Anyhow(e) => AppError::Internal(e.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
            AppError::ExternalApi(msg) => (StatusCode::BAD_GATEWAY, msg.clone()),
            AppError::Analysis(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            AppError::Io(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            AppError::Reqwest(e) => (StatusCode::BAD_GATEWAY, e.to_string()),
            AppError::SerdeJson(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            AppError::Anyhow(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
        };

        let body = Json(json!({
            "error": message,
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
