//! Error types for Bookshelf server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::models::method::Method;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Method parameter is required")]
    MissingMethod,

    #[error("Unknown method: {0}")]
    UnknownMethod(String),

    #[error("{0}")]
    MissingParam(String),

    #[error("{0}")]
    InvalidFormat(String),

    #[error("Book with ID {0} not found")]
    NotFound(i64),

    #[error("Book '{0}' is already borrowed")]
    AlreadyBorrowed(String),

    #[error("Book '{0}' is already available")]
    AlreadyAvailable(String),

    #[error("Rating must be between 1.0 and 5.0")]
    RatingOutOfRange,

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Request body is required")]
    MissingBody,

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::Internal(e.to_string())
    }
}

/// Error response body
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    /// Valid method names, sent when `method` is missing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_methods: Option<Vec<String>>,
    /// Cause of an internal error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn internal(details: impl Into<String>) -> Self {
        Self {
            error: "Internal server error".to_string(),
            available_methods: None,
            details: Some(details.into()),
        }
    }
}

impl From<&AppError> for ErrorResponse {
    fn from(err: &AppError) -> Self {
        match err {
            AppError::MissingMethod => ErrorResponse {
                error: err.to_string(),
                available_methods: Some(
                    Method::ALL.iter().map(|m| m.as_str().to_string()).collect(),
                ),
                details: None,
            },
            AppError::Internal(details) => ErrorResponse::internal(details.clone()),
            _ => ErrorResponse {
                error: err.to_string(),
                available_methods: None,
                details: None,
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            AppError::Internal(msg) => tracing::error!("Internal error: {}", msg),
            _ => tracing::debug!("Request rejected: {}", self),
        }

        (status, Json(ErrorResponse::from(&self))).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
