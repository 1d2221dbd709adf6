//! HTTP error signaling.
//!
//! Handlers return [`ApiError`] values; the status code and JSON body are
//! decided here, at the boundary.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

use crate::db::DbError;
use crate::serializers::SerializerError;
use crate::validators::{self, ValidationErrors};

pub const CUSTOM_DETAIL: &str = "Custom exception has been called.";
pub const NOT_ACCEPTABLE_DETAIL: &str = "We cannot accept this because some fields are empty";

/// Error response DTO
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    #[schema(example = "Not found.")]
    pub detail: String,
}

/// Errors a handler can signal.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Generic custom condition, sent as 301.
    #[error("{detail}")]
    Custom { detail: String },

    /// Input was understood but refused, sent as 406.
    #[error("{detail}")]
    NotAcceptable { detail: String },

    #[error("Not found.")]
    NotFound,

    #[error("JSON parse error - {0}")]
    Parse(String),

    /// The body was not declared as JSON, sent as 415.
    #[error("Unsupported media type - {0}")]
    UnsupportedMediaType(String),

    #[error("Invalid input: {}", .0.summary())]
    Validation(ValidationErrors),

    #[error("A server error occurred.")]
    Internal(#[source] DbError),
}

impl ApiError {
    /// The custom condition with its stock message.
    pub fn custom() -> Self {
        ApiError::Custom {
            detail: CUSTOM_DETAIL.to_string(),
        }
    }

    pub fn not_acceptable(detail: impl Into<String>) -> Self {
        ApiError::NotAcceptable {
            detail: detail.into(),
        }
    }

    /// Refuse input, naming the failing fields.
    ///
    /// An empty error set falls back to [`NOT_ACCEPTABLE_DETAIL`].
    pub fn refuse(errors: &ValidationErrors) -> Self {
        if errors.is_empty() {
            return ApiError::not_acceptable(NOT_ACCEPTABLE_DETAIL);
        }
        ApiError::not_acceptable(format!("We cannot accept this because {}", errors.summary()))
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Custom { .. } => StatusCode::MOVED_PERMANENTLY,
            ApiError::NotAcceptable { .. } => StatusCode::NOT_ACCEPTABLE,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Parse(_) | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound { .. } => ApiError::NotFound,
            // A uniqueness race lost after validation passed
            DbError::Constraint { message } => {
                ApiError::Validation(validators::unique_violation(&message))
            }
            other => ApiError::Internal(other),
        }
    }
}

impl From<SerializerError> for ApiError {
    fn from(e: SerializerError) -> Self {
        match e {
            SerializerError::Invalid(errors) => ApiError::Validation(errors),
            SerializerError::Store(db) => db.into(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::MissingJsonContentType(_) => {
                ApiError::UnsupportedMediaType(rejection.body_text())
            }
            _ => ApiError::Parse(rejection.body_text()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        if let ApiError::Internal(source) = &self {
            tracing::error!(error = %source, "Request failed");
        }

        match self {
            ApiError::Validation(errors) => (status, Json(errors)).into_response(),
            other => (
                status,
                Json(ErrorResponse {
                    detail: other.to_string(),
                }),
            )
                .into_response(),
        }
    }
}
