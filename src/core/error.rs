//! Typed errors and their transport rendering
//!
//! Every failure in the service is a value of one of these types. Nothing
//! below the resource controller decides an HTTP status: validation
//! failures, missing entities and storage faults travel upward as ordinary
//! `Result` values, and the conversion to a response happens exactly once,
//! in the [`IntoResponse`] implementation for [`ApiError`].

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::fmt;
use uuid::Uuid;

/// A single per-field validation message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Accumulated field-keyed validation errors.
///
/// Serializers and schemas return this as a recoverable value; it only
/// becomes a 400 response once wrapped in [`ApiError::Validation`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationFailure {
    pub errors: Vec<FieldError>,
}

impl ValidationFailure {
    pub fn new() -> Self {
        Self::default()
    }

    /// A failure carrying exactly one field error.
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut failure = Self::new();
        failure.push(field, message);
        failure
    }

    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(FieldError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// `Ok(value)` when no errors were recorded, `Err(self)` otherwise.
    pub fn into_result<T>(self, value: T) -> Result<T, ValidationFailure> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();
        write!(f, "validation failed: {}", messages.join(", "))
    }
}

/// Storage collaborator failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage lock poisoned: {0}")]
    LockPoisoned(String),
}

/// Configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}'")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config")]
    Parse(#[from] serde_yaml::Error),
}

/// The request-level error type.
///
/// Each variant maps to one transport outcome; see
/// [`status_code`](ApiError::status_code) and
/// [`error_code`](ApiError::error_code).
#[derive(Debug)]
pub enum ApiError {
    /// Input was rejected; carries field-keyed messages for the caller.
    Validation(ValidationFailure),

    /// No entity of the kind exists under the given identifier.
    NotFound { kind: &'static str, id: Uuid },

    /// The request body was not usable as an entity payload.
    InvalidBody { message: String },

    /// The storage collaborator failed.
    Storage(StoreError),

    /// Rendering or another internal step failed unexpectedly.
    Internal(String),
}

impl ApiError {
    pub fn not_found(kind: &'static str, id: Uuid) -> Self {
        ApiError::NotFound { kind, id }
    }

    pub fn invalid_body(message: impl Into<String>) -> Self {
        ApiError::InvalidBody {
            message: message.into(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::InvalidBody { .. } => StatusCode::BAD_REQUEST,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "VALIDATION_FAILED",
            ApiError::NotFound { .. } => "NOT_FOUND",
            ApiError::InvalidBody { .. } => "INVALID_BODY",
            ApiError::Storage(_) => "STORAGE_ERROR",
            ApiError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Convert to the client-facing error envelope.
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            ApiError::Validation(failure) => Some(serde_json::json!({ "fields": failure.errors })),
            ApiError::NotFound { kind, id } => Some(serde_json::json!({
                "kind": kind,
                "id": id.to_string(),
            })),
            _ => None,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Validation(failure) => write!(f, "{}", failure),
            ApiError::NotFound { kind, id } => {
                write!(f, "{} with id '{}' not found", kind, id)
            }
            ApiError::InvalidBody { message } => {
                write!(f, "invalid request body: {}", message)
            }
            ApiError::Storage(e) => write!(f, "{}", e),
            ApiError::Internal(message) => write!(f, "internal error: {}", message),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Storage(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ValidationFailure> for ApiError {
    fn from(failure: ValidationFailure) -> Self {
        ApiError::Validation(failure)
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::Storage(err)
    }
}

/// Error envelope rendered to clients.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (status, Json(self.to_response())).into_response()
    }
}
