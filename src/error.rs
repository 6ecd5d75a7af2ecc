//! Application error taxonomy and its HTTP representation.
//!
//! Every fallible operation in the service returns [`AppError`]. Handlers
//! propagate it with `?` and axum renders it through [`IntoResponse`] as
//!
//! ```json
//! {
//!   "status": "error",
//!   "code": "alias_conflict",
//!   "message": "Custom alias already exists",
//!   "details": { "code": "abc123" }
//! }
//! ```

use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error;

use crate::api::validation::field_errors;
use crate::utils::db_error::{LINKS_CODE_CONSTRAINT, is_unique_violation_on_code};

/// Machine-readable error payload.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Value::is_null")]
    pub details: Value,
}

#[derive(Serialize)]
struct ErrorBody {
    status: &'static str,
    #[serde(flatten)]
    error: ErrorInfo,
}

#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed input rejected before touching the store.
    #[error("{message}")]
    Validation { message: String, details: Value },

    #[error("{message}")]
    NotFound { message: String, details: Value },

    /// A caller-supplied alias is already taken.
    #[error("{message}")]
    AliasConflict { message: String, details: Value },

    /// Every generated candidate collided.
    #[error("{message}")]
    AliasExhausted { message: String, details: Value },

    /// The unique constraint on `code` rejected an insert.
    #[error("{message}")]
    DuplicateCode { message: String, details: Value },

    /// Any underlying storage failure.
    #[error("{message}")]
    StoreUnavailable { message: String, details: Value },

    #[error("{message}")]
    Unauthorized { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn alias_conflict(message: impl Into<String>, details: Value) -> Self {
        Self::AliasConflict {
            message: message.into(),
            details,
        }
    }

    pub fn alias_exhausted(message: impl Into<String>, details: Value) -> Self {
        Self::AliasExhausted {
            message: message.into(),
            details,
        }
    }

    pub fn duplicate_code(message: impl Into<String>, details: Value) -> Self {
        Self::DuplicateCode {
            message: message.into(),
            details,
        }
    }

    pub fn store_unavailable(message: impl Into<String>, details: Value) -> Self {
        Self::StoreUnavailable {
            message: message.into(),
            details,
        }
    }

    pub fn unauthorized(message: impl Into<String>, details: Value) -> Self {
        Self::Unauthorized {
            message: message.into(),
            details,
        }
    }

    /// HTTP status this error is reported with.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation { .. }
            | AppError::AliasConflict { .. }
            | AppError::DuplicateCode { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            AppError::AliasExhausted { .. } | AppError::StoreUnavailable { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Stable identifier used in the `code` field of error bodies.
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Validation { .. } => "validation_error",
            AppError::NotFound { .. } => "not_found",
            AppError::AliasConflict { .. } => "alias_conflict",
            AppError::AliasExhausted { .. } => "alias_exhausted",
            AppError::DuplicateCode { .. } => "duplicate_code",
            AppError::StoreUnavailable { .. } => "store_unavailable",
            AppError::Unauthorized { .. } => "unauthorized",
        }
    }

    fn details(&self) -> &Value {
        match self {
            AppError::Validation { details, .. }
            | AppError::NotFound { details, .. }
            | AppError::AliasConflict { details, .. }
            | AppError::AliasExhausted { details, .. }
            | AppError::DuplicateCode { details, .. }
            | AppError::StoreUnavailable { details, .. }
            | AppError::Unauthorized { details, .. } => details,
        }
    }

    pub fn to_error_info(&self) -> ErrorInfo {
        ErrorInfo {
            code: self.error_code(),
            message: self.to_string(),
            details: self.details().clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorBody {
            status: "error",
            error: self.to_error_info(),
        };

        let mut response = (status, Json(body)).into_response();

        if matches!(self, AppError::Unauthorized { .. }) {
            response.headers_mut().insert(
                header::WWW_AUTHENTICATE,
                HeaderValue::from_static("Basic realm=\"Authorization Required\""),
            );
        }

        response
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if is_unique_violation_on_code(&e) {
            return AppError::duplicate_code(
                "Short code already exists",
                json!({ "constraint": LINKS_CODE_CONSTRAINT }),
            );
        }

        if matches!(e, sqlx::Error::RowNotFound) {
            return AppError::not_found("Record not found", Value::Null);
        }

        tracing::error!(error = %e, "Database error");
        AppError::store_unavailable("Database error", Value::Null)
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::bad_request(
            "Validation failed",
            json!({ "fields": field_errors(&errors) }),
        )
    }
}
