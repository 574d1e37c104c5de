//! Application error type and its HTTP representation.
//!
//! Every error carries a human-readable message plus structured `details`
//! that are returned to the client as JSON:
//!
//! ```json
//! { "error": { "code": "not_found", "message": "Short code not found", "details": {} } }
//! ```
//!
//! Cache failures never appear here: they are logged and degraded to a store
//! lookup by the services.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

use crate::utils::base62::Base62Error;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Serializable error payload.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Malformed or oversized input, rejected before any store or cache call.
    #[error("{message}")]
    Validation { message: String, details: Value },

    /// Unknown, deleted, or expired short code.
    #[error("{message}")]
    NotFound { message: String, details: Value },

    /// The durable store is unreachable or timed out.
    #[error("{message}")]
    UpstreamUnavailable { message: String, details: Value },

    /// Contract violations such as an identifier that cannot be encoded.
    #[error("{message}")]
    Internal { message: String, details: Value },
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

    pub fn upstream_unavailable(message: impl Into<String>, details: Value) -> Self {
        Self::UpstreamUnavailable {
            message: message.into(),
            details,
        }
    }

    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// Stable machine-readable code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "validation_error",
            Self::NotFound { .. } => "not_found",
            Self::UpstreamUnavailable { .. } => "upstream_unavailable",
            Self::Internal { .. } => "internal_error",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::UpstreamUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn to_error_info(&self) -> ErrorInfo {
        let (message, details) = match self {
            Self::Validation { message, details }
            | Self::NotFound { message, details }
            | Self::UpstreamUnavailable { message, details }
            | Self::Internal { message, details } => (message.clone(), details.clone()),
        };

        ErrorInfo {
            code: self.code(),
            message,
            details,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        tracing::error!(error = %e, "Store operation failed");

        match e {
            sqlx::Error::Database(db) => AppError::upstream_unavailable(
                "Database error",
                json!({ "constraint": db.constraint() }),
            ),
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed => {
                AppError::upstream_unavailable("Store unavailable", json!({}))
            }
            _ => AppError::upstream_unavailable("Store operation failed", json!({})),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let details = serde_json::to_value(&errors).unwrap_or_else(|_| json!({}));
        AppError::bad_request("Request validation failed", details)
    }
}

impl From<Base62Error> for AppError {
    fn from(e: Base62Error) -> Self {
        tracing::error!(error = %e, "Short code encoding contract violated");
        AppError::internal("Failed to encode short code", json!({ "reason": e.to_string() }))
    }
}
