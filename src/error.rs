//! Application error type and its HTTP mapping.
//!
//! Every fallible operation in the service layer returns [`AppError`]. The
//! [`IntoResponse`] implementation turns each variant into a status code and a
//! `{"error": "<message>"}` JSON body, so handlers can simply use `?`.

use axum::{
    Json,
    http::{HeaderMap, HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

use crate::domain::rate_limit::RateLimitInfo;

/// Error payload returned to API clients.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Value::is_null")]
    pub details: Value,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// User-correctable input problem (400).
    #[error("{message}")]
    Validation { message: String, details: Value },

    #[error("{message}")]
    NotFound { message: String, details: Value },

    /// Uniqueness constraint violation reported by the store (409).
    #[error("{message}")]
    Conflict { message: String, details: Value },

    /// The client exhausted its creation budget for the current window (429).
    #[error("too many requests, please try again later")]
    RateLimited { info: RateLimitInfo },

    /// Every generated short code collided with an existing one.
    #[error("could not allocate a unique short code after {attempts} attempts")]
    CodeSpaceExhausted { attempts: usize },

    /// Backing store failure or another unexpected condition (500).
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

    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
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

    /// HTTP status this error maps to.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            Self::CodeSpaceExhausted { .. } | Self::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Builds the client-facing body. Internal details are never exposed.
    pub fn to_error_body(&self) -> ErrorBody {
        match self {
            Self::Validation { message, details }
            | Self::NotFound { message, details }
            | Self::Conflict { message, details } => ErrorBody {
                error: message.clone(),
                details: details.clone(),
            },
            Self::RateLimited { .. } => ErrorBody {
                error: self.to_string(),
                details: Value::Null,
            },
            Self::CodeSpaceExhausted { .. } | Self::Internal { .. } => ErrorBody {
                error: "internal server error".to_string(),
                details: Value::Null,
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        let mut response = (status, Json(self.to_error_body())).into_response();

        if let Self::RateLimited { info } = &self {
            response.headers_mut().extend(rate_limit_headers(info, true));
        }

        response
    }
}

/// `RateLimit-*` headers for a quota snapshot, plus `Retry-After` when `denied`.
pub fn rate_limit_headers(info: &RateLimitInfo, denied: bool) -> HeaderMap {
    let mut headers = HeaderMap::new();
    for (name, value) in info.header_pairs(denied) {
        if let Ok(value) = HeaderValue::from_str(&value) {
            headers.insert(HeaderName::from_static(name), value);
        }
    }
    headers
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(db) = e.as_database_error() {
            if db.is_unique_violation() {
                return AppError::conflict(
                    "Unique constraint violation",
                    json!({ "constraint": db.constraint() }),
                );
            }
            if db.is_foreign_key_violation() {
                return AppError::bad_request(
                    "Referenced record does not exist",
                    json!({ "constraint": db.constraint() }),
                );
            }
        }

        tracing::error!(error = %e, "database error");
        AppError::internal("Database error", json!({ "reason": e.to_string() }))
    }
}

impl From<redis::RedisError> for AppError {
    fn from(e: redis::RedisError) -> Self {
        tracing::error!(error = %e, "redis error");
        AppError::internal("Rate limit store error", json!({ "reason": e.to_string() }))
    }
}
