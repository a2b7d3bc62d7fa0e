//! HTTP-facing error type.
//!
//! Every failure is logged where it is detected and converted into a status
//! code with a small JSON body. Internal errors never carry storage details.

use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

use crate::infrastructure::persistence::StoreError;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

#[derive(Serialize)]
struct ErrorInfo {
    code: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Value::is_null")]
    details: Value,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    Validation { message: String, details: Value },

    #[error("{message}")]
    NotFound { message: String, details: Value },

    #[error("Method {method} not allowed")]
    MethodNotAllowed { method: String, allow: &'static str },

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

    pub fn method_not_allowed(method: impl Into<String>, allow: &'static str) -> Self {
        Self::MethodNotAllowed {
            method: method.into(),
            allow,
        }
    }

    /// Internal error; `details` are kept for logs and never sent to clients.
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// HTTP status this error maps to.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let (code, message, details, allow) = match self {
            AppError::Validation { message, details } => {
                ("validation_error", message, details, None)
            }
            AppError::NotFound { message, details } => ("not_found", message, details, None),
            AppError::MethodNotAllowed { method, allow } => (
                "method_not_allowed",
                format!("Method {method} not allowed"),
                Value::Null,
                Some(allow),
            ),
            AppError::Internal { .. } => (
                "internal_error",
                "Internal server error".to_string(),
                Value::Null,
                None,
            ),
        };

        let body = ErrorBody {
            error: ErrorInfo {
                code,
                message,
                details,
            },
        };

        let mut response = (status, Json(body)).into_response();
        if let Some(allow) = allow {
            response
                .headers_mut()
                .insert(header::ALLOW, HeaderValue::from_static(allow));
        }
        response
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        tracing::error!(error = %e, "Storage failure");
        AppError::internal("Storage failure", json!({ "reason": e.to_string() }))
    }
}
