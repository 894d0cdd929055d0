//! Pairing service error types.
//!
//! All user-facing errors are returned synchronously as a structured JSON
//! payload with a non-2xx status. Internal details are logged server-side
//! but not exposed to clients. A failed request never mutates queue state.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PairingError {
    /// Required query parameter absent.
    #[error("Missing required parameter: {0}")]
    MissingParameter(String),

    /// Caller type not in the enumerated set.
    #[error("Invalid caller type: {0}")]
    InvalidRole(String),

    /// Administrative secret mismatch.
    #[error("Unauthorized")]
    Unauthorized,

    /// Dequeue from an empty queue. The matchmaker only dequeues after
    /// observing a non-empty queue inside its critical section, so this
    /// can never surface to users; it is mapped defensively.
    #[error("Queue is empty")]
    EmptyQueue,

    /// Channel allocation exhausted its resampling budget.
    #[error("Channel allocation failed: {0}")]
    Allocation(String),

    /// Token signing failed.
    #[error("Token signing failed: {0}")]
    Signing(String),

    /// Generic internal error.
    #[error("Internal error")]
    Internal,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    code: String,
    message: String,
}

impl PairingError {
    /// Returns the HTTP status for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            PairingError::MissingParameter(_) | PairingError::InvalidRole(_) => {
                StatusCode::BAD_REQUEST
            }
            PairingError::Unauthorized => StatusCode::UNAUTHORIZED,
            PairingError::EmptyQueue
            | PairingError::Allocation(_)
            | PairingError::Signing(_)
            | PairingError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for PairingError {
    fn into_response(self) -> Response {
        let (code, message) = match &self {
            PairingError::MissingParameter(name) => (
                "MISSING_PARAMETER",
                format!("Missing required parameter: {name}"),
            ),
            PairingError::InvalidRole(_) => ("INVALID_TYPE", "user type is invalid".to_string()),
            PairingError::Unauthorized => {
                ("UNAUTHORIZED", "Invalid administrative secret".to_string())
            }
            // Internal variants share a generic message so no queue or
            // allocator details leak to clients.
            PairingError::EmptyQueue
            | PairingError::Allocation(_)
            | PairingError::Signing(_)
            | PairingError::Internal => {
                ("INTERNAL_ERROR", "An internal error occurred".to_string())
            }
        };

        let error_response = ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message,
            },
        };

        (self.status_code(), Json(error_response)).into_response()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_status_code_mapping() {
        assert_eq!(
            PairingError::MissingParameter("id".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            PairingError::InvalidRole("admin".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            PairingError::Unauthorized.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            PairingError::EmptyQueue.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            PairingError::Allocation("budget exhausted".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            PairingError::Internal.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_internal_messages_hide_details() {
        let err = PairingError::Allocation("registry covers 100% of space".to_string());
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_display_formatting() {
        assert_eq!(
            format!("{}", PairingError::MissingParameter("channel".to_string())),
            "Missing required parameter: channel"
        );
        assert_eq!(format!("{}", PairingError::Unauthorized), "Unauthorized");
    }
}
