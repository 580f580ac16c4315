//! # Error Types
//!
//! Typed error handling for the PAYMILL client.
//! All operations return `Result<T, PaymillError>`.
//!
//! Local precondition failures (`InvalidArgument`, `MissingIdentifier`) are
//! raised before any request leaves the process. Remote failures carry the
//! server's `error` text and `exception` code unchanged.

use serde::Deserialize;
use thiserror::Error;

/// Core error type for all PAYMILL operations
#[derive(Debug, Error)]
pub enum PaymillError {
    /// Caller input rejected locally (e.g. missing start date in a range filter)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Update or delete on a resource that has no id
    #[error("Missing identifier: {resource} has no id")]
    MissingIdentifier { resource: &'static str },

    /// The API rejected the payload
    #[error("Validation error [{status}]: {message}")]
    Validation {
        status: u16,
        message: String,
        exception: Option<String>,
    },

    /// The API reported no resource with the requested id
    #[error("Not found: {message}")]
    NotFound {
        message: String,
        exception: Option<String>,
    },

    /// Bad or missing API key
    #[error("Authentication failed [{status}]: {message}")]
    Authentication { status: u16, message: String },

    /// Any other non-success answer (rate limiting, server errors)
    #[error("Remote error [{status}]: {message}")]
    Remote {
        status: u16,
        message: String,
        exception: Option<String>,
    },

    /// Network-level failure talking to the API
    #[error("Transport error: {0}")]
    Transport(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration errors (missing key, unreadable config file)
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl PaymillError {
    /// Returns true if the error was reported by the API
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            PaymillError::Validation { .. }
                | PaymillError::NotFound { .. }
                | PaymillError::Authentication { .. }
                | PaymillError::Remote { .. }
        )
    }

    /// HTTP status reported by the API, if any
    pub fn status_code(&self) -> Option<u16> {
        match self {
            PaymillError::Validation { status, .. } => Some(*status),
            PaymillError::NotFound { .. } => Some(404),
            PaymillError::Authentication { status, .. } => Some(*status),
            PaymillError::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Server-supplied exception code, if any
    pub fn exception(&self) -> Option<&str> {
        match self {
            PaymillError::Validation { exception, .. }
            | PaymillError::NotFound { exception, .. }
            | PaymillError::Remote { exception, .. } => exception.as_deref(),
            _ => None,
        }
    }
}

/// Error envelope returned by the API on non-success responses.
///
/// `error` is either a plain message or an object of per-field messages.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<serde_json::Value>,
    #[serde(default)]
    exception: Option<String>,
}

impl PaymillError {
    /// Classify a non-success response by status, keeping the server's text.
    pub fn from_response(status: u16, body: &str) -> Self {
        let parsed = serde_json::from_str::<ErrorBody>(body).ok();
        let exception = parsed.as_ref().and_then(|b| b.exception.clone());
        let message = match parsed.and_then(|b| b.error) {
            Some(serde_json::Value::String(text)) => text,
            Some(other) => other.to_string(),
            None if body.trim().is_empty() => format!("HTTP {}", status),
            None => body.to_string(),
        };

        match status {
            401 | 403 => PaymillError::Authentication { status, message },
            404 => PaymillError::NotFound { message, exception },
            400 | 409 | 412 | 422 => PaymillError::Validation {
                status,
                message,
                exception,
            },
            _ => PaymillError::Remote {
                status,
                message,
                exception,
            },
        }
    }
}

impl From<serde_json::Error> for PaymillError {
    fn from(e: serde_json::Error) -> Self {
        PaymillError::Serialization(e.to_string())
    }
}

/// Result type alias for PAYMILL operations
pub type PaymillResult<T> = Result<T, PaymillError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_errors() {
        assert!(PaymillError::NotFound {
            message: "Transaction not found".into(),
            exception: Some("transaction_not_found".into()),
        }
        .is_remote());
        assert!(PaymillError::Authentication {
            status: 401,
            message: "Access Denied".into()
        }
        .is_remote());
        assert!(!PaymillError::MissingIdentifier { resource: "offer" }.is_remote());
        assert!(!PaymillError::Transport("timeout".into()).is_remote());
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            PaymillError::Validation {
                status: 412,
                message: "Amount invalid".into(),
                exception: None,
            }
            .status_code(),
            Some(412)
        );
        assert_eq!(
            PaymillError::NotFound {
                message: "x".into(),
                exception: None
            }
            .status_code(),
            Some(404)
        );
        assert_eq!(PaymillError::InvalidArgument("x".into()).status_code(), None);
    }

    #[test]
    fn test_from_response_not_found() {
        let body = r#"{"exception":"transaction_not_found","error":"Transaction not found"}"#;
        match PaymillError::from_response(404, body) {
            PaymillError::NotFound { message, exception } => {
                assert_eq!(message, "Transaction not found");
                assert_eq!(exception.as_deref(), Some("transaction_not_found"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_from_response_field_messages_kept_verbatim() {
        let body = r#"{"error":{"messages":{"required":"Parameter is mandatory"},"field":"amount"}}"#;
        let err = PaymillError::from_response(400, body);
        assert!(matches!(err, PaymillError::Validation { status: 400, .. }));
        assert!(err.to_string().contains("Parameter is mandatory"));
        assert!(err.to_string().contains("amount"));
    }

    #[test]
    fn test_from_response_auth_and_fallbacks() {
        assert!(matches!(
            PaymillError::from_response(401, r#"{"error":"Access Denied"}"#),
            PaymillError::Authentication { status: 401, .. }
        ));

        match PaymillError::from_response(502, "Bad Gateway") {
            PaymillError::Remote { status, message, .. } => {
                assert_eq!(status, 502);
                assert_eq!(message, "Bad Gateway");
            }
            other => panic!("unexpected error: {other:?}"),
        }

        assert_eq!(
            PaymillError::from_response(500, "").to_string(),
            "Remote error [500]: HTTP 500"
        );
    }

    #[test]
    fn test_exception_passthrough() {
        let err = PaymillError::Remote {
            status: 429,
            message: "Too many requests".into(),
            exception: Some("rate_limit".into()),
        };
        assert_eq!(err.exception(), Some("rate_limit"));
        assert_eq!(err.to_string(), "Remote error [429]: Too many requests");
    }
}
