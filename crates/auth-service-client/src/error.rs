//! Auth service error types.

use thiserror::Error;

/// Error returned by auth service calls.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// The service answered with a non-success status.
    #[error("Auth service rejected request (HTTP {status}): {}", .message.as_deref().unwrap_or("no message"))]
    Rejected {
        status: u16,
        message: Option<String>,
    },

    /// Failure reported by a non-HTTP implementation
    #[error("Auth service failed: {}", .0.as_deref().unwrap_or("no message"))]
    Failed(Option<String>),

    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parse error
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl ServiceError {
    /// Failure with a service-provided message.
    pub fn with_message(message: impl Into<String>) -> Self {
        ServiceError::Failed(Some(message.into()))
    }

    /// Failure without a message; callers substitute their own fallback.
    pub fn without_message() -> Self {
        ServiceError::Failed(None)
    }

    /// The message the service itself supplied, if any.
    ///
    /// Transport and decoding errors carry no service message.
    pub fn message(&self) -> Option<&str> {
        match self {
            ServiceError::Rejected { message, .. } | ServiceError::Failed(message) => {
                message.as_deref().filter(|m| !m.trim().is_empty())
            }
            _ => None,
        }
    }
}

/// Result type alias using ServiceError.
pub type ServiceResult<T> = Result<T, ServiceError>;
