use http::StatusCode;
use serde::Serialize;
use std::fmt;

/// Shown in the page banner when a failure carries no usable text.
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong. Please try again.";

/// The one error kind raised by resource operations.
///
/// Not-found, validation, transport and server failures all surface the same
/// way: as a human-readable message for the page's inline error banner. The
/// constructors below only differ in how they word that message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize)]
#[error("{message}")]
pub struct ResourceError {
    message: String,
}

impl ResourceError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The request never produced a response (connect, timeout, TLS).
    pub fn transport(op: impl fmt::Display, collection: &str, err: impl fmt::Display) -> Self {
        Self::new(format!("Failed to {} {}: {}", op, collection, err))
    }

    /// The service answered with a non-success status.
    pub fn status(op: impl fmt::Display, collection: &str, status: StatusCode, body: &str) -> Self {
        let reason = status.canonical_reason().unwrap_or("Error");
        let body = body.trim();
        if body.is_empty() {
            Self::new(format!(
                "Failed to {} {}: {} {}",
                op,
                collection,
                status.as_u16(),
                reason
            ))
        } else {
            Self::new(format!(
                "Failed to {} {}: {} {} ({})",
                op,
                collection,
                status.as_u16(),
                reason,
                body
            ))
        }
    }

    /// The response body could not be read as the expected record shape.
    pub fn decode(collection: &str, err: impl fmt::Display) -> Self {
        Self::new(format!("Invalid {} data: {}", collection, err))
    }

    pub fn not_found(collection: &str, id: &str) -> Self {
        Self::new(format!("No record with id {} in {}", id, collection))
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Text for the inline banner, falling back to a generic line when empty.
    pub fn banner_text(&self) -> String {
        let trimmed = self.message.trim();
        if trimmed.is_empty() {
            GENERIC_FAILURE_MESSAGE.to_string()
        } else {
            trimmed.to_string()
        }
    }
}

impl From<reqwest::Error> for ResourceError {
    fn from(err: reqwest::Error) -> Self {
        ResourceError::new(err.to_string())
    }
}

impl From<serde_json::Error> for ResourceError {
    fn from(err: serde_json::Error) -> Self {
        ResourceError::new(format!("Serialization error: {}", err))
    }
}

impl From<validator::ValidationErrors> for ResourceError {
    fn from(err: validator::ValidationErrors) -> Self {
        ResourceError::new(format!("Validation error: {}", err))
    }
}
