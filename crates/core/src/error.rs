//! Error types for Backoffice Console
//!
//! One error type covers every failure a console flow can observe: transport
//! failures, structured error responses from the collaborator API, response
//! bodies of the wrong shape, client-side validation, and local session or
//! configuration problems.

use std::path::PathBuf;
use thiserror::Error;

use crate::types::{EntityKind, RecordId};

/// The main error type for Backoffice Console
#[derive(Debug, Error)]
pub enum ConsoleError {
    // ========================================================================
    // Collaborator API Errors
    // ========================================================================
    /// The request never produced a response (DNS, connect, TLS, body read)
    #[error("Request failed: {0}")]
    Transport(String),

    /// Non-2xx response from the collaborator API
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Message derived from the error body, or a generic fallback
        message: String,
    },

    /// The response body did not have the expected shape
    #[error("Unexpected response shape: {0}")]
    UnexpectedShape(String),

    /// A fetch-by-id returned no matching record
    #[error("{entity} #{id} not found")]
    RecordNotFound { entity: EntityKind, id: RecordId },

    // ========================================================================
    // Validation Errors
    // ========================================================================
    /// A single form field failed client-side validation
    #[error("Field '{field}': {message}")]
    FieldValidation { field: String, message: String },

    /// General validation error (several fields joined)
    #[error("Validation error: {0}")]
    Validation(String),

    // ========================================================================
    // Flow Errors
    // ========================================================================
    /// A status toggle was requested while another awaits confirmation
    #[error("A status change for record #{0} is already awaiting confirmation")]
    ConfirmationPending(RecordId),

    /// Confirm was called with nothing pending
    #[error("No status change is awaiting confirmation")]
    NothingPending,

    /// Page navigation outside `[1, total_pages]`
    #[error("Page {page} is out of range (1..={total_pages})")]
    PageOutOfRange { page: usize, total_pages: usize },

    /// Unknown entity name (CLI argument)
    #[error("Unknown entity: {0}")]
    UnknownEntity(String),

    // ========================================================================
    // Session Errors
    // ========================================================================
    /// No persisted session exists
    #[error("Not logged in")]
    NotLoggedIn,

    /// The persisted session blob is malformed
    #[error("Invalid session data: {0}")]
    InvalidSession(String),

    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// TOML parse error in a configuration file
    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    // ========================================================================
    // IO / Serialization Errors
    // ========================================================================
    /// File IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// File read error
    #[error("Failed to read file '{path}': {message}")]
    FileRead { path: PathBuf, message: String },

    /// File write error
    #[error("Failed to write file '{path}': {message}")]
    FileWrite { path: PathBuf, message: String },

    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ConsoleError {
    /// Create a transport error
    pub fn transport(msg: impl Into<String>) -> Self {
        ConsoleError::Transport(msg.into())
    }

    /// Create an API error
    pub fn api(status: u16, msg: impl Into<String>) -> Self {
        ConsoleError::Api {
            status,
            message: msg.into(),
        }
    }

    /// Create an unexpected-shape error
    pub fn shape(msg: impl Into<String>) -> Self {
        ConsoleError::UnexpectedShape(msg.into())
    }

    /// Create a field validation error
    pub fn field(field: impl Into<String>, msg: impl Into<String>) -> Self {
        ConsoleError::FieldValidation {
            field: field.into(),
            message: msg.into(),
        }
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        ConsoleError::Validation(msg.into())
    }

    /// Check if this error is a client-side validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ConsoleError::Validation(_) | ConsoleError::FieldValidation { .. }
        )
    }

    /// Check if this error is a not-found error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ConsoleError::RecordNotFound { .. } | ConsoleError::Api { status: 404, .. }
        )
    }

    /// Check if the request never produced a response
    pub fn is_transport(&self) -> bool {
        matches!(self, ConsoleError::Transport(_))
    }

    /// Text suitable for a transient notice
    pub fn user_message(&self) -> String {
        match self {
            ConsoleError::Transport(_) => {
                "Unable to reach the server. Please check your connection.".to_string()
            }
            ConsoleError::Api { status, message } if message.is_empty() => {
                format!("The server returned an error (HTTP {}).", status)
            }
            ConsoleError::Api { message, .. } => message.clone(),
            ConsoleError::UnexpectedShape(_) => {
                "Received an unexpected response from the server.".to_string()
            }
            ConsoleError::FieldValidation { message, .. } => message.clone(),
            ConsoleError::NotLoggedIn => "Please log in first.".to_string(),
            other => other.to_string(),
        }
    }
}

/// Result type alias using ConsoleError
pub type ConsoleResult<T> = Result<T, ConsoleError>;

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_validation_error() {
        let err = ConsoleError::field("pincode", "Pincode must be 6 digits");
        assert!(err.is_validation());
        assert_eq!(err.to_string(), "Field 'pincode': Pincode must be 6 digits");
        assert_eq!(err.user_message(), "Pincode must be 6 digits");
    }

    #[test]
    fn test_api_error_message() {
        let err = ConsoleError::api(400, "Email already exists");
        assert!(!err.is_validation());
        assert!(!err.is_transport());
        assert_eq!(err.user_message(), "Email already exists");
    }

    #[test]
    fn test_not_found_errors() {
        let err = ConsoleError::RecordNotFound {
            entity: EntityKind::Client,
            id: RecordId(7),
        };
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Client #7 not found");

        assert!(ConsoleError::api(404, "gone").is_not_found());
        assert!(!ConsoleError::api(500, "boom").is_not_found());
    }

    #[test]
    fn test_api_error_without_message() {
        let err = ConsoleError::api(502, "");
        assert_eq!(err.user_message(), "The server returned an error (HTTP 502).");
    }

    #[test]
    fn test_transport_message_is_generic() {
        let err = ConsoleError::transport("tcp connect error: os error 111");
        assert_eq!(
            err.user_message(),
            "Unable to reach the server. Please check your connection."
        );
    }
}
