//! Metadata provider error types.

use thiserror::Error;

/// Result type for metadata operations.
pub type MetadataResult<T> = Result<T, MetadataError>;

/// Errors that can occur while fetching field metadata.
#[derive(Error, Debug)]
pub enum MetadataError {
    /// The object name is not a Salesforce API identifier.
    #[error("invalid object name {0:?}: expected letters, digits and underscores")]
    InvalidObjectName(String),

    /// Transport-level failure.
    #[error("request to Salesforce failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The SOAP login call returned a fault.
    #[error("Salesforce login failed: {message} (code: {code})")]
    LoginFault {
        /// Fault code from the SOAP envelope.
        code: String,
        /// Fault string from the SOAP envelope.
        message: String,
    },

    /// The REST API returned a non-success status.
    #[error("Salesforce API error {status}: {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// A response could not be interpreted.
    #[error("unexpected response from Salesforce: {0}")]
    MalformedResponse(String),
}

impl MetadataError {
    /// Create a login fault error.
    pub fn login_fault(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::LoginFault {
            code: code.into(),
            message: message.into(),
        }
    }
}
