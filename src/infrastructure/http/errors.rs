use reqwest::StatusCode;
use thiserror::Error;

use crate::domain::ports::CredentialStoreError;

/// Errors that can occur when calling the FishPi API
#[derive(Error, Debug)]
pub enum RequestError {
    /// The server answered with an auth-failure envelope (`code` -1 or 401)
    #[error("{message}")]
    Api {
        /// Envelope code
        code: i64,
        /// Envelope message, or the default failure message
        message: String,
    },

    /// Non-2xx HTTP status without an auth-failure envelope
    #[error("HTTP {status}: {body}")]
    Status {
        /// Response status
        status: StatusCode,
        /// Raw response body
        body: String,
    },

    /// Network or connection error
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Header name or value that cannot be sent
    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    /// Request body that cannot be encoded for its content type
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// Reading an upload from disk failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The credential store rejected a write
    #[error(transparent)]
    Credentials(#[from] CredentialStoreError),
}

impl RequestError {
    /// Returns true if the server reported an authentication failure
    pub const fn is_auth_failure(&self) -> bool {
        matches!(self, Self::Api { .. })
    }

    /// Returns true for failures below the envelope layer
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Status { .. } | Self::Network(_))
    }

    /// Envelope code, when the server produced one
    pub const fn code(&self) -> Option<i64> {
        match self {
            Self::Api { code, .. } => Some(*code),
            _ => None,
        }
    }
}
