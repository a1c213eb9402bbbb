//! Error types for the HTTP client.

use reqwest::StatusCode;
use thiserror::Error;

use crate::config::ConfigError;
use crate::credentials::CredentialError;

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Message the API uses when a request lacks a valid session.
pub const AUTH_REQUIRED_MESSAGE: &str = "Authentication required";

/// Message used when an error response carries no readable message.
pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred";

/// Classification of a non-success HTTP response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// 401 or 403: the credential is missing, invalid or expired.
    Unauthorized,
    /// 404: the requested note does not exist.
    NotFound,
    /// Any other non-success status.
    Other,
}

impl ApiErrorKind {
    /// Classify an HTTP status code.
    pub fn from_status(status: StatusCode) -> Self {
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Self::Unauthorized,
            StatusCode::NOT_FOUND => Self::NotFound,
            _ => Self::Other,
        }
    }
}

/// Errors that can occur while talking to the notes API.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request failed before any HTTP response arrived.
    #[error("Network error occurred: {0}")]
    Network(#[source] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("{message}")]
    Api {
        status: StatusCode,
        kind: ApiErrorKind,
        message: String,
    },

    /// A success response was missing a required field or did not decode.
    #[error("Invalid response from server: {0}")]
    InvalidResponse(String),

    /// The credential store could not be read.
    #[error("credential storage error: {0}")]
    Credential(#[from] CredentialError),

    /// A request body could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The client could not be built from its configuration.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl ClientError {
    /// Build an API error from a status and a decoded message.
    pub fn api(status: StatusCode, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            kind: ApiErrorKind::from_status(status),
            message: message.into(),
        }
    }

    /// HTTP status of the response, if one was received.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Classification of the response, if one was received.
    pub fn kind(&self) -> Option<ApiErrorKind> {
        match self {
            Self::Api { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// Whether this failure means the session is no longer valid.
    ///
    /// Decided by status first. A message containing "Authentication
    /// required" also counts, for servers that report expiry with another
    /// status.
    pub fn is_auth_failure(&self) -> bool {
        match self {
            Self::Api { kind, message, .. } => {
                *kind == ApiErrorKind::Unauthorized
                    || message
                        .to_ascii_lowercase()
                        .contains(&AUTH_REQUIRED_MESSAGE.to_ascii_lowercase())
            }
            _ => false,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == Some(ApiErrorKind::NotFound)
    }

    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_))
    }
}
