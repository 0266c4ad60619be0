// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Error types for the Parley networking layer
//!
//! Only transport construction and request execution can fail. Header
//! computation, image URLs and error-message extraction never do.

use thiserror::Error;

/// Result type alias for parley-net operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for parley-net
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP transport failed (connect, TLS, timeout, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A header could not be encoded
    #[error("Invalid header '{name}': {reason}")]
    InvalidHeader { name: String, reason: String },

    /// The API answered with a non-2xx status
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// An interceptor aborted the request
    #[error("Request aborted by interceptor: {0}")]
    Aborted(String),

    /// Pinning material could not be loaded
    #[error("Pinning error: {0}")]
    Pinning(String),
}

impl Error {
    /// Create a configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::Config(msg.into())
    }

    /// Create an invalid header error
    pub fn invalid_header(name: impl Into<String>, reason: impl ToString) -> Self {
        Error::InvalidHeader {
            name: name.into(),
            reason: reason.to_string(),
        }
    }

    /// Get HTTP status code if available
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } => Some(*status),
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Check if this is a client error (4xx)
    pub fn is_client_error(&self) -> bool {
        self.status_code()
            .map(|s| (400..500).contains(&s))
            .unwrap_or(false)
    }

    /// Check if this is a server error (5xx)
    pub fn is_server_error(&self) -> bool {
        self.status_code()
            .map(|s| (500..600).contains(&s))
            .unwrap_or(false)
    }

    /// Check if this is a transport-level failure
    pub fn is_network(&self) -> bool {
        matches!(self, Error::Http(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_classification() {
        let err = Error::Api {
            status: 422,
            message: "Bad input".to_string(),
        };

        assert!(err.is_client_error());
        assert!(!err.is_server_error());
        assert_eq!(err.status_code(), Some(422));
        assert_eq!(err.to_string(), "API error (422): Bad input");
    }

    #[test]
    fn test_server_error() {
        let err = Error::Api {
            status: 503,
            message: "Service Unavailable".to_string(),
        };
        assert!(err.is_server_error());
        assert!(!err.is_network());
    }

    #[test]
    fn test_url_error_has_no_status() {
        let err: Error = url::Url::parse("not a url").unwrap_err().into();
        assert_eq!(err.status_code(), None);
        assert!(!err.is_client_error());
    }
}
