// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP response types and error-message extraction

use bytes::Bytes;
use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use serde::de::{self, DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

use crate::error::{Error, Result};

/// HTTP response representation, body fully buffered
#[derive(Debug, Clone)]
pub struct Response {
    /// Response status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Response body
    pub body: Bytes,
    /// Final URL (after redirects)
    pub url: Url,
    /// Response time in milliseconds
    pub response_time_ms: u64,
}

impl Response {
    /// Create a new response
    pub fn new(
        status: StatusCode,
        headers: HeaderMap,
        body: Bytes,
        url: Url,
        response_time_ms: u64,
    ) -> Self {
        Self {
            status,
            headers,
            body,
            url,
            response_time_ms,
        }
    }

    /// Check if status is success (2xx)
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Get status code as u16
    pub fn status_code(&self) -> u16 {
        self.status.as_u16()
    }

    /// Status message, e.g. "Not Found"
    pub fn message(&self) -> String {
        status_message(self.status)
    }

    /// Body of a failed response, `None` for successes and empty bodies
    pub fn error_body(&self) -> Option<&Bytes> {
        if self.is_success() || self.body.is_empty() {
            None
        } else {
            Some(&self.body)
        }
    }

    /// Get body as text, lossy conversion
    pub fn text_lossy(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Parse body as JSON
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.body).map_err(Error::from)
    }

    /// Get a header value
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// Error payload returned by the chat API
///
/// Only `message` is interpreted. Scalar messages (numbers, booleans) are
/// read as their text form; `status` is kept as whatever the server sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub message: Option<String>,
    #[serde(default)]
    pub status: Option<Value>,
}

fn scalar_as_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(other) => Err(de::Error::custom(format!(
            "expected a scalar message, found {}",
            other
        ))),
    }
}

/// Canonical reason phrase of a status, or the bare code when there is none
pub fn status_message(status: StatusCode) -> String {
    status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| status.as_str().to_string())
}

/// Human-readable message for a failed response.
///
/// Uses the `message` of the JSON error body when there is one, otherwise the
/// status message. Never fails.
pub fn extract_error_message(response: &Response) -> String {
    match response.error_body() {
        Some(body) => message_from_body(response.status, body),
        None => response.message(),
    }
}

/// Same as [`extract_error_message`], reading the body of a live response.
///
/// A failure while reading the body degrades to the status message.
pub async fn extract_error_message_from(response: reqwest::Response) -> String {
    let status = response.status();
    if status.is_success() {
        return status_message(status);
    }

    match response.bytes().await {
        Ok(body) if !body.is_empty() => message_from_body(status, &body),
        Ok(_) => status_message(status),
        Err(e) => {
            tracing::debug!(status = %status, error = %e, "Failed to read error body");
            status_message(status)
        }
    }
}

fn message_from_body(status: StatusCode, body: &[u8]) -> String {
    match serde_json::from_slice::<ErrorResponse>(body) {
        Ok(ErrorResponse {
            message: Some(message),
            ..
        }) => message,
        Ok(_) => status_message(status),
        Err(e) => {
            tracing::debug!(status = %status, error = %e, "Error body is not a JSON error response");
            status_message(status)
        }
    }
}
