// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Header computation shared by API requests and image URLs

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use crate::config::SdkConfig;
use crate::error::{Error, Result};

/// Identification header, carries `secret:device_id`
pub const HEADER_IDENTIFICATION: &str = "x-iris-identification";

/// User authorization header
pub const HEADER_AUTHORIZATION: &str = "Authorization";

/// A single header, name and value as configured
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderEntry {
    pub name: String,
    pub value: String,
    /// A required header that cannot be encoded fails the request instead of
    /// being skipped
    pub required: bool,
}

impl HeaderEntry {
    /// Optional header, skipped when it cannot be encoded
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            required: false,
        }
    }

    /// Header that must be sent
    pub fn required(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            required: true,
            ..Self::new(name, value)
        }
    }
}

/// Compute the ordered header list for the current config.
///
/// Additional headers come first in configured order, followed by the
/// identification header and, when a token is set, the authorization header.
pub fn compute_headers(config: &SdkConfig) -> Vec<HeaderEntry> {
    let mut entries: Vec<HeaderEntry> = config
        .headers
        .iter()
        .map(|(name, value)| HeaderEntry::new(name.as_str(), value.as_str()))
        .collect();

    entries.push(HeaderEntry::required(HEADER_IDENTIFICATION, config.identification()));

    if let Some(ref token) = config.user_authorization {
        entries.push(HeaderEntry::required(HEADER_AUTHORIZATION, token.as_str()));
    }

    entries
}

/// Append entries to a header map.
///
/// Optional entries that are not valid HTTP header names or values are
/// skipped. An invalid required entry fails with [`Error::InvalidHeader`];
/// entries before it have already been appended.
pub fn apply_headers(headers: &mut HeaderMap, entries: &[HeaderEntry]) -> Result<()> {
    for entry in entries {
        let encoded = HeaderName::try_from(entry.name.as_str())
            .map_err(|e| Error::invalid_header(entry.name.as_str(), e))
            .and_then(|name| {
                HeaderValue::try_from(entry.value.as_str())
                    .map(|value| (name, value))
                    .map_err(|e| Error::invalid_header(entry.name.as_str(), e))
            });

        match encoded {
            Ok((name, value)) => {
                headers.append(name, value);
            }
            Err(e) if entry.required => return Err(e),
            Err(e) => {
                tracing::warn!(error = %e, "Skipping header");
            }
        }
    }
    Ok(())
}

/// Build a header map from entries
pub fn to_header_map(entries: &[HeaderEntry]) -> Result<HeaderMap> {
    let mut headers = HeaderMap::with_capacity(entries.len());
    apply_headers(&mut headers, entries)?;
    Ok(headers)
}
