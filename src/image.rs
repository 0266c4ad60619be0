// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Authenticated image URLs
//!
//! Images are fetched lazily by an image loader, outside of the REST client,
//! so the descriptor carries its own header set.

use std::fmt;

use reqwest::header::HeaderMap;
use reqwest::Method;

use crate::error::Result;
use crate::http::{to_header_map, HeaderEntry, Request};

/// Kind of image resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageKind {
    /// Image attached to a chat message, addressed by message id
    Message,
    /// Uploaded media, addressed by media id
    Media,
}

impl ImageKind {
    /// Path segment under the base URL
    pub fn path_segment(&self) -> &'static str {
        match self {
            ImageKind::Message => "images/",
            ImageKind::Media => "media/",
        }
    }
}

/// URL plus the headers needed to fetch it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedImageUrl {
    url: String,
    headers: Vec<HeaderEntry>,
}

impl AuthenticatedImageUrl {
    pub fn new(url: impl Into<String>, headers: Vec<HeaderEntry>) -> Self {
        Self {
            url: url.into(),
            headers,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Headers in the order they are sent
    pub fn headers(&self) -> &[HeaderEntry] {
        &self.headers
    }

    /// Look up a header value by name (case-insensitive)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|h| h.name.eq_ignore_ascii_case(name))
            .map(|h| h.value.as_str())
    }

    /// Headers as a map. Fails when the identification or authorization
    /// header cannot be encoded.
    pub fn header_map(&self) -> Result<HeaderMap> {
        to_header_map(&self.headers)
    }

    /// GET request for this image
    pub fn to_request(&self) -> Result<Request> {
        let mut request = Request::new(Method::GET, &self.url)?;
        request.headers = self.header_map()?;
        Ok(request)
    }
}

impl fmt::Display for AuthenticatedImageUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_segments() {
        assert_eq!(ImageKind::Message.path_segment(), "images/");
        assert_eq!(ImageKind::Media.path_segment(), "media/");
    }

    #[test]
    fn test_to_request() {
        let image = AuthenticatedImageUrl::new(
            "https://x.test/media/abc",
            vec![HeaderEntry::required("x-iris-identification", "s:d")],
        );
        let req = image.to_request().unwrap();
        assert_eq!(req.method, Method::GET);
        assert_eq!(req.url.as_str(), "https://x.test/media/abc");
        assert_eq!(req.header_str("x-iris-identification"), Some("s:d"));
        assert_eq!(image.header("X-IRIS-IDENTIFICATION"), Some("s:d"));
        assert_eq!(image.to_string(), "https://x.test/media/abc");
    }

    #[test]
    fn test_to_request_rejects_unencodable_identification() {
        let image = AuthenticatedImageUrl::new(
            "https://x.test/images/42",
            vec![HeaderEntry::required("x-iris-identification", "s\r:d")],
        );
        assert!(matches!(image.to_request(), Err(crate::Error::InvalidHeader { .. })));
    }

    #[test]
    fn test_to_request_rejects_bad_url() {
        let image = AuthenticatedImageUrl::new("images/42", Vec::new());
        assert!(image.to_request().is_err());
    }
}
