// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Certificate pinning
//!
//! A [`PinningProvider`] hands out the trust anchors for a host. When the
//! provider knows the host, the client trusts those anchors only and the
//! built-in root store is disabled.

use std::collections::HashMap;

use reqwest::{Certificate, ClientBuilder};
use url::Url;

use crate::error::{Error, Result};

/// Source of pinned trust anchors, keyed by hostname
pub trait PinningProvider: Send + Sync {
    /// Certificates to trust for `host`, `None` when the host is not pinned
    fn trust_anchors(&self, host: &str) -> Option<Vec<Certificate>>;
}

#[derive(Clone)]
struct DomainPins {
    certificates: Vec<Certificate>,
    include_subdomains: bool,
}

/// In-memory pin set
#[derive(Clone, Default)]
pub struct StaticPinSet {
    domains: HashMap<String, DomainPins>,
}

impl StaticPinSet {
    /// Create an empty pin set
    pub fn new() -> Self {
        Self::default()
    }

    /// Pin a host to the given certificates
    pub fn pin(mut self, host: impl Into<String>, certificates: Vec<Certificate>) -> Self {
        self.insert(host.into(), certificates, false);
        self
    }

    /// Pin a host and all of its subdomains
    pub fn pin_with_subdomains(
        mut self,
        host: impl Into<String>,
        certificates: Vec<Certificate>,
    ) -> Self {
        self.insert(host.into(), certificates, true);
        self
    }

    /// Pin a host to a PEM encoded certificate
    pub fn pin_pem(self, host: impl Into<String>, pem: &[u8]) -> Result<Self> {
        let host = host.into();
        let certificate = Certificate::from_pem(pem)
            .map_err(|e| Error::Pinning(format!("invalid certificate for {}: {}", host, e)))?;
        Ok(self.pin(host, vec![certificate]))
    }

    /// Number of pinned domains
    pub fn len(&self) -> usize {
        self.domains.len()
    }

    /// Whether no domain is pinned
    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }

    fn insert(&mut self, host: String, certificates: Vec<Certificate>, include_subdomains: bool) {
        let entry = self
            .domains
            .entry(host.to_ascii_lowercase())
            .or_insert_with(|| DomainPins {
                certificates: Vec::new(),
                include_subdomains,
            });
        entry.certificates.extend(certificates);
        entry.include_subdomains |= include_subdomains;
    }

    fn lookup(&self, host: &str) -> Option<&DomainPins> {
        let host = host.to_ascii_lowercase();
        if let Some(pins) = self.domains.get(&host) {
            return Some(pins);
        }

        let mut rest = host.as_str();
        while let Some((_, parent)) = rest.split_once('.') {
            if let Some(pins) = self.domains.get(parent) {
                if pins.include_subdomains {
                    return Some(pins);
                }
            }
            rest = parent;
        }
        None
    }
}

impl PinningProvider for StaticPinSet {
    fn trust_anchors(&self, host: &str) -> Option<Vec<Certificate>> {
        self.lookup(host).map(|pins| pins.certificates.clone())
    }
}

/// Host whose certificates must be pinned for a base URL
pub fn pinning_host(base_url: &str) -> Result<String> {
    let url = Url::parse(base_url)?;
    url.host_str()
        .map(str::to_string)
        .ok_or_else(|| Error::Pinning(format!("base URL '{}' has no host", base_url)))
}

/// Restrict `builder` to the pinned anchors of the base URL's host.
///
/// A base URL that does not parse skips pinning with a warning; the client is
/// still built and the URL error surfaces when a request is made.
pub fn apply_pinning(
    builder: ClientBuilder,
    base_url: &str,
    provider: Option<&dyn PinningProvider>,
) -> ClientBuilder {
    let Some(provider) = provider else {
        tracing::debug!("No pinning provider configured");
        return builder;
    };

    let host = match pinning_host(base_url) {
        Ok(host) => host,
        Err(e) => {
            tracing::warn!(base_url = %base_url, error = %e, "Certificate pinning skipped");
            return builder;
        }
    };

    match provider.trust_anchors(&host) {
        Some(certificates) if !certificates.is_empty() => {
            tracing::debug!(host = %host, count = certificates.len(), "Pinning certificates");
            certificates
                .into_iter()
                .fold(builder.tls_built_in_root_certs(false), |builder, cert| {
                    builder.add_root_certificate(cert)
                })
        }
        _ => {
            tracing::debug!(host = %host, "Host is not pinned");
            builder
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PEM: &[u8] = include_bytes!("../../tests/fixtures/pinned_cert.pem");

    fn cert() -> Certificate {
        Certificate::from_pem(PEM).unwrap()
    }

    #[test]
    fn test_pinning_host() {
        assert_eq!(
            pinning_host("https://api.parley.nu/clientApi/v1.6/").unwrap(),
            "api.parley.nu"
        );
        assert!(matches!(pinning_host("not a url"), Err(Error::Url(_))));
        assert!(matches!(
            pinning_host("mailto:someone@x.test"),
            Err(Error::Pinning(_))
        ));
    }

    #[test]
    fn test_exact_host_match() {
        let pins = StaticPinSet::new().pin("api.parley.nu", vec![cert()]);
        assert_eq!(pins.len(), 1);
        assert_eq!(pins.trust_anchors("api.parley.nu").map(|c| c.len()), Some(1));
        assert_eq!(pins.trust_anchors("API.Parley.nu").map(|c| c.len()), Some(1));
        assert!(pins.trust_anchors("cdn.parley.nu").is_none());
    }

    #[test]
    fn test_subdomain_match() {
        let pins = StaticPinSet::new().pin_with_subdomains("parley.nu", vec![cert(), cert()]);
        assert_eq!(pins.trust_anchors("api.parley.nu").map(|c| c.len()), Some(2));
        assert_eq!(pins.trust_anchors("a.b.parley.nu").map(|c| c.len()), Some(2));
        assert!(pins.trust_anchors("parley.nu.evil.test").is_none());
        assert!(pins.trust_anchors("notparley.nu").is_none());
    }

    #[test]
    fn test_pins_accumulate_per_host() {
        let pins = StaticPinSet::new()
            .pin("api.parley.nu", vec![cert()])
            .pin_pem("api.parley.nu", PEM)
            .unwrap();
        assert_eq!(pins.len(), 1);
        assert_eq!(pins.trust_anchors("api.parley.nu").map(|c| c.len()), Some(2));
    }

    #[test]
    fn test_unparsable_base_url_keeps_builder() {
        let pins = StaticPinSet::new().pin("api.parley.nu", vec![cert()]);
        let provider: &dyn PinningProvider = &pins;
        let builder = apply_pinning(reqwest::Client::builder(), "::not-a-url::", Some(provider));
        assert!(builder.build().is_ok());
    }

    #[test]
    fn test_pinned_host_builds_client() {
        let pins = StaticPinSet::new().pin_pem("api.parley.test", PEM).unwrap();
        let provider: &dyn PinningProvider = &pins;
        let builder = apply_pinning(
            reqwest::Client::builder(),
            "https://api.parley.test/clientApi/v1.6/",
            Some(provider),
        );
        assert!(builder.build().is_ok());
    }

    #[test]
    fn test_pinned_subdomain_builds_client() {
        let pins = StaticPinSet::new().pin_with_subdomains("parley.test", vec![cert()]);
        let provider: &dyn PinningProvider = &pins;
        let builder = apply_pinning(reqwest::Client::builder(), "https://api.parley.test/", Some(provider));
        assert!(builder.build().is_ok());
    }

    #[test]
    fn test_unpinned_host_keeps_builder() {
        let pins = StaticPinSet::new();
        let provider: &dyn PinningProvider = &pins;
        let builder = apply_pinning(reqwest::Client::builder(), "https://x.test/", Some(provider));
        assert!(builder.build().is_ok());
    }
}
