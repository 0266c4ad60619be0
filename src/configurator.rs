// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Request configuration for the chat API
//!
//! [`RequestConfigurator`] turns the current [`SdkConfig`](crate::SdkConfig)
//! into a ready [`RestClient`] or an [`AuthenticatedImageUrl`]. Nothing is
//! cached: every call reads the shared config again.

use std::fmt;
use std::sync::Arc;

use reqwest::Client;

use crate::config::SharedConfig;
use crate::error::Result;
use crate::http::{compute_headers, RestClient};
use crate::image::{AuthenticatedImageUrl, ImageKind};
use crate::network::{IdentificationInjector, InterceptorChain};
use crate::security::{apply_pinning, PinningProvider};

/// Builds configured clients and image URLs from the shared SDK config
#[derive(Clone)]
pub struct RequestConfigurator {
    config: SharedConfig,
    pinning: Option<Arc<dyn PinningProvider>>,
}

impl RequestConfigurator {
    /// Create a configurator without certificate pinning
    pub fn new(config: SharedConfig) -> Self {
        Self {
            config,
            pinning: None,
        }
    }

    /// Pin the API host through `provider`
    pub fn with_pinning<P: PinningProvider + 'static>(mut self, provider: P) -> Self {
        self.pinning = Some(Arc::new(provider));
        self
    }

    /// The shared config this configurator reads
    pub fn config(&self) -> &SharedConfig {
        &self.config
    }

    /// Build a REST client for the configured base URL.
    ///
    /// Fails only when the transport cannot be constructed. A base URL that
    /// does not parse skips pinning and fails later, per request.
    pub fn build_rest_client(&self) -> Result<RestClient> {
        let config = self.config.snapshot();

        let mut chain = InterceptorChain::new();
        chain.add(IdentificationInjector::new(self.config.clone()));
        if let Some(ref interceptor) = config.interceptor {
            chain.push(Arc::clone(interceptor));
        }

        let builder = Client::builder()
            .connect_timeout(config.timeouts.connect)
            .timeout(config.timeouts.exchange());
        let builder = apply_pinning(builder, &config.base_url, self.pinning.as_deref());
        let client = builder.build()?;

        tracing::debug!(
            base_url = %config.base_url,
            interceptors = chain.len(),
            pinning = self.pinning.is_some(),
            "Built REST client"
        );

        Ok(RestClient::new(client, config.base_url, chain))
    }

    /// Build the authenticated URL of an image
    pub fn build_image_url(&self, kind: ImageKind, id: impl fmt::Display) -> AuthenticatedImageUrl {
        let config = self.config.read();
        let url = format!("{}{}{}", config.base_url, kind.path_segment(), id);
        AuthenticatedImageUrl::new(url, compute_headers(&config))
    }
}

impl fmt::Debug for RequestConfigurator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestConfigurator")
            .field("config", &self.config)
            .field("pinning", &self.pinning.is_some())
            .finish()
    }
}
