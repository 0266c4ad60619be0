// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! SDK network configuration
//!
//! [`SdkConfig`] is owned by the host application. The networking layer only
//! reads it, through a [`SharedConfig`] handle, at the moment a header set or
//! client is built, so updates (e.g. a new user token) apply on next use.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::{RwLock, RwLockReadGuard};

use crate::error::{Error, Result};
use crate::network::RequestInterceptor;

/// Environment variable holding the API base URL
pub const ENV_BASE_URL: &str = "PARLEY_BASE_URL";
/// Environment variable holding the application secret
pub const ENV_SECRET: &str = "PARLEY_SECRET";
/// Environment variable holding the device identifier
pub const ENV_DEVICE_ID: &str = "PARLEY_DEVICE_ID";
/// Environment variable holding the user authorization token
pub const ENV_AUTHORIZATION: &str = "PARLEY_AUTHORIZATION";
/// Environment variable holding extra headers as `name:value,name:value`
pub const ENV_HEADERS: &str = "PARLEY_HEADERS";
/// Environment variable switching on error body logging (`1`, `true`, `yes`)
pub const ENV_LOG_ERROR_BODIES: &str = "PARLEY_LOG_ERROR_BODIES";

/// Default connect/read/write timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Transport timeouts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransportTimeouts {
    pub connect: Duration,
    pub read: Duration,
    pub write: Duration,
}

impl Default for TransportTimeouts {
    fn default() -> Self {
        Self {
            connect: DEFAULT_TIMEOUT,
            read: DEFAULT_TIMEOUT,
            write: DEFAULT_TIMEOUT,
        }
    }
}

impl TransportTimeouts {
    /// Deadline for a whole request/response exchange.
    ///
    /// reqwest has no separate read and write timeouts, so the longer of the
    /// two bounds the exchange.
    pub fn exchange(&self) -> Duration {
        self.read.max(self.write)
    }
}

/// Network configuration of the SDK
#[derive(Clone)]
pub struct SdkConfig {
    /// Base URL of the chat API, including the trailing slash
    pub base_url: String,
    /// Additional headers, sent in this order
    pub headers: Vec<(String, String)>,
    /// Application secret
    pub secret: String,
    /// Unique device identifier
    pub device_id: String,
    /// User authorization token
    pub user_authorization: Option<String>,
    /// Host-supplied interceptor, runs after header injection
    pub interceptor: Option<Arc<dyn RequestInterceptor>>,
    /// Transport timeouts
    ///
    /// Read and write are not enforced per socket operation: the longer of the
    /// two bounds the whole exchange (see [`TransportTimeouts::exchange`]), so
    /// a response that takes longer than that fails even while data flows.
    pub timeouts: TransportTimeouts,
}

impl SdkConfig {
    /// Create a new config
    pub fn new(
        base_url: impl Into<String>,
        secret: impl Into<String>,
        device_id: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            headers: Vec::new(),
            secret: secret.into(),
            device_id: device_id.into(),
            user_authorization: None,
            interceptor: None,
            timeouts: TransportTimeouts::default(),
        }
    }

    /// Add an additional header
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Set the user authorization token
    pub fn user_authorization(mut self, token: impl Into<String>) -> Self {
        self.user_authorization = Some(token.into());
        self
    }

    /// Set the custom interceptor
    pub fn interceptor<I: RequestInterceptor + 'static>(mut self, interceptor: I) -> Self {
        self.interceptor = Some(Arc::new(interceptor));
        self
    }

    /// Set transport timeouts, see [`SdkConfig::timeouts`]
    pub fn timeouts(mut self, timeouts: TransportTimeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    /// Identification header value, `secret:device_id`
    pub fn identification(&self) -> String {
        format!("{}:{}", self.secret, self.device_id)
    }

    /// Load the config from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load the config from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.is_empty())
                .ok_or_else(|| Error::config(format!("{} is not set", key)))
        };

        let mut config = Self::new(
            required(ENV_BASE_URL)?,
            required(ENV_SECRET)?,
            required(ENV_DEVICE_ID)?,
        );

        config.user_authorization = lookup(ENV_AUTHORIZATION).filter(|v| !v.is_empty());

        if let Some(raw) = lookup(ENV_HEADERS) {
            config.headers = parse_header_list(&raw)?;
        }

        Ok(config)
    }
}

impl fmt::Debug for SdkConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SdkConfig")
            .field("base_url", &self.base_url)
            .field("headers", &self.headers)
            .field("secret", &"<redacted>")
            .field("device_id", &self.device_id)
            .field(
                "user_authorization",
                &self.user_authorization.as_ref().map(|_| "<redacted>"),
            )
            .field("interceptor", &self.interceptor.is_some())
            .field("timeouts", &self.timeouts)
            .finish()
    }
}

/// Parse `name:value,name:value` into an ordered header list
fn parse_header_list(raw: &str) -> Result<Vec<(String, String)>> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let (name, value) = entry
                .split_once(':')
                .ok_or_else(|| Error::config(format!("malformed header entry '{}'", entry)))?;
            Ok((name.trim().to_string(), value.trim().to_string()))
        })
        .collect()
}

/// Shared, host-owned handle to the [`SdkConfig`]
#[derive(Clone)]
pub struct SharedConfig {
    inner: Arc<RwLock<SdkConfig>>,
}

impl SharedConfig {
    /// Wrap a config
    pub fn new(config: SdkConfig) -> Self {
        Self {
            inner: Arc::new(RwLock::new(config)),
        }
    }

    /// Borrow the current config
    pub fn read(&self) -> RwLockReadGuard<'_, SdkConfig> {
        self.inner.read()
    }

    /// Clone the current config
    pub fn snapshot(&self) -> SdkConfig {
        self.inner.read().clone()
    }

    /// Mutate the config in place
    pub fn update<F: FnOnce(&mut SdkConfig)>(&self, f: F) {
        f(&mut self.inner.write());
    }

    /// Set or clear the user authorization token
    pub fn set_user_authorization(&self, token: Option<String>) {
        self.inner.write().user_authorization = token;
    }
}

impl From<SdkConfig> for SharedConfig {
    fn from(config: SdkConfig) -> Self {
        Self::new(config)
    }
}

impl fmt::Debug for SharedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SharedConfig").field(&*self.inner.read()).finish()
    }
}
