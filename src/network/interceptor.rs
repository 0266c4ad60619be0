// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Request/Response interceptors
//!
//! Interceptors run in insertion order. The identification step is always
//! first, a host-supplied interceptor runs after it, right before the request
//! is handed to the transport.

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::{SharedConfig, ENV_LOG_ERROR_BODIES};
use crate::error::{Error, Result};
use crate::http::{apply_headers, compute_headers, Request, Response};

/// Request interceptor trait
///
/// # Example
///
/// ```rust,no_run
/// use parley_net::network::{RequestInterceptor, InterceptAction};
/// use parley_net::http::Request;
/// use async_trait::async_trait;
///
/// struct AppVersion;
///
/// #[async_trait]
/// impl RequestInterceptor for AppVersion {
///     async fn before_request(&self, req: &mut Request) -> InterceptAction {
///         req.headers.insert("x-app-version", "3.1.0".parse().unwrap());
///         InterceptAction::Continue
///     }
/// }
/// ```
#[async_trait]
pub trait RequestInterceptor: Send + Sync {
    /// Called before a request is sent
    ///
    /// Can modify the request or abort it entirely.
    async fn before_request(&self, _request: &mut Request) -> InterceptAction {
        InterceptAction::Continue
    }

    /// Called after a response is received
    async fn after_response(&self, _request: &Request, _response: &mut Response) -> Result<()> {
        Ok(())
    }

    /// Called when the transport fails
    async fn on_error(&self, _request: &Request, _error: &Error) {}
}

/// Action to take after interception
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InterceptAction {
    /// Continue with the (possibly modified) request
    Continue,
    /// Abort the request with an error
    Abort(String),
}

/// Adds the configured, identification and authorization headers
///
/// Reads the shared config for every request. Aborts the request when the
/// identification or authorization header cannot be encoded.
pub struct IdentificationInjector {
    config: SharedConfig,
}

impl IdentificationInjector {
    pub fn new(config: SharedConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl RequestInterceptor for IdentificationInjector {
    async fn before_request(&self, request: &mut Request) -> InterceptAction {
        let entries = compute_headers(&self.config.read());
        match apply_headers(&mut request.headers, &entries) {
            Ok(()) => InterceptAction::Continue,
            Err(e) => {
                tracing::error!(url = %request.url, error = %e, "Cannot identify request");
                InterceptAction::Abort(e.to_string())
            }
        }
    }
}

/// Interceptor backed by a plain closure
pub struct FnInterceptor<F> {
    f: F,
}

/// Wrap a request-transform closure as an interceptor
pub fn interceptor_fn<F>(f: F) -> FnInterceptor<F>
where
    F: Fn(&mut Request) -> InterceptAction + Send + Sync,
{
    FnInterceptor { f }
}

#[async_trait]
impl<F> RequestInterceptor for FnInterceptor<F>
where
    F: Fn(&mut Request) -> InterceptAction + Send + Sync,
{
    async fn before_request(&self, request: &mut Request) -> InterceptAction {
        (self.f)(request)
    }
}

/// Request logger interceptor
#[derive(Debug, Default)]
pub struct RequestLogger {
    /// Log response bodies of failed requests
    pub log_error_bodies: bool,
}

impl RequestLogger {
    /// Logger configured from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Logger configured from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let log_error_bodies = lookup(ENV_LOG_ERROR_BODIES)
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);
        Self { log_error_bodies }
    }
}

#[async_trait]
impl RequestInterceptor for RequestLogger {
    async fn before_request(&self, request: &mut Request) -> InterceptAction {
        tracing::info!(
            method = %request.method,
            url = %request.url,
            "Request"
        );
        InterceptAction::Continue
    }

    async fn after_response(&self, request: &Request, response: &mut Response) -> Result<()> {
        tracing::info!(
            url = %request.url,
            status = %response.status,
            time_ms = response.response_time_ms,
            "Response"
        );

        if self.log_error_bodies && !response.is_success() {
            tracing::debug!(body = %response.text_lossy(), "Error body");
        }

        Ok(())
    }

    async fn on_error(&self, request: &Request, error: &Error) {
        tracing::warn!(url = %request.url, error = %error, "Request failed");
    }
}

/// Interceptor chain - runs interceptors in insertion order
#[derive(Clone, Default)]
pub struct InterceptorChain {
    interceptors: Vec<Arc<dyn RequestInterceptor>>,
}

impl InterceptorChain {
    /// Create a new empty chain
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an interceptor
    pub fn add<I: RequestInterceptor + 'static>(&mut self, interceptor: I) {
        self.interceptors.push(Arc::new(interceptor));
    }

    /// Add an already shared interceptor
    pub fn push(&mut self, interceptor: Arc<dyn RequestInterceptor>) {
        self.interceptors.push(interceptor);
    }

    /// Number of interceptors
    pub fn len(&self) -> usize {
        self.interceptors.len()
    }

    /// Whether the chain is empty
    pub fn is_empty(&self) -> bool {
        self.interceptors.is_empty()
    }

    /// Process request through all interceptors, stopping at the first abort
    pub async fn process_request(&self, request: &mut Request) -> InterceptAction {
        for interceptor in &self.interceptors {
            match interceptor.before_request(request).await {
                InterceptAction::Continue => continue,
                action => return action,
            }
        }
        InterceptAction::Continue
    }

    /// Process response through all interceptors
    pub async fn process_response(&self, request: &Request, response: &mut Response) -> Result<()> {
        for interceptor in &self.interceptors {
            interceptor.after_response(request, response).await?;
        }
        Ok(())
    }

    /// Notify interceptors of an error
    pub async fn notify_error(&self, request: &Request, error: &Error) {
        for interceptor in &self.interceptors {
            interceptor.on_error(request, error).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SdkConfig;
    use crate::http::HEADER_IDENTIFICATION;

    fn shared() -> SharedConfig {
        SharedConfig::new(SdkConfig::new("https://x.test/", "s", "d").header("x-tenant", "acme"))
    }

    #[test]
    fn test_identification_injector_reads_current_config() {
        let config = shared();
        let injector = IdentificationInjector::new(config.clone());

        let mut first = Request::get("https://x.test/messages").unwrap();
        tokio_test::block_on(injector.before_request(&mut first));
        assert_eq!(first.header_str(HEADER_IDENTIFICATION), Some("s:d"));
        assert!(first.header_str("authorization").is_none());

        config.set_user_authorization(Some("tok".to_string()));

        let mut second = Request::get("https://x.test/messages").unwrap();
        tokio_test::block_on(injector.before_request(&mut second));
        assert_eq!(second.header_str("authorization"), Some("tok"));
        assert_eq!(second.header_str("x-tenant"), Some("acme"));
    }

    #[test]
    fn test_unencodable_identification_aborts() {
        let config = SharedConfig::new(SdkConfig::new("https://x.test/", "sec\nret", "d"));
        let injector = IdentificationInjector::new(config);

        let mut req = Request::get("https://x.test/messages").unwrap();
        let action = tokio_test::block_on(injector.before_request(&mut req));
        assert!(
            matches!(action, InterceptAction::Abort(ref reason) if reason.contains(HEADER_IDENTIFICATION))
        );
    }

    #[test]
    fn test_request_logger_error_body_switch() {
        assert!(!RequestLogger::from_lookup(|_| None).log_error_bodies);
        assert!(RequestLogger::from_lookup(|_| Some("TRUE".to_string())).log_error_bodies);
        assert!(RequestLogger::from_lookup(|_| Some("1".to_string())).log_error_bodies);
        assert!(!RequestLogger::from_lookup(|_| Some("off".to_string())).log_error_bodies);
    }

    #[test]
    fn test_chain_runs_in_order() {
        let mut chain = InterceptorChain::new();
        chain.add(IdentificationInjector::new(shared()));
        chain.add(interceptor_fn(|req: &mut Request| {
            // sees the identification header added by the previous step
            let seen = req.header_str(HEADER_IDENTIFICATION).unwrap_or("none").to_string();
            req.headers.insert("x-seen", seen.parse().unwrap());
            InterceptAction::Continue
        }));
        assert_eq!(chain.len(), 2);

        let mut req = Request::get("https://x.test/").unwrap();
        let action = tokio_test::block_on(chain.process_request(&mut req));
        assert_eq!(action, InterceptAction::Continue);
        assert_eq!(req.header_str("x-seen"), Some("s:d"));
    }

    #[test]
    fn test_chain_stops_on_abort() {
        let mut chain = InterceptorChain::new();
        chain.add(interceptor_fn(|_: &mut Request| InterceptAction::Abort("offline".into())));
        chain.add(IdentificationInjector::new(shared()));

        let mut req = Request::get("https://x.test/").unwrap();
        let action = tokio_test::block_on(chain.process_request(&mut req));
        assert_eq!(action, InterceptAction::Abort("offline".to_string()));
        assert!(req.header_str(HEADER_IDENTIFICATION).is_none());
    }
}
