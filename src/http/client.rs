// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! REST client for the chat API

use std::time::Instant;

use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use super::request::Request;
use super::response::{extract_error_message, Response};
use crate::error::{Error, Result};
use crate::network::{InterceptAction, InterceptorChain};

/// REST client bound to the API base URL
///
/// Cheap to clone; clones share the connection pool.
#[derive(Clone)]
pub struct RestClient {
    client: Client,
    base_url: String,
    chain: InterceptorChain,
}

impl RestClient {
    pub(crate) fn new(client: Client, base_url: String, chain: InterceptorChain) -> Self {
        Self {
            client,
            base_url,
            chain,
        }
    }

    /// Base URL the client resolves paths against
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Number of interceptors in the chain
    pub fn interceptor_count(&self) -> usize {
        self.chain.len()
    }

    /// Resolve a path against the base URL
    pub fn url(&self, path: &str) -> Result<Url> {
        Ok(Url::parse(&self.base_url)?.join(path)?)
    }

    /// Create a request for a path relative to the base URL
    pub fn request(&self, method: Method, path: &str) -> Result<Request> {
        Ok(Request::from_url(method, self.url(path)?))
    }

    /// Execute a request through the interceptor chain
    pub async fn execute(&self, mut request: Request) -> Result<Response> {
        if let InterceptAction::Abort(reason) = self.chain.process_request(&mut request).await {
            tracing::debug!(url = %request.url, reason = %reason, "Request aborted");
            return Err(Error::Aborted(reason));
        }

        let start = Instant::now();

        let mut builder = self
            .client
            .request(request.method.clone(), request.url.clone())
            .headers(request.headers.clone());

        if let Some(ref body) = request.body {
            builder = builder.body(body.clone());
        }

        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }

        let response = match builder.send().await {
            Ok(response) => response,
            Err(e) => return Err(self.fail(&request, e).await),
        };

        let status = response.status();
        let headers = response.headers().clone();
        let final_url = response.url().clone();

        let body = match response.bytes().await {
            Ok(body) => body,
            Err(e) => return Err(self.fail(&request, e).await),
        };
        let response_time = start.elapsed().as_millis() as u64;

        let mut response = Response::new(status, headers, body, final_url, response_time);
        self.chain.process_response(&request, &mut response).await?;

        Ok(response)
    }

    async fn fail(&self, request: &Request, error: reqwest::Error) -> Error {
        let error = Error::from(error);
        self.chain.notify_error(request, &error).await;
        error
    }

    /// Execute a GET request
    pub async fn get(&self, path: &str) -> Result<Response> {
        self.execute(self.request(Method::GET, path)?).await
    }

    /// GET a path and decode the JSON body
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.call_json(self.request(Method::GET, path)?).await
    }

    /// POST a JSON body and decode the JSON response
    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.call_json(self.request(Method::POST, path)?.json(body)?)
            .await
    }

    /// Execute a request and decode the JSON body.
    ///
    /// A non-2xx response becomes [`Error::Api`] carrying the extracted error
    /// message.
    pub async fn call_json<T: DeserializeOwned>(&self, request: Request) -> Result<T> {
        let response = self.execute(request).await?;

        if !response.is_success() {
            return Err(Error::Api {
                status: response.status_code(),
                message: extract_error_message(&response),
            });
        }

        response.json()
    }
}
