//! The rate-limit-aware request wrapper.

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use log::{debug, warn};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};

use super::retry::{RetryPolicy, ThrottleError};
use crate::config::ClientConfig;
use crate::credentials::CredentialProvider;

/// HTTP client that transparently resends requests answered with 429.
///
/// Each call is independent: a request is built, sent, and its response
/// handed back untouched unless the server throttled it, in which case the
/// client pauses and resends an identical request until a non-429 response
/// arrives (or the [`RetryPolicy`] bound, if any, runs out). Transport
/// failures are never retried; they surface directly to the caller. Every
/// non-429 status, success or failure, is returned verbatim.
#[derive(Clone)]
pub struct RateLimitedHttpClient {
    client: Client,
    config: ClientConfig,
    retry: RetryPolicy,
    credentials: Option<Arc<dyn CredentialProvider>>,
}

impl RateLimitedHttpClient {
    /// Creates a client with the default policy: resend forever, one second
    /// between attempts.
    pub fn new(config: ClientConfig) -> Self {
        Self::with_policy(config, RetryPolicy::default())
    }

    pub fn with_policy(config: ClientConfig, retry: RetryPolicy) -> Self {
        Self {
            client: Client::new(),
            config,
            retry,
            credentials: None,
        }
    }

    /// Installs a credential provider, consulted before every send attempt.
    pub fn with_credentials(mut self, credentials: Arc<dyn CredentialProvider>) -> Self {
        self.credentials = Some(credentials);
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Returns a reference to the underlying reqwest Client.
    pub fn inner(&self) -> &Client {
        &self.client
    }

    /// Performs a GET request with `Accept: application/json`.
    #[tracing::instrument(skip(self))]
    pub async fn get(&self, endpoint: &str) -> Result<Response> {
        self.request(Method::GET, endpoint, None).await
    }

    /// Performs a POST request with JSON headers and the given payload.
    #[tracing::instrument(skip(self, payload))]
    pub async fn post(&self, endpoint: &str, payload: impl Into<Vec<u8>>) -> Result<Response> {
        self.request(Method::POST, endpoint, Some(payload.into()))
            .await
    }

    /// Performs a PUT request with JSON headers and the given payload.
    #[tracing::instrument(skip(self, payload))]
    pub async fn put(&self, endpoint: &str, payload: impl Into<Vec<u8>>) -> Result<Response> {
        self.request(Method::PUT, endpoint, Some(payload.into()))
            .await
    }

    /// Performs a DELETE request. No extra headers are sent.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, endpoint: &str) -> Result<Response> {
        self.request(Method::DELETE, endpoint, None).await
    }

    async fn request(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<Vec<u8>>,
    ) -> Result<Response> {
        let url = self.config.endpoint_url(endpoint)?;
        let started = Instant::now();
        let mut attempts: u32 = 0;

        loop {
            let request = self.build_request(&method, &url, body.as_deref()).await?;

            debug!("{} {}", method, url);
            let response = request
                .send()
                .await
                .with_context(|| format!("Failed to send {} request to {}", method, url))?;
            attempts += 1;

            if response.status() != StatusCode::TOO_MANY_REQUESTS {
                return Ok(response);
            }

            if self.retry.max_attempts.is_some_and(|max| attempts >= max) {
                warn!("Throttled on {}: giving up after {} attempts", url, attempts);
                return Err(ThrottleError::AttemptsExhausted { attempts }.into());
            }
            if self
                .retry
                .deadline
                .is_some_and(|budget| started.elapsed() + self.retry.delay > budget)
            {
                warn!("Throttled on {}: retry deadline exceeded", url);
                return Err(ThrottleError::DeadlineExceeded {
                    elapsed: started.elapsed(),
                }
                .into());
            }

            debug!("Throttled: waiting to retry request {}", url);
            tokio::time::sleep(self.retry.delay).await;
        }
    }

    /// Builds one attempt's request with method-appropriate headers:
    /// GET accepts JSON, POST/PUT additionally declare a JSON body,
    /// DELETE sends nothing extra.
    async fn build_request(
        &self,
        method: &Method,
        url: &str,
        body: Option<&[u8]>,
    ) -> Result<RequestBuilder> {
        let mut request = self.client.request(method.clone(), url);

        if *method == Method::GET {
            request = request.header(ACCEPT, "application/json");
        } else if *method == Method::POST || *method == Method::PUT {
            request = request
                .header(ACCEPT, "application/json")
                .header(CONTENT_TYPE, "application/json");
        }

        if let Some(body) = body {
            request = request.body(body.to_vec());
        }

        if let Some(credentials) = &self.credentials {
            request = credentials
                .apply(request)
                .await
                .context("Credential provider failed to prepare request")?;
        }

        Ok(request)
    }
}

impl std::fmt::Debug for RateLimitedHttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimitedHttpClient")
            .field("config", &self.config)
            .field("retry", &self.retry)
            .field("has_credentials", &self.credentials.is_some())
            .finish_non_exhaustive()
    }
}
