//! Extension point for request authentication.

use anyhow::Result;
use async_trait::async_trait;
use reqwest::RequestBuilder;

/// Attaches credentials to an outgoing request.
///
/// The API currently accepts unauthenticated requests, so no provider is
/// installed by default and no auth header is sent. The seam exists so a
/// token or cookie scheme can be plugged in later without touching the
/// request plumbing. Providers are consulted once per send attempt, so a
/// refreshed token is picked up between retries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    async fn apply(&self, request: RequestBuilder) -> Result<RequestBuilder>;
}
