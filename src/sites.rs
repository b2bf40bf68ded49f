//! The "site" resource and typed operations over it.

use anyhow::{Context, Result};
use reqwest::Response;
use serde::{Deserialize, Serialize};

use crate::http::RateLimitedHttpClient;

/// A named location record with geocoordinates and address fields.
///
/// Latitude and longitude travel as strings, matching the backend's wire
/// format.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Site {
    pub slug: String,
    pub name: String,
    pub locale: String,

    pub lat: String,
    pub lon: String,
    pub gplace_id: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip: String,
}

/// Typed access to the sites collection.
///
/// Create, update, and delete hand the raw response back so the caller can
/// judge the status code itself; describe and list parse the body.
pub struct Sites {
    pub client: RateLimitedHttpClient,
}

impl Sites {
    pub fn new(client: RateLimitedHttpClient) -> Self {
        Self { client }
    }

    #[tracing::instrument(skip(self, site))]
    pub async fn create(&self, site: &Site) -> Result<Response> {
        let payload = serde_json::to_vec(site).context("Failed to serialize site")?;
        self.client.post("/sites/", payload).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, slug: &str) -> Result<Response> {
        self.client.delete(&format!("/sites/{}/", slug)).await
    }

    #[tracing::instrument(skip(self, site))]
    pub async fn update(&self, slug: &str, site: &Site) -> Result<Response> {
        let payload = serde_json::to_vec(site).context("Failed to serialize site")?;
        self.client.put(&format!("/sites/{}/", slug), payload).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn describe(&self, slug: &str) -> Result<Site> {
        let response = self.client.get(&format!("/sites/{}/", slug)).await?;
        let site = response
            .error_for_status()
            .with_context(|| format!("Failed to describe site {}", slug))?
            .json::<Site>()
            .await
            .context("Failed to parse site response")?;
        Ok(site)
    }

    #[tracing::instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Site>> {
        let response = self.client.get("/sites/").await?;
        let sites = response
            .error_for_status()
            .context("Failed to list sites")?
            .json::<Vec<Site>>()
            .await
            .context("Failed to parse sites response")?;
        Ok(sites)
    }
}
