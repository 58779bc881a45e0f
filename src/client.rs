// src/client.rs
//! HTTP client for the job-search service - read-only JSON endpoints

use anyhow::{Context, Result};
use tracing::{error, info};

use crate::config::ApiConfig;
use crate::types::job::{JobPostingRow, SearchResponse};
use crate::types::query::JobFilter;

const SEARCH_ENDPOINT: &str = "/jobs/search";
const POSTINGS_ENDPOINT: &str = "/job_postings";
const HEALTH_ENDPOINT: &str = "/healthz";

pub struct SearchClient {
    client: reqwest::Client,
    base_url: String,
}

impl SearchClient {
    /// Create a client for the configured service address.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    /// One search round trip. The filter decides which query parameters are
    /// sent; empty fields never reach the wire.
    pub async fn search(&self, filter: &JobFilter) -> Result<SearchResponse> {
        let url = self.endpoint_url(SEARCH_ENDPOINT);

        info!("Searching postings: {}", url);

        let response = self
            .client
            .get(&url)
            .query(&filter.query_pairs())
            .send()
            .await
            .context("Failed to reach the search service")?;

        let status = response.status();
        if status.is_success() {
            response
                .json::<SearchResponse>()
                .await
                .context("Failed to parse search response")
        } else {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());

            error!("Search service error response: {}", error_text);
            anyhow::bail!("Search failed with status {}: {}", status, error_text)
        }
    }

    /// Most recently discovered postings, optionally narrowed to one
    /// lifecycle status. The server caps `limit` at 200.
    pub async fn recent(&self, status: Option<&str>, limit: u32) -> Result<Vec<JobPostingRow>> {
        let url = self.endpoint_url(POSTINGS_ENDPOINT);

        let mut pairs: Vec<(&str, String)> = Vec::new();
        if let Some(s) = status {
            if !s.is_empty() {
                pairs.push(("status", s.to_string()));
            }
        }
        pairs.push(("limit", limit.to_string()));

        info!("Listing recent postings: {}", url);

        let response = self
            .client
            .get(&url)
            .query(&pairs)
            .send()
            .await
            .context("Failed to reach the search service")?;

        let http_status = response.status();
        if http_status.is_success() {
            response
                .json::<Vec<JobPostingRow>>()
                .await
                .context("Failed to parse posting list")
        } else {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());

            error!("Posting list error response: {}", error_text);
            anyhow::bail!("Listing failed with status {}: {}", http_status, error_text)
        }
    }

    /// Liveness probe. True when the service answers `{"ok": true}`.
    pub async fn healthz(&self) -> Result<bool> {
        let url = self.endpoint_url(HEALTH_ENDPOINT);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .context("Failed to reach the search service")?;

        let status = response.status();
        if status.is_success() {
            let body: serde_json::Value = response
                .json()
                .await
                .context("Failed to parse health response")?;
            Ok(body["ok"].as_bool().unwrap_or(false))
        } else {
            anyhow::bail!("Health check failed with status {}", status)
        }
    }

    fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_urls_join_without_double_slash() {
        let config = ApiConfig::new("http://localhost:8000/");
        let client = SearchClient::new(&config).unwrap();
        assert_eq!(
            client.endpoint_url(SEARCH_ENDPOINT),
            "http://localhost:8000/jobs/search"
        );
        assert_eq!(
            client.endpoint_url(HEALTH_ENDPOINT),
            "http://localhost:8000/healthz"
        );
    }

    #[test]
    fn test_client_keeps_configured_base() {
        let config = ApiConfig::new("https://funnel.internal.example:8443");
        let client = SearchClient::new(&config).unwrap();
        assert_eq!(
            client.endpoint_url(POSTINGS_ENDPOINT),
            "https://funnel.internal.example:8443/job_postings"
        );
    }
}
