//! Transit backend HTTP client.
//!
//! Provides async methods for the backend's itinerary and station endpoints.
//! Every response body goes through the same status handling and envelope
//! unwrapping before it is decoded.

use serde::de::DeserializeOwned;
use tracing::debug;

use super::envelope::decode_payload;
use super::error::BackendError;
use super::query::{CanonicalQuery, LegacyQuery};
use super::types::{BusLine, ItineraryResponse, RawItineraryResponse, Stop};

/// Default base URL for the transit backend.
const DEFAULT_BASE_URL: &str = "https://tobis-backend.onrender.com";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the backend client.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Base URL for the API (defaults to the production backend)
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl BackendConfig {
    /// Set a custom base URL (for testing or staging).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Transit backend API client.
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    /// Create a new client with the given configuration.
    pub fn new(config: BackendConfig) -> Result<Self, BackendError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch itineraries from the legacy single-ride endpoint.
    pub async fn legacy_itinerary(
        &self,
        query: &LegacyQuery,
    ) -> Result<ItineraryResponse, BackendError> {
        let raw: RawItineraryResponse = self.get_json("/itinerary/routes", &query.params()).await?;
        ItineraryResponse::from_raw(raw)
    }

    /// Fetch itineraries from the canonical multi-step endpoint.
    pub async fn canonical_itinerary(
        &self,
        query: &CanonicalQuery,
    ) -> Result<ItineraryResponse, BackendError> {
        let raw: RawItineraryResponse =
            self.get_json("/itinerary/v2/routes", &query.params()).await?;
        ItineraryResponse::from_raw(raw)
    }

    /// All transit lines.
    pub async fn lines(&self) -> Result<Vec<BusLine>, BackendError> {
        self.get_json("/station/lines", &[]).await
    }

    /// One line by id, picked out of the full list.
    ///
    /// The backend has no single-line endpoint.
    pub async fn find_line(&self, line_id: u32) -> Result<Option<BusLine>, BackendError> {
        let lines = self.lines().await?;
        Ok(lines.into_iter().find(|line| line.id == line_id))
    }

    /// Stops served by a line, in route order.
    pub async fn stops_by_line(&self, line_id: u32) -> Result<Vec<Stop>, BackendError> {
        self.get_json("/station/stops", &[("line_id", line_id.to_string())])
            .await
    }

    /// Plain-text health check of the backend root.
    pub async fn health(&self) -> Result<String, BackendError> {
        let response = self.http.get(&self.base_url).send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(BackendError::Upstream {
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }

    /// GET a path, check the status, and decode the (possibly enveloped) body.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, BackendError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, ?params, "backend request");

        let response = self.http.get(&url).query(params).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        debug!(%url, bytes = body.len(), "backend response");
        decode_payload(&body)
    }
}
