//! HTTP client for MRHA team pages.

use std::time::Duration;

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};
use url::Url;

use fixcal_core::constants::{DEFAULT_UPSTREAM_TIMEOUT_SECS, MRHA_TEAM_QUERY_PARAM, MRHA_TEAM_URL};
use fixcal_core::error::{FixtureError, Result};
use fixcal_core::types::TeamId;

/// Scraper configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ScraperConfig {
    /// Team page URL; the team id is appended as `?teamid=<id>`
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            base_url: MRHA_TEAM_URL.into(),
            timeout_seconds: DEFAULT_UPSTREAM_TIMEOUT_SECS,
        }
    }
}

impl ScraperConfig {
    /// Creates a config pointing at another team page URL.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }
}

/// Fetches raw team pages.
#[derive(Clone, Debug)]
pub struct MrhaClient {
    base_url: Url,
    http_client: reqwest::Client,
}

impl MrhaClient {
    /// Creates a client with custom configuration.
    pub fn with_config(config: &ScraperConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| FixtureError::ConfigError(format!("invalid base URL {:?}: {}", config.base_url, e)))?;

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| FixtureError::ConfigError(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            base_url,
            http_client,
        })
    }

    /// URL of the page listing `team`'s fixtures.
    pub fn team_url(&self, team: &TeamId) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair(MRHA_TEAM_QUERY_PARAM, team.as_str());
        url
    }

    /// Downloads the team page as text.
    ///
    /// Anything other than `200 OK` is an error.
    #[instrument(skip_all, fields(team = %team))]
    pub async fn fetch_page(&self, team: &TeamId) -> Result<String> {
        let url = self.team_url(team);

        let response = self
            .http_client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| request_error(&url, e))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(FixtureError::UpstreamStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|e| request_error(&url, e))?;
        debug!(bytes = body.len(), "Fetched team page");
        Ok(body)
    }
}

fn request_error(url: &Url, err: reqwest::Error) -> FixtureError {
    if err.is_timeout() {
        FixtureError::ConnectionTimeout(url.to_string())
    } else {
        FixtureError::HttpError(err.to_string())
    }
}
