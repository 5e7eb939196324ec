use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};
use url::Url;

use hitfinder_core::config::ApiConfig;
use hitfinder_core::{HitFinderError, PageSource};

/// Plain HTTPS client for the MTurk host.
pub struct MturkClient {
    client: reqwest::Client,
    base_url: String,
}

impl MturkClient {
    pub fn new(config: &ApiConfig) -> Result<Self, HitFinderError> {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        Url::parse(&base_url).map_err(|e| HitFinderError::InvalidUrl(format!("{}: {}", base_url, e)))?;

        let mut builder = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .timeout(Duration::from_secs(config.request_timeout_seconds));
        if !config.user_agent.is_empty() {
            builder = builder.user_agent(config.user_agent.clone());
        }

        let client = builder
            .build()
            .map_err(|e| HitFinderError::Config(format!("http client: {}", e)))?;

        Ok(Self { client, base_url })
    }

    /// Absolute URL for a path on the configured host.
    pub fn url_for(&self, path: &str) -> Result<Url, HitFinderError> {
        let raw = format!("{}{}", self.base_url, path);
        Url::parse(&raw).map_err(|e| HitFinderError::InvalidUrl(format!("{}: {}", raw, e)))
    }
}

#[async_trait]
impl PageSource for MturkClient {
    fn name(&self) -> &str {
        "mturk"
    }

    async fn get_html(&self, path: &str) -> Result<String, HitFinderError> {
        let url = self.url_for(path)?;
        debug!(url = %url, "GET");

        let resp = self.client.get(url.as_str()).send().await.map_err(|e| {
            warn!(url = %url, error = %e, "fetch failed");
            HitFinderError::Fetch(e.to_string())
        })?;

        let status = resp.status();
        if !status.is_success() {
            warn!(url = %url, status = status.as_u16(), "unexpected status");
            return Err(HitFinderError::Fetch(format!("HTTP {}", status.as_u16())));
        }

        resp.text()
            .await
            .map_err(|e| HitFinderError::Fetch(e.to_string()))
    }
}
