// src/upstream.rs
use std::time::Duration;

use log::debug;

use crate::config::Config;
use crate::utils::ApiError;

/// Raw upstream response: HTTP status plus undecoded body text. Everything
/// past this boundary is pure and synchronous, which is also what the tests
/// inject instead of a live socket.
#[derive(Debug, Clone)]
pub struct RawPayload {
    pub status: u16,
    pub body: String,
}

impl RawPayload {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// HTTP client for the TES3MP master server.
pub struct MasterClient {
    http: reqwest::Client,
    url: String,
}

impl MasterClient {
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.fetch_timeout_secs))
            .build()?;
        Ok(Self {
            http,
            url: config.master_server_url.clone(),
        })
    }

    /// Fetches the master-server document without decoding it. A non-2xx
    /// status comes back as a payload, not an error; transport failures
    /// (timeout included) map to `ApiError::UpstreamUnavailable`.
    pub async fn fetch_raw(&self) -> Result<RawPayload, ApiError> {
        debug!("Fetching server list from {}", self.url);

        let response = self
            .http
            .get(&self.url)
            .header("User-Agent", "Nerevar-API/1.0")
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| ApiError::UpstreamUnavailable(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::UpstreamUnavailable(e.to_string()))?;

        debug!("Master server returned {} with {} characters", status, body.len());
        Ok(RawPayload { status, body })
    }
}
