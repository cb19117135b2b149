//! HTTP client for the local lofid control API.
//!
//! The daemon owns all control logic; this client only forwards intents
//! and decodes status responses.

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::json;

pub struct DaemonClient {
    client: reqwest::Client,
    base_url: String,
}

/// Playback status as reported by the service.
#[derive(Debug, Deserialize)]
pub struct StatusResponse {
    pub playing: bool,
    pub phase: String,
    pub volume: u32,
    pub url: String,
    pub last_error: Option<String>,
}

impl DaemonClient {
    pub fn new(port: u16) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: format!("http://127.0.0.1:{}", port),
        }
    }

    pub async fn toggle(&self, url: Option<&str>) -> Result<StatusResponse> {
        let response = self
            .client
            .post(format!("{}/toggle", self.base_url))
            .json(&json!({ "url": url }))
            .send()
            .await
            .context("Failed to reach the lofid service. Is it running?")?;

        Self::parse(response).await
    }

    pub async fn volume_up(&self) -> Result<StatusResponse> {
        self.volume_step("up").await
    }

    pub async fn volume_down(&self) -> Result<StatusResponse> {
        self.volume_step("down").await
    }

    async fn volume_step(&self, direction: &str) -> Result<StatusResponse> {
        let response = self
            .client
            .post(format!("{}/volume/{}", self.base_url, direction))
            .send()
            .await
            .context("Failed to reach the lofid service. Is it running?")?;

        Self::parse(response).await
    }

    pub async fn set_volume(&self, value: u32) -> Result<StatusResponse> {
        let response = self
            .client
            .put(format!("{}/volume", self.base_url))
            .json(&json!({ "value": value }))
            .send()
            .await
            .context("Failed to reach the lofid service. Is it running?")?;

        Self::parse(response).await
    }

    pub async fn status(&self) -> Result<StatusResponse> {
        let response = self
            .client
            .get(format!("{}/status", self.base_url))
            .send()
            .await
            .context("Failed to reach the lofid service. Is it running?")?;

        Self::parse(response).await
    }

    async fn parse(response: reqwest::Response) -> Result<StatusResponse> {
        let response = response
            .error_for_status()
            .context("lofid service reported an error")?;

        response
            .json::<StatusResponse>()
            .await
            .context("Failed to parse service response")
    }
}
