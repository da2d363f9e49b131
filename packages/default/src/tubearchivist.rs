use crate::models::config::Settings;
use crate::models::watch_event::WatchedPayload;
use anyhow::{Context, Result};
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use tracing::{debug, info};

/// Blocking client for the TubeArchivist REST API.
#[derive(Debug, Clone)]
pub struct TubeArchivistClient {
    client: Client,
    endpoint: String,
    api_token: String,
}

impl TubeArchivistClient {
    pub fn new(settings: &Settings) -> Result<Self> {
        // reqwest's blocking client defaults to 30s; `None` turns the timeout off.
        let client = Client::builder()
            .timeout(settings.timeout)
            .build()
            .context("building HTTP client")?;

        Ok(Self {
            client,
            endpoint: settings.watched_endpoint(),
            api_token: settings.api_token.clone(),
        })
    }

    /// Marks the video `item_id` as watched.
    ///
    /// Sends `POST {url}/api/watched/` with `{"id": item_id, "is_watched": true}`. Fails on
    /// transport errors, non-2xx responses, and response bodies that are not JSON (an empty
    /// body included). The JSON itself is not inspected.
    pub fn mark_watched(&self, item_id: &str) -> Result<()> {
        let payload = serde_json::to_string(&WatchedPayload::watched(item_id))
            .context("serializing watched payload")?;

        debug!("POST {} {}", self.endpoint, payload);

        let res = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .header(AUTHORIZATION, format!("Token {}", self.api_token))
            .body(payload)
            .send()
            .with_context(|| format!("failed to send POST to {}", self.endpoint))?;

        let status = res.status();
        let body = res.text().context("reading TubeArchivist response")?;

        if !status.is_success() {
            anyhow::bail!("TubeArchivist responded with {}: {}", status, body.trim());
        }

        let _: serde_json::Value = serde_json::from_str(&body)
            .with_context(|| format!("TubeArchivist returned non-JSON body: {:?}", body.trim()))?;

        info!("marked {} as watched ({})", item_id, status);
        Ok(())
    }
}
