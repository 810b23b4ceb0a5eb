//! Async HTTP client wrapping the DMA survey JSON API.

use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use dma_core::{analytics::Analytics, response::Receipt, survey::SurveyForm};
use reqwest::{Client, Response};

/// Connection settings for the survey API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  pub base_url: String,
}

/// Async HTTP client for the survey JSON REST API.
///
/// Cheap to clone; the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
  client: Client,
  config: ApiConfig,
}

impl ApiClient {
  pub fn new(config: ApiConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(10))
      .build()
      .context("failed to build HTTP client")?;
    Ok(Self { client, config })
  }

  fn url(&self, path: &str) -> String {
    format!(
      "{}/api{}",
      self.config.base_url.trim_end_matches('/'),
      path
    )
  }

  /// `POST /api/responses`
  pub async fn submit(&self, form: &SurveyForm) -> Result<Receipt> {
    let resp = self
      .client
      .post(self.url("/responses"))
      .json(form)
      .send()
      .await
      .context("POST /responses failed")?;

    if !resp.status().is_success() {
      return Err(error_from(resp, "POST /responses").await);
    }
    resp.json().await.context("deserialising receipt")
  }

  /// `GET /api/analytics`
  pub async fn analytics(&self) -> Result<Analytics> {
    let resp = self
      .client
      .get(self.url("/analytics"))
      .send()
      .await
      .context("GET /analytics failed")?;

    if !resp.status().is_success() {
      return Err(error_from(resp, "GET /analytics").await);
    }
    resp.json().await.context("deserialising analytics")
  }
}

/// Turn a non-success response into an error carrying the server's
/// `{"error": ...}` message when there is one.
async fn error_from(resp: Response, what: &str) -> anyhow::Error {
  let status = resp.status();
  let message = resp
    .json::<serde_json::Value>()
    .await
    .ok()
    .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_owned));
  match message {
    Some(m) => anyhow!("{what} → {status}: {m}"),
    None => anyhow!("{what} → {status}"),
  }
}
