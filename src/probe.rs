use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use reqwest::{Client, ClientBuilder, Response};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::api::models::{is_truthy, ScrapeData, ScrapeRequest};
use crate::config::{Config, DEFAULT_TIMEOUT_SECS};
use crate::error::{ProbeError, Result};
use crate::report::{first_chars, render_text};

/// Title reported when the payload carries no `data.metadata.title`.
pub const NO_TITLE: &str = "no title";

/// How much of a non-200 body is kept as the failure detail.
pub const STATUS_DETAIL_CHARS: usize = 200;

#[derive(Debug, Clone, PartialEq)]
pub struct ScrapedPage {
    pub title: String,
    pub content: String,
}

#[derive(Debug)]
pub enum ProbeOutcome {
    Success(ScrapedPage),
    Failure(ProbeError),
}

impl ProbeOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ProbeOutcome::Success(_))
    }

    pub fn exit_code(&self) -> u8 {
        if self.is_success() { 0 } else { 1 }
    }
}

/// Everything observed during one probe.
#[derive(Debug)]
pub struct ProbeReport {
    pub endpoint: String,
    pub page_url: String,
    pub http_status: Option<u16>,
    pub elapsed: Duration,
    pub probed_at: DateTime<Utc>,
    pub outcome: ProbeOutcome,
}

pub struct ProbeRunner {
    client: Client,
    endpoint: String,
    timeout: Duration,
    api_key: Option<String>,
}

impl ProbeRunner {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self> {
        reqwest::Url::parse(endpoint)
            .map_err(|e| ProbeError::ConfigError(format!("Invalid endpoint '{}': {}", endpoint, e)))?;

        let client = ClientBuilder::new()
            .timeout(timeout)
            .build()
            .map_err(|e| ProbeError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(ProbeRunner {
            client,
            endpoint: endpoint.to_string(),
            timeout,
            api_key: None,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let runner = Self::new(&config.endpoint, config.timeout)?;
        Ok(match &config.api_key {
            Some(key) => runner.with_api_key(key),
            None => runner,
        })
    }

    /// Sends `Authorization: Bearer <key>` with the probe.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Performs exactly one scrape request and classifies the result.
    pub async fn probe(&self, page_url: &str) -> ProbeReport {
        let probed_at = Utc::now();
        let start = Instant::now();
        debug!(endpoint = %self.endpoint, page_url, timeout = ?self.timeout, "sending scrape probe");

        let mut http_status = None;
        let result = match self.send(page_url).await {
            Ok(response) => {
                let status = response.status().as_u16();
                http_status = Some(status);
                match response.text().await {
                    Ok(body) => interpret_response(status, &body),
                    Err(e) => Err(ProbeError::from(e)),
                }
            }
            Err(e) => Err(e),
        };

        let elapsed = start.elapsed();
        let outcome = match result {
            Ok(page) => {
                info!(elapsed = ?elapsed, content_chars = page.content.chars().count(), "probe succeeded");
                ProbeOutcome::Success(page)
            }
            Err(err) => {
                let err = err.with_timeout(self.timeout);
                warn!(elapsed = ?elapsed, kind = err.kind().as_str(), "probe failed: {}", err);
                ProbeOutcome::Failure(err)
            }
        };

        ProbeReport {
            endpoint: self.endpoint.clone(),
            page_url: page_url.to_string(),
            http_status,
            elapsed,
            probed_at,
            outcome,
        }
    }

    async fn send(&self, page_url: &str) -> Result<Response> {
        let mut request = self
            .client
            .post(&self.endpoint)
            .json(&ScrapeRequest::new(page_url));

        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        Ok(request.send().await?)
    }
}

/// Classifies a received response. Only a 200 whose payload has a truthy
/// `success` and a `data.content` string counts as a scraped page.
pub fn interpret_response(status: u16, body: &str) -> Result<ScrapedPage> {
    if status != 200 {
        return Err(ProbeError::HttpStatus {
            status,
            body: first_chars(body, STATUS_DETAIL_CHARS),
        });
    }

    let payload: Value = serde_json::from_str(body)
        .map_err(|e| ProbeError::MalformedPayload(format!("response is not valid JSON: {}", e)))?;

    if !is_truthy(payload.get("success")) {
        return Err(ProbeError::Payload(payload));
    }

    let data = payload
        .get("data")
        .ok_or_else(|| ProbeError::MalformedPayload("payload has no data field".to_string()))?;
    let data = ScrapeData::deserialize(data)
        .map_err(|e| ProbeError::MalformedPayload(format!("invalid data field: {}", e)))?;

    let title = data.title().unwrap_or(NO_TITLE).to_string();
    Ok(ScrapedPage {
        title,
        content: data.content,
    })
}

/// Probes `target_endpoint` once with the default timeout, prints the
/// summary to stdout and returns the outcome.
pub async fn run_probe(target_endpoint: &str, page_url: &str) -> ProbeOutcome {
    let runner = match ProbeRunner::new(target_endpoint, Duration::from_secs(DEFAULT_TIMEOUT_SECS)) {
        Ok(runner) => runner,
        Err(err) => {
            println!("❌ {}", err);
            return ProbeOutcome::Failure(err);
        }
    };

    let report = runner.probe(page_url).await;
    println!("{}", render_text(&report));
    report.outcome
}
