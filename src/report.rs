use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::ProbeError;
use crate::probe::{ProbeOutcome, ProbeReport};

pub const PREVIEW_CHARS: usize = 800;
const ELLIPSIS: &str = "...";

/// First `n` characters of `s`, never splitting a code point.
pub fn first_chars(s: &str, n: usize) -> String {
    match s.char_indices().nth(n) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s.to_string(),
    }
}

/// Content preview: the first 800 characters, with `...` appended only when
/// something was cut.
pub fn preview(content: &str) -> String {
    let mut out = first_chars(content, PREVIEW_CHARS);
    if out.len() < content.len() {
        out.push_str(ELLIPSIS);
    }
    out
}

pub fn render_text(report: &ProbeReport) -> String {
    let mut lines = vec![format!("Probing: {}", report.page_url), "-".repeat(50)];

    if let Some(status) = report.http_status {
        lines.push(format!("HTTP status: {}", status));
    }

    let response_time = format!("Response time: {} ms", report.elapsed.as_millis());
    match &report.outcome {
        ProbeOutcome::Success(page) => lines.extend([
            "✅ Scrape succeeded!".to_string(),
            format!("Page title: {}", page.title),
            format!("Content length: {} chars", page.content.chars().count()),
            response_time,
            "Content preview:".to_string(),
            "-".repeat(30),
            preview(&page.content),
        ]),
        ProbeOutcome::Failure(err) => {
            let line = match err {
                ProbeError::Timeout(_) => "❌ Request timed out".to_string(),
                ProbeError::HttpStatus { status, body } => format!("❌ HTTP error {}: {}", status, body),
                ProbeError::Payload(payload) => format!("❌ Scrape failed: {}", payload),
                other => format!("❌ {}", other),
            };
            lines.extend([line, response_time]);
        }
    }

    lines.join("\n")
}

#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub probed_at: DateTime<Utc>,
    pub endpoint: &'a str,
    pub page_url: &'a str,
    pub http_status: Option<u16>,
    pub elapsed_ms: u64,
    pub success: bool,
    pub title: Option<&'a str>,
    pub content_length: Option<usize>,
    pub content_preview: Option<String>,
    pub failure_kind: Option<&'static str>,
    pub detail: Option<String>,
}

pub fn render_json(report: &ProbeReport) -> serde_json::Value {
    let mut json = JsonReport {
        probed_at: report.probed_at,
        endpoint: &report.endpoint,
        page_url: &report.page_url,
        http_status: report.http_status,
        elapsed_ms: u64::try_from(report.elapsed.as_millis()).unwrap_or(u64::MAX),
        success: report.outcome.is_success(),
        title: None,
        content_length: None,
        content_preview: None,
        failure_kind: None,
        detail: None,
    };

    match &report.outcome {
        ProbeOutcome::Success(page) => {
            json.title = Some(page.title.as_str());
            json.content_length = Some(page.content.chars().count());
            json.content_preview = Some(preview(&page.content));
        }
        ProbeOutcome::Failure(err) => {
            json.failure_kind = Some(err.kind().as_str());
            json.detail = Some(err.detail());
        }
    }

    serde_json::to_value(json).unwrap_or(serde_json::Value::Null)
}
