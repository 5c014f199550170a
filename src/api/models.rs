use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of `POST /v0/scrape`.
#[derive(Debug, Serialize)]
pub struct ScrapeRequest {
    pub url: String,
}

impl ScrapeRequest {
    pub fn new(url: impl Into<String>) -> Self {
        ScrapeRequest { url: url.into() }
    }
}

/// The `data` object of a successful scrape payload.
#[derive(Debug, Deserialize)]
pub struct ScrapeData {
    pub content: String,
    #[serde(default)]
    pub metadata: Value,
}

impl ScrapeData {
    /// `metadata.title` when it is a string; any other shape counts as absent.
    pub fn title(&self) -> Option<&str> {
        self.metadata.get("title").and_then(Value::as_str)
    }
}

/// JSON truthiness of the payload's `success` field; a missing field is falsy.
pub fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(items)) => !items.is_empty(),
        Some(Value::Object(fields)) => !fields.is_empty(),
    }
}
