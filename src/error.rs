use std::time::Duration;

/// Coarse classification of a failed probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    HttpStatus,
    PayloadFailure,
    Timeout,
    Transport,
    Config,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::HttpStatus => "http_status",
            FailureKind::PayloadFailure => "payload_failure",
            FailureKind::Timeout => "timeout",
            FailureKind::Transport => "transport",
            FailureKind::Config => "config",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    #[error("Request error: {0}")]
    Transport(String),

    #[error("HTTP error {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Scrape failed: {0}")]
    Payload(serde_json::Value),

    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl ProbeError {
    pub fn kind(&self) -> FailureKind {
        match self {
            ProbeError::Timeout(_) => FailureKind::Timeout,
            ProbeError::Transport(_) => FailureKind::Transport,
            ProbeError::HttpStatus { .. } => FailureKind::HttpStatus,
            ProbeError::Payload(_) | ProbeError::MalformedPayload(_) => FailureKind::PayloadFailure,
            ProbeError::ConfigError(_) => FailureKind::Config,
        }
    }

    /// The failure detail without the variant prefix.
    pub fn detail(&self) -> String {
        match self {
            ProbeError::Timeout(after) => format!("no response within {:?}", after),
            ProbeError::Transport(msg)
            | ProbeError::MalformedPayload(msg)
            | ProbeError::ConfigError(msg) => msg.clone(),
            ProbeError::HttpStatus { body, .. } => body.clone(),
            ProbeError::Payload(payload) => payload.to_string(),
        }
    }
}

// The client timeout is not carried by reqwest's error, so callers that know
// the bound replace the zero duration via `with_timeout`.
impl From<reqwest::Error> for ProbeError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ProbeError::Timeout(Duration::ZERO)
        } else {
            ProbeError::Transport(err.to_string())
        }
    }
}

impl ProbeError {
    pub(crate) fn with_timeout(self, timeout: Duration) -> Self {
        match self {
            ProbeError::Timeout(_) => ProbeError::Timeout(timeout),
            other => other,
        }
    }
}

pub type Result<T> = std::result::Result<T, ProbeError>;
