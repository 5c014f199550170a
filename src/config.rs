use std::env;
use std::time::Duration;
use crate::error::{ProbeError, Result};

pub const DEFAULT_ENDPOINT: &str = "http://localhost:3002/v0/scrape";
pub const DEFAULT_PAGE_URL: &str = "https://www.google.com/search?q=2025年+AI+agent";
pub const DEFAULT_TIMEOUT_SECS: u64 = 45;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub endpoint: String,
    pub page_url: String,
    pub timeout: Duration,
    pub api_key: Option<String>,
    pub output: OutputFormat,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            page_url: DEFAULT_PAGE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            api_key: None,
            output: OutputFormat::Text,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        // Load environment variables from .env file if it exists
        dotenv::dotenv().ok();

        Self::from_vars(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    pub fn from_vars<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let endpoint = lookup("SCRAPE_ENDPOINT").unwrap_or(defaults.endpoint);
        reqwest::Url::parse(&endpoint)
            .map_err(|e| ProbeError::ConfigError(format!("Invalid SCRAPE_ENDPOINT '{}': {}", endpoint, e)))?;

        let page_url = lookup("PROBE_URL").unwrap_or(defaults.page_url);

        let timeout = match lookup("PROBE_TIMEOUT_SECS") {
            Some(raw) => {
                let secs = raw.trim().parse::<u64>()
                    .map_err(|e| ProbeError::ConfigError(format!("Invalid PROBE_TIMEOUT_SECS: {}", e)))?;
                if secs == 0 {
                    return Err(ProbeError::ConfigError("PROBE_TIMEOUT_SECS must be greater than zero".to_string()));
                }
                Duration::from_secs(secs)
            }
            None => defaults.timeout,
        };

        let api_key = lookup("SCRAPE_API_KEY").filter(|key| !key.trim().is_empty());

        let output = match lookup("PROBE_OUTPUT").as_deref().map(str::trim) {
            None | Some("") => OutputFormat::Text,
            Some(raw) if raw.eq_ignore_ascii_case("text") => OutputFormat::Text,
            Some(raw) if raw.eq_ignore_ascii_case("json") => OutputFormat::Json,
            Some(other) => {
                return Err(ProbeError::ConfigError(format!("Invalid PROBE_OUTPUT '{}': expected text or json", other)));
            }
        };

        Ok(Config {
            endpoint,
            page_url,
            timeout,
            api_key,
            output,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_match_local_service() {
        let config = Config::from_vars(vars(&[])).unwrap();
        assert_eq!(config.endpoint, "http://localhost:3002/v0/scrape");
        assert_eq!(config.timeout, Duration::from_secs(45));
        assert_eq!(config.output, OutputFormat::Text);
        assert!(config.api_key.is_none());
        assert!(config.page_url.starts_with("https://www.google.com/search?q="));
    }

    #[test]
    fn overrides_are_applied() {
        let config = Config::from_vars(vars(&[
            ("SCRAPE_ENDPOINT", "http://10.0.0.5:8080/v0/scrape"),
            ("PROBE_URL", "https://example.com/a?b=c&d=e"),
            ("PROBE_TIMEOUT_SECS", "5"),
            ("SCRAPE_API_KEY", "fc-test"),
            ("PROBE_OUTPUT", "JSON"),
        ]))
        .unwrap();

        assert_eq!(config.endpoint, "http://10.0.0.5:8080/v0/scrape");
        assert_eq!(config.page_url, "https://example.com/a?b=c&d=e");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.api_key.as_deref(), Some("fc-test"));
        assert_eq!(config.output, OutputFormat::Json);
    }

    #[test]
    fn blank_api_key_is_ignored() {
        let config = Config::from_vars(vars(&[("SCRAPE_API_KEY", "  ")])).unwrap();
        assert!(config.api_key.is_none());
    }

    #[test]
    fn invalid_values_are_rejected() {
        for pairs in [
            [("SCRAPE_ENDPOINT", "not a url")],
            [("PROBE_TIMEOUT_SECS", "soon")],
            [("PROBE_TIMEOUT_SECS", "0")],
            [("PROBE_OUTPUT", "yaml")],
        ] {
            let err = Config::from_vars(vars(&pairs)).unwrap_err();
            assert!(matches!(err, ProbeError::ConfigError(_)), "{:?} accepted", pairs);
        }
    }
}
