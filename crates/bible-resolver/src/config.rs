use std::net::SocketAddr;
use std::time::Duration;

use crate::error::AppError;
use crate::health::DEFAULT_SAMPLES;
use scripture_common::upstream::{env_number, UpstreamConfig};

/// Application configuration loaded explicitly from environment variables.
///
/// Everything has a default; only malformed addresses and URLs are errors.
#[derive(Debug, Clone)]
pub struct Config {
    /// Upstream site, timeouts and body cap (`BIBLE_*` variables).
    pub upstream: UpstreamConfig,
    /// Pause between health samples.
    pub health_delay: Duration,
    /// References exercised by the health check.
    pub health_samples: Vec<String>,
    /// Degraded health reports are POSTed here when set.
    pub health_webhook_url: Option<String>,
    /// Serve the REST surface on this address when set.
    pub http_listen_addr: Option<SocketAddr>,
    /// Serve MCP over TCP instead of stdio when set.
    pub mcp_tcp_listen_addr: Option<SocketAddr>,
}

impl Config {
    /// Optional:
    /// - `BIBLE_BASE_URL`, `BIBLE_TIMEOUT_SECS`, `BIBLE_CONNECT_TIMEOUT_SECS`, `BIBLE_MAX_BODY_BYTES`
    /// - `HEALTH_DELAY_MS`: delay between health samples (default 1000)
    /// - `HEALTH_SAMPLES`: comma-separated references overriding the built-in sample
    /// - `HEALTH_WEBHOOK_URL`: where to POST degraded health reports
    /// - `HTTP_LISTEN_ADDR`: REST listen address, e.g. "127.0.0.1:8080"
    /// - `MCP_TCP_LISTEN_ADDR`: MCP TCP listen address
    pub fn from_env() -> Result<Self, AppError> {
        let upstream = UpstreamConfig::from_env();
        if !is_http_url(&upstream.base_url) {
            return Err(AppError::Config(format!(
                "BIBLE_BASE_URL must be an http(s) URL, got '{}'",
                upstream.base_url
            )));
        }

        let health_delay = env_number::<u64>("HEALTH_DELAY_MS")
            .map(Duration::from_millis)
            .unwrap_or_else(|| Duration::from_millis(1_000));

        let health_samples = std::env::var("HEALTH_SAMPLES")
            .ok()
            .map(|raw| parse_samples(&raw))
            .filter(|samples| !samples.is_empty())
            .unwrap_or_else(|| DEFAULT_SAMPLES.iter().map(|s| s.to_string()).collect());

        let health_webhook_url = match std::env::var("HEALTH_WEBHOOK_URL") {
            Ok(url) if is_http_url(&url) => Some(url),
            Ok(url) => {
                return Err(AppError::Config(format!(
                    "HEALTH_WEBHOOK_URL must be an http(s) URL, got '{url}'"
                )))
            }
            Err(_) => None,
        };

        Ok(Self {
            upstream,
            health_delay,
            health_samples,
            health_webhook_url,
            http_listen_addr: env_addr("HTTP_LISTEN_ADDR")?,
            mcp_tcp_listen_addr: env_addr("MCP_TCP_LISTEN_ADDR")?,
        })
    }
}

fn env_addr(name: &str) -> Result<Option<SocketAddr>, AppError> {
    match std::env::var(name) {
        Ok(raw) => parse_addr(name, &raw).map(Some),
        Err(_) => Ok(None),
    }
}

fn parse_addr(name: &str, raw: &str) -> Result<SocketAddr, AppError> {
    raw.trim()
        .parse()
        .map_err(|e| AppError::Config(format!("{name} is not a socket address ('{raw}'): {e}")))
}

fn parse_samples(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn is_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn samples_are_split_and_trimmed() {
        assert_eq!(
            parse_samples(" Jean 1, Psaume 51 ,, Jude 1 "),
            ["Jean 1", "Psaume 51", "Jude 1"]
        );
        assert!(parse_samples(" , ").is_empty());
    }

    #[test]
    fn bad_address_is_a_config_error() {
        assert!(parse_addr("HTTP_LISTEN_ADDR", "127.0.0.1:8080").is_ok());
        let err = parse_addr("HTTP_LISTEN_ADDR", "localhost").unwrap_err();
        assert!(err.to_string().contains("HTTP_LISTEN_ADDR"));
    }

    #[test]
    fn only_http_urls_accepted() {
        assert!(is_http_url("https://www.aelf.org"));
        assert!(!is_http_url("ftp://example.org"));
    }
}
