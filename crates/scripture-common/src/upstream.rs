use std::time::Duration;

use futures::StreamExt;
use reqwest::StatusCode;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::CommonError;

const DEFAULT_BASE_URL: &str = "https://www.aelf.org";
const USER_AGENT: &str = "scripture-resolver/0.1 (+health-check)";

#[derive(Clone, Debug)]
pub struct UpstreamConfig {
    pub base_url: String,
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
    pub max_body_bytes: usize,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(8),
            connect_timeout: Duration::from_secs(4),
            max_body_bytes: 4 * 1024 * 1024,
        }
    }
}

impl UpstreamConfig {
    /// Optional:
    /// - `BIBLE_BASE_URL`: upstream host (default `https://www.aelf.org`)
    /// - `BIBLE_TIMEOUT_SECS`: whole-request timeout (default 8)
    /// - `BIBLE_CONNECT_TIMEOUT_SECS`: connect timeout (default 4)
    /// - `BIBLE_MAX_BODY_BYTES`: response body cap (default 4 MiB)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let base_url =
            std::env::var("BIBLE_BASE_URL").unwrap_or_else(|_| defaults.base_url.clone());

        let request_timeout = env_number::<u64>("BIBLE_TIMEOUT_SECS")
            .filter(|&n| n > 0)
            .map(Duration::from_secs)
            .unwrap_or(defaults.request_timeout);

        let connect_timeout = env_number::<u64>("BIBLE_CONNECT_TIMEOUT_SECS")
            .filter(|&n| n > 0)
            .map(Duration::from_secs)
            .unwrap_or(defaults.connect_timeout);

        let max_body_bytes = env_number::<usize>("BIBLE_MAX_BODY_BYTES")
            .filter(|&n| n > 0)
            .unwrap_or(defaults.max_body_bytes);

        Self::with_base_url(base_url)
            .timeouts(request_timeout, connect_timeout)
            .body_limit(max_body_bytes)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            ..Self::default()
        }
    }

    pub fn timeouts(mut self, request: Duration, connect: Duration) -> Self {
        self.request_timeout = request;
        self.connect_timeout = connect;
        self
    }

    pub fn body_limit(mut self, max_body_bytes: usize) -> Self {
        self.max_body_bytes = max_body_bytes;
        self
    }
}

/// Reads an environment variable as a number. Unparsable values are logged and ignored.
pub fn env_number<T: std::str::FromStr>(name: &str) -> Option<T> {
    let raw = std::env::var(name).ok()?;
    match raw.trim().parse::<T>() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!(var = name, value = %raw, "ignoring unparsable numeric setting");
            None
        }
    }
}

/// An HTML page fetched from the upstream site.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub url: String,
    pub body: String,
}

/// Client for the third-party bible site.
///
/// Every call issues exactly one request: there is no retry loop, and the
/// timeouts are explicit rather than inherited from reqwest. Dropping the
/// returned future cancels the request.
#[derive(Clone)]
pub struct UpstreamClient {
    config: UpstreamConfig,
    http: reqwest::Client,
}

impl UpstreamClient {
    pub fn new(config: UpstreamConfig) -> Result<Self, CommonError> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()?;
        Ok(Self { config, http })
    }

    pub fn config(&self) -> &UpstreamConfig {
        &self.config
    }

    /// Absolute URL for a path on the upstream host. `path` must start with `/`.
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    pub async fn get_page(&self, path: &str) -> Result<FetchedPage, CommonError> {
        let url = self.url_for(path);
        debug!(url = %url, "fetching upstream page");

        let resp = self.http.get(&url).send().await?;
        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            return Err(CommonError::NotFound { url });
        }
        if !status.is_success() {
            warn!(url = %url, status = status.as_u16(), "upstream returned error status");
            return Err(CommonError::Status { status, url });
        }

        let body = read_limited_body(resp, &url, self.config.max_body_bytes).await?;
        Ok(FetchedPage { url, body })
    }

    /// POST a JSON body to an arbitrary URL (used for outbound notifications).
    pub async fn post_json<T: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &T,
    ) -> Result<(), CommonError> {
        let resp = self.http.post(url).json(body).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(CommonError::Status {
                status,
                url: url.to_string(),
            });
        }
        Ok(())
    }
}

async fn read_limited_body(
    resp: reqwest::Response,
    url: &str,
    max_bytes: usize,
) -> Result<String, CommonError> {
    let mut stream = resp.bytes_stream();
    let mut buf: Vec<u8> = Vec::new();
    while let Some(next) = stream.next().await {
        let chunk = next?;
        if buf.len() + chunk.len() > max_bytes {
            return Err(CommonError::BodyTooLarge {
                url: url.to_string(),
                limit: max_bytes,
            });
        }
        buf.extend_from_slice(&chunk);
    }
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn client_for(server: &MockServer) -> UpstreamClient {
        UpstreamClient::new(UpstreamConfig::with_base_url(server.uri())).unwrap()
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let config = UpstreamConfig::with_base_url("https://example.org/");
        assert_eq!(config.base_url, "https://example.org");
        let client = UpstreamClient::new(config).unwrap();
        assert_eq!(client.url_for("/bible/Mt/5"), "https://example.org/bible/Mt/5");
    }

    #[tokio::test]
    async fn get_page_returns_body_on_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/bible/Mt/5"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let page = client.get_page("/bible/Mt/5").await.unwrap();
        assert_eq!(page.body, "<html>ok</html>");
        assert_eq!(page.url, format!("{}/bible/Mt/5", server.uri()));
    }

    #[tokio::test]
    async fn not_found_is_distinct_from_other_statuses() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/bible/Mt/99"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/bible/Mt/1"))
            .respond_with(ResponseTemplate::new(503))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;

        let err = client.get_page("/bible/Mt/99").await.unwrap_err();
        assert!(err.is_not_found());

        let err = client.get_page("/bible/Mt/1").await.unwrap_err();
        match err {
            CommonError::Status { status, .. } => {
                assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE)
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn oversized_body_is_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/big"))
            .respond_with(ResponseTemplate::new(200).set_body_string("x".repeat(64)))
            .mount(&server)
            .await;

        let client =
            UpstreamClient::new(UpstreamConfig::with_base_url(server.uri()).body_limit(16))
                .unwrap();
        let err = client.get_page("/big").await.unwrap_err();
        assert!(matches!(err, CommonError::BodyTooLarge { limit: 16, .. }));
    }

    #[tokio::test]
    async fn timeout_surfaces_as_request_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/slow"))
            .respond_with(
                ResponseTemplate::new(200).set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let config = UpstreamConfig::with_base_url(server.uri())
            .timeouts(Duration::from_millis(50), Duration::from_millis(50));
        let client = UpstreamClient::new(config).unwrap();
        let err = client.get_page("/slow").await.unwrap_err();
        match err {
            CommonError::Request(e) => assert!(e.is_timeout()),
            other => panic!("expected timeout, got {other:?}"),
        }
    }
}
