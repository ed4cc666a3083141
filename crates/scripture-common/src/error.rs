//! Error types for the infrastructure shared by the resolver crates.
//!
//! These cover talking to the upstream bible site and to outbound webhooks.
//! Domain errors (unknown book, chapter out of range, markup drift) are defined
//! in the server crate and wrap `CommonError` via `#[from]` where needed.
use reqwest::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum CommonError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("upstream page not found: {url}")]
    NotFound { url: String },

    #[error("upstream returned status {status} for {url}")]
    Status { status: StatusCode, url: String },

    #[error("upstream body for {url} exceeds {limit} bytes")]
    BodyTooLarge { url: String, limit: usize },
}

impl CommonError {
    /// True for failures of the page itself (404) as opposed to the connection or server.
    pub fn is_not_found(&self) -> bool {
        matches!(self, CommonError::NotFound { .. })
    }
}
