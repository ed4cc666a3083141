use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use scripture_common::error::CommonError;
use scripture_common::mcp_api::BookSummary;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Common(#[from] CommonError),

    #[error("config error: {0}")]
    Config(String),
}

/// Why a page that loaded could not be turned into verses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ExtractionFailure {
    #[error("container not found")]
    ContainerNotFound,

    #[error("zero verses parsed")]
    ZeroVerses,
}

/// Coarse error category, used for status codes and health aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Input,
    Range,
    Network,
    NotFound,
    Extraction,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Input => "input",
            ErrorKind::Range => "range",
            ErrorKind::Network => "network",
            ErrorKind::NotFound => "not_found",
            ErrorKind::Extraction => "extraction",
        }
    }
}

/// Every way resolving and fetching a reference can fail.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("no book matches '{raw_input}'")]
    Unrecognized { raw_input: String },

    #[error("{} needs a chapter number", .book.name)]
    NeedsChapter { book: BookSummary },

    #[error("{}", ambiguous_message(.candidates, .requested_chapter, .message))]
    Ambiguous {
        candidates: Vec<BookSummary>,
        requested_chapter: Option<u32>,
        message: Option<String>,
    },

    #[error("chapter {chapter} is out of range for {} (chapters {first_chapter} to {max_chapter})", .book.name)]
    ChapterOutOfRange {
        book: BookSummary,
        chapter: u32,
        first_chapter: u32,
        max_chapter: u32,
    },

    #[error("chapter not found upstream: {url}")]
    ChapterNotFound { url: String },

    #[error("connection error: {0}")]
    Connection(String),

    #[error("extraction error: {0}")]
    Extraction(ExtractionFailure),
}

impl LookupError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LookupError::Unrecognized { .. }
            | LookupError::NeedsChapter { .. }
            | LookupError::Ambiguous { .. } => ErrorKind::Input,
            LookupError::ChapterOutOfRange { .. } => ErrorKind::Range,
            LookupError::ChapterNotFound { .. } => ErrorKind::NotFound,
            LookupError::Connection(_) => ErrorKind::Network,
            LookupError::Extraction(_) => ErrorKind::Extraction,
        }
    }

    /// Disambiguation choices to show the caller, if any.
    pub fn candidates(&self) -> Option<&[BookSummary]> {
        match self {
            LookupError::Ambiguous { candidates, .. } => Some(candidates),
            _ => None,
        }
    }
}

impl From<CommonError> for LookupError {
    fn from(err: CommonError) -> Self {
        match err {
            CommonError::NotFound { url } => LookupError::ChapterNotFound { url },
            other => LookupError::Connection(other.to_string()),
        }
    }
}

fn ambiguous_message(
    candidates: &[BookSummary],
    requested_chapter: &Option<u32>,
    message: &Option<String>,
) -> String {
    if let Some(message) = message {
        return message.clone();
    }
    let names: Vec<&str> = candidates.iter().map(|c| c.name.as_str()).collect();
    match *requested_chapter {
        Some(chapter) => format!("chapter {chapter} could be in: {}", names.join(", ")),
        None => format!("several books match: {}", names.join(", ")),
    }
}
