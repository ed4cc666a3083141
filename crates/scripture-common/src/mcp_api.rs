use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ReferenceParams {
    /// Free-text scripture reference such as "Mt 5", "1 timothée 5" or "timothée 1 ch 5".
    pub reference: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CodeChapterParams {
    /// Canonical book code as listed by list_books, e.g. "Mt" or "1Tm" (case-insensitive).
    pub code: String,
    pub chapter: u32,
}

/// A book as presented to callers (list of books, disambiguation candidates).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct BookSummary {
    /// Canonical code used in upstream URLs, e.g. "Mt", "1Tm".
    pub code: String,
    /// Display name, e.g. "1 Timothée".
    pub name: String,
    /// First valid chapter number (0 for books with a prologue chapter).
    pub first_chapter: u32,
    /// Last valid chapter number.
    pub chapter_count: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct BookListResponse {
    pub books: Vec<BookSummary>,
}

/// Outcome of parsing a reference without fetching it.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ResolveResponse {
    Resolved {
        book: BookSummary,
        chapter: u32,
        /// False when the chapter lies outside the book's range.
        chapter_valid: bool,
    },
    NeedsChapter {
        book: BookSummary,
    },
    Ambiguous {
        candidates: Vec<BookSummary>,
        requested_chapter: Option<u32>,
        message: Option<String>,
    },
    Unrecognized {
        raw_input: String,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ResolveReferenceResponse {
    /// The reference as submitted.
    pub input: String,
    pub outcome: ResolveResponse,
}
