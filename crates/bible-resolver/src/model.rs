use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::ErrorKind;

/// One verse as it appears upstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Verse {
    /// Verse number as printed; not guaranteed to increase monotonically.
    pub number: u32,
    pub text: String,
}

/// A fetched chapter. `verses` is in upstream document order and never empty.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct BibleChapter {
    /// Display name of the book, e.g. "1 Timothée".
    pub book: String,
    /// Canonical code, e.g. "1Tm".
    pub code: String,
    pub chapter: u32,
    pub source_url: String,
    pub verses: Vec<Verse>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    Healthy,
    Degraded,
}

/// Outcome of one sample in a health run.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SampleResult {
    /// The reference text that was resolved, e.g. "Psaume 23".
    pub reference: String,
    /// Resolved book code, when resolution got that far.
    pub code: Option<String>,
    pub success: bool,
    pub verse_count: Option<usize>,
    pub error_kind: Option<ErrorKind>,
    pub error: Option<String>,
    pub latency_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct HealthReport {
    pub status: HealthStatus,
    pub samples: Vec<SampleResult>,
    pub total_ms: u64,
}

impl HealthReport {
    pub fn failures(&self) -> impl Iterator<Item = &SampleResult> {
        self.samples.iter().filter(|s| !s.success)
    }
}
