use tracing::info;

use crate::error::LookupError;
use crate::model::BibleChapter;
use crate::normalizer::{self, ParseOutcome};
use crate::registry::{BookDescriptor, Registry};
use crate::validator::{validate, validate_code, ChapterCheck};
use crate::verse_scraper::VerseScraper;

/// The resolve-and-fetch entry point: free text in, chapter or typed error out.
#[derive(Clone)]
pub struct Resolver {
    registry: &'static Registry,
    scraper: VerseScraper,
}

impl Resolver {
    pub fn new(registry: &'static Registry, scraper: VerseScraper) -> Self {
        Self { registry, scraper }
    }

    pub fn registry(&self) -> &'static Registry {
        self.registry
    }

    pub fn scraper(&self) -> &VerseScraper {
        &self.scraper
    }

    pub fn parse(&self, text: &str) -> ParseOutcome<'static> {
        normalizer::parse(self.registry, text)
    }

    /// Parse and range-check without touching the network.
    pub fn resolve(&self, text: &str) -> Result<(&'static BookDescriptor, u32), LookupError> {
        let (book, chapter) = match self.parse(text) {
            ParseOutcome::Resolved { book, chapter } => (book, chapter),
            ParseOutcome::NeedsChapter { book } => {
                return Err(LookupError::NeedsChapter {
                    book: book.summary(),
                })
            }
            ParseOutcome::Ambiguous {
                candidates,
                requested_chapter,
                message,
            } => {
                return Err(LookupError::Ambiguous {
                    candidates: candidates.iter().map(|b| b.summary()).collect(),
                    requested_chapter,
                    message,
                })
            }
            ParseOutcome::Unrecognized { raw_input } => {
                return Err(LookupError::Unrecognized { raw_input })
            }
        };

        in_range(book, chapter, validate(book, chapter))
    }

    /// Range-check a canonical code and chapter, skipping free-text parsing.
    pub fn resolve_code(
        &self,
        code: &str,
        chapter: u32,
    ) -> Result<(&'static BookDescriptor, u32), LookupError> {
        let (book, check) = validate_code(self.registry, code, chapter).ok_or_else(|| {
            LookupError::Unrecognized {
                raw_input: code.trim().to_string(),
            }
        })?;
        in_range(book, chapter, check)
    }

    pub async fn fetch_chapter(&self, text: &str) -> Result<BibleChapter, LookupError> {
        let (book, chapter) = self.resolve(text)?;
        info!(input = text, code = book.code, chapter, "reference resolved");
        self.scraper.fetch(book, chapter).await
    }

    pub async fn fetch_by_code(
        &self,
        code: &str,
        chapter: u32,
    ) -> Result<BibleChapter, LookupError> {
        let (book, chapter) = self.resolve_code(code, chapter)?;
        self.scraper.fetch(book, chapter).await
    }
}

fn in_range(
    book: &'static BookDescriptor,
    chapter: u32,
    check: ChapterCheck,
) -> Result<(&'static BookDescriptor, u32), LookupError> {
    match check {
        ChapterCheck::Valid => Ok((book, chapter)),
        ChapterCheck::Invalid {
            first_chapter,
            max_chapter,
        } => Err(LookupError::ChapterOutOfRange {
            book: book.summary(),
            chapter,
            first_chapter,
            max_chapter,
        }),
    }
}
