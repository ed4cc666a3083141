use serde::Serialize;

use crate::registry::{BookDescriptor, Registry};

/// Result of checking a chapter against a book's range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ChapterCheck {
    Valid,
    Invalid { first_chapter: u32, max_chapter: u32 },
}

impl ChapterCheck {
    pub fn is_valid(&self) -> bool {
        matches!(self, ChapterCheck::Valid)
    }
}

/// Checks `chapter` against `[first_chapter, chapter_count]`, inclusive.
pub fn validate(book: &BookDescriptor, chapter: u32) -> ChapterCheck {
    if (book.first_chapter..=book.chapter_count).contains(&chapter) {
        ChapterCheck::Valid
    } else {
        ChapterCheck::Invalid {
            first_chapter: book.first_chapter,
            max_chapter: book.chapter_count,
        }
    }
}

/// Same as [`validate`] by code, returning the book it found. `None` when the
/// code is unknown.
pub fn validate_code<'a>(
    registry: &'a Registry,
    code: &str,
    chapter: u32,
) -> Option<(&'a BookDescriptor, ChapterCheck)> {
    registry
        .lookup_by_code(code)
        .map(|book| (book, validate(book, chapter)))
}
