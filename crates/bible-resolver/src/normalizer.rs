//! Reference Normalizer: free text to a (book, chapter) pair.
//!
//! Strategies run from most to least specific so a book numeral is never
//! read as a chapter of the wrong book:
//! 1. leading numeral   `1 tim 5`
//! 2. trailing numeral  `timothee 1 5`
//! 3. simple            `matthieu 5`
//! 4. book only         `matthieu`
//!
//! When no strategy hits an exact alias, a substring match over every alias
//! collects candidates, filtered by chapter range when a chapter was given.
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::registry::{fold_accents, lookup_key, BookDescriptor, Registry};
use crate::validator::validate;
use scripture_common::mcp_api::ResolveResponse;

static LEADING_NUMERAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([1-3])\s*([a-z][a-z ]*?)\s*(\d+)$").expect("valid regex")
});
static TRAILING_NUMERAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([a-z][a-z ]*?)\s*([1-3])\s+(\d+)$").expect("valid regex")
});
static SIMPLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.*?[a-z].*?)\s*(\d+)$").expect("valid regex"));

const CHAPTER_WORDS: &[&str] = &["ch", "chap", "chapitre", "chapitres"];
const VERSE_WORDS: &[&str] = &["v", "vs", "verset", "versets"];

/// Tokens shorter than this never take part in substring matching.
const MIN_PARTIAL_LEN: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub enum ParseOutcome<'a> {
    Resolved {
        book: &'a BookDescriptor,
        chapter: u32,
    },
    NeedsChapter {
        book: &'a BookDescriptor,
    },
    Ambiguous {
        candidates: Vec<&'a BookDescriptor>,
        requested_chapter: Option<u32>,
        /// Set when a chapter was given but no candidate accepts it.
        message: Option<String>,
    },
    Unrecognized {
        raw_input: String,
    },
}

impl ParseOutcome<'_> {
    pub fn to_response(&self) -> ResolveResponse {
        match self {
            ParseOutcome::Resolved { book, chapter } => ResolveResponse::Resolved {
                book: book.summary(),
                chapter: *chapter,
                chapter_valid: validate(book, *chapter).is_valid(),
            },
            ParseOutcome::NeedsChapter { book } => ResolveResponse::NeedsChapter {
                book: book.summary(),
            },
            ParseOutcome::Ambiguous {
                candidates,
                requested_chapter,
                message,
            } => ResolveResponse::Ambiguous {
                candidates: candidates.iter().map(|b| b.summary()).collect(),
                requested_chapter: *requested_chapter,
                message: message.clone(),
            },
            ParseOutcome::Unrecognized { raw_input } => ResolveResponse::Unrecognized {
                raw_input: raw_input.clone(),
            },
        }
    }
}

/// Folds accents and case, turns punctuation into spaces, drops chapter/verse
/// words that sit between a book word and a number, and collapses spaces.
///
/// Idempotent: normalizing its own output returns the same string.
pub fn normalize(raw: &str) -> String {
    let folded: String = fold_accents(raw)
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();
    let tokens: Vec<&str> = folded.split_whitespace().collect();

    let mut kept: Vec<&str> = Vec::with_capacity(tokens.len());
    let mut seen_word = false;
    for (i, token) in tokens.iter().enumerate() {
        let is_separator = CHAPTER_WORDS.contains(token) || VERSE_WORDS.contains(token);
        let next_is_number = tokens
            .get(i + 1)
            .is_some_and(|t| t.chars().all(|c| c.is_ascii_digit()));
        if is_separator && seen_word && next_is_number {
            continue;
        }
        if token.chars().any(|c| c.is_alphabetic()) {
            seen_word = true;
        }
        kept.push(token);
    }
    kept.join(" ")
}

pub fn parse<'a>(registry: &'a Registry, raw: &str) -> ParseOutcome<'a> {
    let text = normalize(raw);
    if text.is_empty() {
        return ParseOutcome::Unrecognized {
            raw_input: raw.to_string(),
        };
    }

    if let Some(caps) = LEADING_NUMERAL.captures(&text) {
        if let Some(chapter) = parse_chapter(&caps[3]) {
            let (numeral, book) = (&caps[1], caps[2].trim());
            if let Some(found) = registry.lookup_by_alias(&format!("{numeral} {book}")) {
                debug!(input = %text, code = found.code, "matched leading-numeral form");
                return ParseOutcome::Resolved {
                    book: found,
                    chapter,
                };
            }
        }
    }

    if let Some(caps) = TRAILING_NUMERAL.captures(&text) {
        if let Some(chapter) = parse_chapter(&caps[3]) {
            let (book, numeral) = (caps[1].trim(), &caps[2]);
            let found = registry
                .lookup_by_alias(&format!("{numeral} {book}"))
                .or_else(|| registry.lookup_by_alias(&format!("{book} {numeral}")));
            if let Some(found) = found {
                debug!(input = %text, code = found.code, "matched trailing-numeral form");
                return ParseOutcome::Resolved {
                    book: found,
                    chapter,
                };
            }
        }
    }

    let simple = SIMPLE
        .captures(&text)
        .and_then(|caps| Some((caps[1].trim().to_string(), parse_chapter(&caps[2])?)));

    if let Some((book, chapter)) = &simple {
        if let Some(found) = registry.lookup_by_alias(book) {
            debug!(input = %text, code = found.code, "matched simple form");
            return ParseOutcome::Resolved {
                book: found,
                chapter: *chapter,
            };
        }
    }

    if let Some(found) = registry.lookup_by_alias(&text) {
        debug!(input = %text, code = found.code, "matched book without chapter");
        return ParseOutcome::NeedsChapter { book: found };
    }

    let (token, chapter) = match simple {
        Some((book, chapter)) => (book, Some(chapter)),
        None => (text.clone(), None),
    };
    resolve_partial(registry, raw, &token, chapter)
}

fn resolve_partial<'a>(
    registry: &'a Registry,
    raw: &str,
    token: &str,
    chapter: Option<u32>,
) -> ParseOutcome<'a> {
    let candidates = partial_candidates(registry, token);
    debug!(token, candidates = candidates.len(), "partial alias match");

    if candidates.is_empty() {
        return ParseOutcome::Unrecognized {
            raw_input: raw.to_string(),
        };
    }

    let Some(chapter) = chapter else {
        if candidates.len() == 1 {
            return ParseOutcome::NeedsChapter {
                book: candidates[0],
            };
        }
        return ParseOutcome::Ambiguous {
            candidates,
            requested_chapter: None,
            message: None,
        };
    };

    let in_range: Vec<&BookDescriptor> = candidates
        .iter()
        .copied()
        .filter(|b| validate(b, chapter).is_valid())
        .collect();

    if in_range.len() == 1 {
        return ParseOutcome::Resolved {
            book: in_range[0],
            chapter,
        };
    }

    if in_range.is_empty() {
        let names: Vec<&str> = candidates.iter().map(|b| b.name).collect();
        return ParseOutcome::Ambiguous {
            message: Some(format!(
                "chapter {chapter} is not valid for any of: {}",
                names.join(", ")
            )),
            candidates,
            requested_chapter: Some(chapter),
        };
    }

    ParseOutcome::Ambiguous {
        candidates: in_range,
        requested_chapter: Some(chapter),
        message: None,
    }
}

/// Books whose alias or name contains the token, or is contained in it.
fn partial_candidates<'a>(registry: &'a Registry, token: &str) -> Vec<&'a BookDescriptor> {
    let key = lookup_key(token);
    if key.is_empty() {
        return Vec::new();
    }
    registry
        .all_books()
        .iter()
        .filter(|book| book.aliases.iter().any(|alias| overlaps(alias, &key)))
        .collect()
}

fn overlaps(alias: &str, key: &str) -> bool {
    (key.len() >= MIN_PARTIAL_LEN && alias.contains(key))
        || (alias.len() >= MIN_PARTIAL_LEN && key.contains(alias))
}

/// Digit runs too long for `u32` saturate, so the validator reports them as
/// out of range instead of the digits being read as part of a book name.
fn parse_chapter(digits: &str) -> Option<u32> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(digits.parse().unwrap_or(u32::MAX))
}
