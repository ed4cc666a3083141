//! Book Registry: the immutable catalogue of every book and its aliases.
//!
//! Built once from the static table in `books` and shared process-wide.
//! Lookups fold case and accents and ignore whitespace and punctuation, so
//! "1 Timothée", "1timothee" and "1-TIMOTHEE" share one key.
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use serde::Serialize;
use tracing::warn;

use crate::books::{BookEntry, BOOKS};
use scripture_common::mcp_api::BookSummary;

static REGISTRY: LazyLock<Registry> = LazyLock::new(|| Registry::from_entries(BOOKS));

/// The process-wide registry, built on first use.
pub fn registry() -> &'static Registry {
    &REGISTRY
}

/// One canonical book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookDescriptor {
    /// Code used in upstream URLs, e.g. "Mt", "1Tm".
    pub code: &'static str,
    /// Display name, e.g. "1 Timothée".
    pub name: &'static str,
    /// Folded lookup keys accepted for this book.
    pub aliases: Vec<String>,
    /// Last valid chapter number.
    pub chapter_count: u32,
    /// First valid chapter number; 0 for books with a prologue chapter.
    pub first_chapter: u32,
}

impl BookDescriptor {
    pub fn summary(&self) -> BookSummary {
        BookSummary {
            code: self.code.to_string(),
            name: self.name.to_string(),
            first_chapter: self.first_chapter,
            chapter_count: self.chapter_count,
        }
    }
}

pub struct Registry {
    books: Vec<BookDescriptor>,
    by_alias: HashMap<String, usize>,
    by_code: HashMap<String, usize>,
    conflicts: Vec<String>,
}

impl Registry {
    pub fn from_entries(entries: &[BookEntry]) -> Self {
        let mut books = Vec::with_capacity(entries.len());
        let mut by_alias: HashMap<String, usize> = HashMap::new();
        let mut by_code: HashMap<String, usize> = HashMap::new();
        let mut conflicts = Vec::new();

        for (idx, entry) in entries.iter().enumerate() {
            let aliases = expand_aliases(entry);

            for alias in &aliases {
                match by_alias.get(alias) {
                    Some(&owner) if owner != idx => {
                        warn!(alias = %alias, code = entry.code, "alias already claimed by another book");
                        conflicts.push(alias.clone());
                    }
                    Some(_) => {}
                    None => {
                        by_alias.insert(alias.clone(), idx);
                    }
                }
            }
            if by_code.insert(entry.code.to_lowercase(), idx).is_some() {
                warn!(code = entry.code, "duplicate book code");
                conflicts.push(entry.code.to_string());
            }

            books.push(BookDescriptor {
                code: entry.code,
                name: entry.name,
                aliases,
                chapter_count: entry.chapter_count,
                first_chapter: entry.first_chapter,
            });
        }

        Self {
            books,
            by_alias,
            by_code,
            conflicts,
        }
    }

    /// Exact alias lookup on the folded key of `text`.
    pub fn lookup_by_alias(&self, text: &str) -> Option<&BookDescriptor> {
        let key = lookup_key(text);
        if key.is_empty() {
            return None;
        }
        self.by_alias.get(&key).map(|&idx| &self.books[idx])
    }

    /// Lookup by canonical code, case-insensitively ("mt" finds "Mt").
    pub fn lookup_by_code(&self, code: &str) -> Option<&BookDescriptor> {
        self.by_code
            .get(&code.trim().to_lowercase())
            .map(|&idx| &self.books[idx])
    }

    /// Every book in canonical order.
    pub fn all_books(&self) -> &[BookDescriptor] {
        &self.books
    }

    /// Alias keys claimed by more than one book at build time. Empty for sound data.
    pub fn conflicts(&self) -> &[String] {
        &self.conflicts
    }
}

fn expand_aliases(entry: &BookEntry) -> Vec<String> {
    let mut keys = vec![lookup_key(entry.name), lookup_key(entry.code)];
    match entry.numeral {
        Some(n) => {
            for stem in entry.aliases {
                let stem = lookup_key(stem);
                keys.push(format!("{n}{stem}"));
                keys.push(format!("{stem}{n}"));
            }
        }
        None => keys.extend(entry.aliases.iter().map(|a| lookup_key(a))),
    }
    let mut seen = HashSet::new();
    keys.retain(|k| seen.insert(k.clone()));
    keys
}

/// Lowercase `text` and replace accented Latin letters with their base letter.
///
/// Everything else is kept as-is; no-break spaces become plain spaces.
pub fn fold_accents(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars().flat_map(char::to_lowercase) {
        match c {
            'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => out.push('a'),
            'ç' => out.push('c'),
            'è' | 'é' | 'ê' | 'ë' => out.push('e'),
            'ì' | 'í' | 'î' | 'ï' => out.push('i'),
            'ñ' => out.push('n'),
            'ò' | 'ó' | 'ô' | 'õ' | 'ö' => out.push('o'),
            'ù' | 'ú' | 'û' | 'ü' => out.push('u'),
            'ý' | 'ÿ' => out.push('y'),
            'œ' => out.push_str("oe"),
            'æ' => out.push_str("ae"),
            '\u{00a0}' | '\u{202f}' => out.push(' '),
            other => out.push(other),
        }
    }
    out
}

/// The registry key for a piece of text: folded, ASCII alphanumerics only.
pub fn lookup_key(text: &str) -> String {
    fold_accents(text)
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_ignores_case_accents_and_separators() {
        let reg = registry();
        for text in ["1 Timothée", "1timothee", "1-TIMOTHEE", "timothée 1", "1 tim", "1Tm"] {
            let book = reg
                .lookup_by_alias(text)
                .unwrap_or_else(|| panic!("no match for {text}"));
            assert_eq!(book.code, "1Tm", "input {text}");
        }
    }

    #[test]
    fn stems_of_numbered_books_are_not_aliases() {
        let reg = registry();
        assert!(reg.lookup_by_alias("timothée").is_none());
        assert!(reg.lookup_by_alias("corinthiens").is_none());
        assert_eq!(reg.lookup_by_alias("jean").unwrap().code, "Jn");
        assert_eq!(reg.lookup_by_alias("jean 3").unwrap().code, "3Jn");
    }

    #[test]
    fn unknown_text_is_none() {
        let reg = registry();
        assert!(reg.lookup_by_alias("xyzzy").is_none());
        assert!(reg.lookup_by_alias("").is_none());
        assert!(reg.lookup_by_alias(" - ").is_none());
        assert!(reg.lookup_by_code("Zz").is_none());
    }

    #[test]
    fn codes_are_unique_and_aliases_unambiguous() {
        let reg = registry();
        assert!(reg.conflicts().is_empty(), "conflicts: {:?}", reg.conflicts());

        let mut codes: Vec<&str> = reg.all_books().iter().map(|b| b.code).collect();
        let total = codes.len();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), total);
        assert_eq!(total, 73);
    }

    #[test]
    fn lookup_by_code_is_case_insensitive() {
        let reg = registry();
        assert_eq!(reg.lookup_by_code("mt").unwrap().name, "Matthieu");
        assert_eq!(reg.lookup_by_code("1TM").unwrap().name, "1 Timothée");
    }

    #[test]
    fn prologue_book_starts_at_zero() {
        let si = registry().lookup_by_code("Si").unwrap();
        assert_eq!(si.first_chapter, 0);
        assert_eq!(si.chapter_count, 51);
        assert!(registry()
            .all_books()
            .iter()
            .filter(|b| b.code != "Si")
            .all(|b| b.first_chapter == 1));
    }

    #[test]
    fn conflicting_entries_are_reported() {
        let entries = [
            BookEntry {
                code: "Aa",
                name: "Alpha",
                first_chapter: 1,
                chapter_count: 3,
                numeral: None,
                aliases: &["shared"],
            },
            BookEntry {
                code: "Bb",
                name: "Beta",
                first_chapter: 1,
                chapter_count: 3,
                numeral: None,
                aliases: &["shared"],
            },
        ];
        let reg = Registry::from_entries(&entries);
        assert_eq!(reg.conflicts(), ["shared".to_string()]);
        assert_eq!(reg.lookup_by_alias("shared").unwrap().code, "Aa");
    }

    #[test]
    fn fold_accents_strips_french_diacritics() {
        assert_eq!(fold_accents("Ézéchiel Isaïe Aggée Œuvre"), "ezechiel isaie aggee oeuvre");
        assert_eq!(lookup_key("Actes des Apôtres"), "actesdesapotres");
    }
}
