//! Verse Scraper: fetches a chapter page and extracts its verses.
//!
//! The upstream site marks verse numbers in two ways depending on the kind of
//! book. Each paragraph is tried against an ordered list of marker selectors;
//! the first one present wins. A paragraph with no marker is not a verse.
use std::sync::LazyLock;
use std::time::Instant;

use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info, warn};

use crate::error::{ExtractionFailure, LookupError};
use crate::model::{BibleChapter, Verse};
use crate::registry::BookDescriptor;
use scripture_common::upstream::UpstreamClient;

static CONTAINER: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.block-single-reading").expect("valid selector"));
static PARAGRAPH: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("p").expect("valid selector"));

struct VerseMarker {
    name: &'static str,
    selector: Selector,
}

/// Marker conventions in priority order. Narrative books and gospels use the
/// first, psalms and canticles the second.
static VERSE_MARKERS: LazyLock<Vec<VerseMarker>> = LazyLock::new(|| {
    [
        ("verse_number", "span.verse_number"),
        ("text_danger", "span.text-danger"),
    ]
    .into_iter()
    .map(|(name, css)| VerseMarker {
        name,
        selector: Selector::parse(css).expect("valid selector"),
    })
    .collect()
});

/// Upstream path for a chapter: `/bible/{code}/{chapter}`.
pub fn chapter_path(code: &str, chapter: u32) -> String {
    format!("/bible/{code}/{chapter}")
}

#[derive(Clone)]
pub struct VerseScraper {
    client: UpstreamClient,
}

impl VerseScraper {
    pub fn new(client: UpstreamClient) -> Self {
        Self { client }
    }

    /// One GET, then extraction. Never retries.
    pub async fn fetch(
        &self,
        book: &BookDescriptor,
        chapter: u32,
    ) -> Result<BibleChapter, LookupError> {
        let started = Instant::now();
        let page = self
            .client
            .get_page(&chapter_path(book.code, chapter))
            .await
            .inspect_err(|e| warn!(code = book.code, chapter, error = %e, "chapter fetch failed"))?;

        let verses = extract_verses(&page.body).map_err(|failure| {
            warn!(code = book.code, chapter, url = %page.url, %failure, "verse extraction failed");
            LookupError::Extraction(failure)
        })?;

        info!(
            code = book.code,
            chapter,
            verses = verses.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "chapter fetched"
        );

        Ok(BibleChapter {
            book: book.name.to_string(),
            code: book.code.to_string(),
            chapter,
            source_url: page.url,
            verses,
        })
    }
}

/// Extract verses in document order. Numbers are kept as printed, neither
/// sorted nor deduplicated.
pub fn extract_verses(html: &str) -> Result<Vec<Verse>, ExtractionFailure> {
    let document = Html::parse_document(html);
    let container = document
        .select(&CONTAINER)
        .next()
        .ok_or(ExtractionFailure::ContainerNotFound)?;

    let verses: Vec<Verse> = container
        .select(&PARAGRAPH)
        .filter_map(parse_paragraph)
        .collect();

    if verses.is_empty() {
        return Err(ExtractionFailure::ZeroVerses);
    }
    Ok(verses)
}

fn parse_paragraph(paragraph: ElementRef<'_>) -> Option<Verse> {
    let (marker_name, marker) = VERSE_MARKERS
        .iter()
        .find_map(|m| paragraph.select(&m.selector).next().map(|el| (m.name, el)))?;

    let marker_text: String = marker.text().collect();
    let Ok(number) = marker_text.trim().parse::<u32>() else {
        debug!(marker = marker_name, text = %marker_text, "skipping non-numeric verse marker");
        return None;
    };

    let full: String = paragraph.text().collect();
    let body = full.replacen(&marker_text, "", 1);
    let text = collapse_whitespace(&body);

    Some(Verse {
        number,
        text: capitalize_first(&text),
    })
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::registry;
    use scripture_common::upstream::UpstreamConfig;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const GOSPEL_PAGE: &str = r#"<html><body>
<div class="block-single-reading">
  <h4>Évangile de Jésus Christ selon saint Matthieu</h4>
  <p><span class="verse_number">1</span> voyant les foules, Jésus gravit la montagne.</p>
  <p><span class="verse_number">2</span>  Alors,&nbsp;ouvrant la&nbsp;&nbsp;bouche,
     il les enseignait. </p>
  <p>Note de traduction sans numéro.</p>
  <p><span class="verse_number">3</span> « Heureux les pauvres de cœur »</p>
</div>
</body></html>"#;

    const PSALM_PAGE: &str = r#"<html><body>
<div class="block-single-reading">
  <p><span class="text-danger">1</span>voyant les foules, Jésus gravit la montagne.</p>
  <p><span class="text-danger">2</span>Alors, ouvrant la bouche, il les enseignait.</p>
  <p><span class="text-danger">3</span>«&#8239;Heureux les pauvres de cœur&#8239;»</p>
</div>
</body></html>"#;

    #[test]
    fn both_marker_conventions_extract_the_same_verses() {
        let gospel = extract_verses(GOSPEL_PAGE).unwrap();
        let psalm = extract_verses(PSALM_PAGE).unwrap();
        assert_eq!(gospel, psalm);
        assert_eq!(gospel.len(), 3);
        assert_eq!(gospel[0].number, 1);
        assert_eq!(gospel[0].text, "Voyant les foules, Jésus gravit la montagne.");
        assert_eq!(gospel[1].text, "Alors, ouvrant la bouche, il les enseignait.");
        assert_eq!(psalm[2].text, "« Heureux les pauvres de cœur »");
    }

    #[test]
    fn primary_marker_wins_over_secondary() {
        let html = r#"<div class="block-single-reading">
            <p><span class="verse_number">7</span> Le <span class="text-danger">Seigneur</span> parle.</p>
        </div>"#;
        let verses = extract_verses(html).unwrap();
        assert_eq!(verses, vec![Verse { number: 7, text: "Le Seigneur parle.".to_string() }]);
    }

    #[test]
    fn document_order_is_preserved() {
        let html = r#"<div class="block-single-reading">
            <p><span class="verse_number">4</span> quatre</p>
            <p><span class="verse_number">2</span> deux</p>
            <p><span class="verse_number">2</span> deux bis</p>
        </div>"#;
        let numbers: Vec<u32> = extract_verses(html)
            .unwrap()
            .into_iter()
            .map(|v| v.number)
            .collect();
        assert_eq!(numbers, [4, 2, 2]);
    }

    #[test]
    fn non_numeric_markers_are_skipped() {
        let html = r#"<div class="block-single-reading">
            <p><span class="verse_number">R/</span> Refrain</p>
            <p><span class="verse_number">12</span> douze</p>
        </div>"#;
        let verses = extract_verses(html).unwrap();
        assert_eq!(verses.len(), 1);
        assert_eq!(verses[0].number, 12);
        assert_eq!(verses[0].text, "Douze");
    }

    #[test]
    fn missing_container_and_empty_container_are_distinct() {
        let no_container = r#"<html><body><p><span class="verse_number">1</span> a</p></body></html>"#;
        assert_eq!(
            extract_verses(no_container),
            Err(ExtractionFailure::ContainerNotFound)
        );

        let no_markers = r#"<div class="block-single-reading"><p>Texte sans numéros.</p></div>"#;
        assert_eq!(extract_verses(no_markers), Err(ExtractionFailure::ZeroVerses));
    }

    #[test]
    fn chapter_path_is_deterministic() {
        assert_eq!(chapter_path("1Tm", 5), "/bible/1Tm/5");
        assert_eq!(chapter_path("Si", 0), "/bible/Si/0");
    }

    async fn scraper_for(server: &MockServer) -> VerseScraper {
        let client = UpstreamClient::new(UpstreamConfig::with_base_url(server.uri())).unwrap();
        VerseScraper::new(client)
    }

    #[tokio::test]
    async fn fetch_builds_chapter_from_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/bible/Mt/5"))
            .respond_with(ResponseTemplate::new(200).set_body_string(GOSPEL_PAGE))
            .expect(1)
            .mount(&server)
            .await;

        let scraper = scraper_for(&server).await;
        let mt = registry().lookup_by_code("Mt").unwrap();
        let chapter = scraper.fetch(mt, 5).await.unwrap();

        assert_eq!(chapter.book, "Matthieu");
        assert_eq!(chapter.code, "Mt");
        assert_eq!(chapter.chapter, 5);
        assert_eq!(chapter.source_url, format!("{}/bible/Mt/5", server.uri()));
        assert_eq!(chapter.verses.len(), 3);
    }

    #[tokio::test]
    async fn fetch_maps_upstream_failures() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/bible/Mt/29"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/bible/Mt/1"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/bible/Mt/2"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html><body>maintenance</body></html>"))
            .mount(&server)
            .await;

        let scraper = scraper_for(&server).await;
        let mt = registry().lookup_by_code("Mt").unwrap();

        assert!(matches!(
            scraper.fetch(mt, 29).await,
            Err(LookupError::ChapterNotFound { .. })
        ));
        assert!(matches!(
            scraper.fetch(mt, 1).await,
            Err(LookupError::Connection(_))
        ));
        assert!(matches!(
            scraper.fetch(mt, 2).await,
            Err(LookupError::Extraction(ExtractionFailure::ContainerNotFound))
        ));
    }
}
