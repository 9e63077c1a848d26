//! Site-specific extractors.
//!
//! Each source site publishes its trail report with its own markup, so each
//! gets its own parser. All of them share one contract: take the page HTML,
//! return an [`AreaReport`]. Missing elements never fail a parse; they turn
//! into absent fields or `unknown` status. Only a fetch failure or a broken
//! selector makes an extractor fail.

mod bergfex;
mod flumserberg;
mod gais;
mod kyburg;
mod schauenberg;
mod schwedentritt;
mod tannenberg;

use scraper::{ElementRef, Selector};

use crate::error::{AppError, Result};
use crate::models::AreaReport;
use crate::services::fetcher::PageFetcher;
use crate::services::registry::Source;
use crate::utils::clean;

pub use schwedentritt::extract_comment_timestamp;

/// The closed set of supported source sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Extractor {
    /// bergfex.ch trail plan table
    Bergfex,
    /// Skiclub Tannenberg snow report widget
    Tannenberg,
    /// Schwedentritt Einsiedeln trail condition block
    Schwedentritt,
    /// Langlaufzentrum Gais icon table
    Gais,
    /// Loipen Schauenberg report post
    Schauenberg,
    /// Loipe First-Kyburg condition table
    Kyburg,
    /// Bergbahnen Flumserberg facility table
    Flumserberg,
}

impl Extractor {
    /// Fetch the source page and parse it.
    pub async fn extract(self, fetcher: &dyn PageFetcher, source: &Source) -> Result<AreaReport> {
        let html = fetcher.fetch(source.url).await?;
        let report = self.parse(&html, source)?;
        log::debug!(
            "Parsed {}: {} trails, open={}",
            source.id,
            report.trails.len(),
            report.open
        );
        Ok(report)
    }

    /// Parse already fetched page HTML.
    pub fn parse(self, html: &str, source: &Source) -> Result<AreaReport> {
        let parsed = match self {
            Self::Bergfex => bergfex::parse(html),
            Self::Tannenberg => tannenberg::parse(html),
            Self::Schwedentritt => schwedentritt::parse(html),
            Self::Gais => gais::parse(html),
            Self::Schauenberg => schauenberg::parse(html, source.url),
            Self::Kyburg => kyburg::parse(html),
            Self::Flumserberg => flumserberg::parse(html),
        };
        parsed.map_err(|e| AppError::parse(source.id, e))
    }
}

// --- Markup helpers shared by the site parsers ---

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| AppError::selector(css, format!("{e:?}")))
}

/// Cleaned text content of one element.
fn element_text(element: ElementRef<'_>) -> String {
    clean(&element.text().collect::<String>())
}

/// Cleaned text of every match below `scope`, concatenated.
fn select_text(scope: ElementRef<'_>, selector: &Selector) -> String {
    let raw: String = scope
        .select(selector)
        .map(|el| el.text().collect::<String>())
        .collect();
    clean(&raw)
}

/// Attribute of the first match below `scope`.
fn select_attr(scope: ElementRef<'_>, selector: &Selector, attr: &str) -> Option<String> {
    scope
        .select(selector)
        .next()
        .and_then(|el| el.value().attr(attr))
        .map(str::to_string)
}

/// Following sibling element, skipping text nodes.
fn next_element(element: ElementRef<'_>) -> Option<ElementRef<'_>> {
    element.next_siblings().find_map(ElementRef::wrap)
}

/// The element itself or its nearest ancestor carrying `class`.
fn closest_with_class<'a>(element: ElementRef<'a>, class: &str) -> Option<ElementRef<'a>> {
    std::iter::once(element)
        .chain(element.ancestors().filter_map(ElementRef::wrap))
        .find(|el| el.value().classes().any(|c| c == class))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StatusValue;
    use crate::services::registry;
    use async_trait::async_trait;
    use scraper::Html;

    struct StaticPage(&'static str);

    #[async_trait]
    impl PageFetcher for StaticPage {
        async fn fetch(&self, _url: &str) -> Result<String> {
            Ok(self.0.to_string())
        }
    }

    struct NotFound;

    #[async_trait]
    impl PageFetcher for NotFound {
        async fn fetch(&self, url: &str) -> Result<String> {
            Err(AppError::fetch(url, 404))
        }
    }

    #[test]
    fn test_selector_valid_and_invalid() {
        assert!(selector("div.table--loipe table tbody tr").is_ok());
        assert!(matches!(
            selector("[[invalid"),
            Err(AppError::Selector { .. })
        ));
    }

    #[test]
    fn test_select_text_concatenates_matches() {
        let doc = Html::parse_document("<div><b> A </b><b>B\n</b></div>");
        let sel = selector("b").unwrap();
        assert_eq!(select_text(doc.root_element(), &sel), "A B");
    }

    #[test]
    fn test_next_element_skips_text() {
        let doc = Html::parse_document("<div><table id=t></table> text <p>note</p></div>");
        let table = doc.select(&selector("#t").unwrap()).next().unwrap();
        let next = next_element(table).unwrap();
        assert_eq!(next.value().name(), "p");
    }

    #[test]
    fn test_closest_with_class() {
        let doc = Html::parse_document(
            "<div class='content-table outer'><section><h2>x</h2></section></div>",
        );
        let h2 = doc.select(&selector("h2").unwrap()).next().unwrap();
        let found = closest_with_class(h2, "content-table").unwrap();
        assert_eq!(found.value().name(), "div");
        assert!(closest_with_class(h2, "missing").is_none());
    }

    #[tokio::test]
    async fn test_extract_parses_fetched_page() {
        let source = registry::find("tannenberg").unwrap();
        let page = StaticPage(
            r#"<div id="secondary"><div class="widget_text">
                <h3 class="widget-title">Schneebericht</h3>
                <div class="textwidget"><p>12.01.2026</p><p>Loipen präpariert</p></div>
            </div></div>"#,
        );
        let report = source.extractor.extract(&page, source).await.unwrap();
        assert!(report.open);
        assert_eq!(report.trails[0].status, StatusValue::Open);
    }

    #[tokio::test]
    async fn test_extract_propagates_fetch_error() {
        let source = registry::find("gais").unwrap();
        let err = source.extractor.extract(&NotFound, source).await.unwrap_err();
        assert_eq!(err.to_string(), "HTTP 404");
    }

    #[test]
    fn test_every_extractor_tolerates_empty_page() {
        for source in registry::sources() {
            let report = source.extractor.parse("", source).unwrap();
            assert!(!report.trails.is_empty() || !report.open, "{}", source.id);
            for trail in &report.trails {
                assert!(!trail.name.is_empty());
            }
        }
    }
}
