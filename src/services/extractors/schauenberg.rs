//! Loipen Schauenberg report post.
//!
//! The report is free prose. Known trail names are looked up line by line and
//! each mention is classified from its own line. The first line that looks
//! like a written-out date is the update stamp. The post may link its own
//! webcam, which then replaces the registry default.

use std::sync::LazyLock;

use regex::Regex;
use scraper::Html;

use super::{element_text, selector};
use crate::error::Result;
use crate::models::{AreaReport, Trail};
use crate::services::classifier::status_from_text;
use crate::utils::resolve;

static DATE_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{1,2}\.\s*\w+\s*20\d{2}").expect("date line pattern"));

/// Trail name patterns and the label each is reported under.
static KNOWN_TRAILS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        (r"(?i)Loipen\s+Huggenberg", "Loipen Huggenberg"),
        (r"(?i)Waldloipe", "Waldloipe"),
        (r"(?i)Nachtloipe", "Nachtloipe"),
    ]
    .into_iter()
    .map(|(pattern, label)| (Regex::new(pattern).expect("trail pattern"), label))
    .collect()
});

/// Lines joined into the summary.
const SUMMARY_LINES: usize = 4;

pub(super) fn parse(html: &str, page_url: &str) -> Result<AreaReport> {
    let content_sel = selector(".w-post-elm.post_content")?;
    let paragraph_sel = selector("p")?;
    let webcam_sel = selector(r#"a[href*="roundshot"]"#)?;

    let document = Html::parse_document(html);
    let root = document.root_element();

    let lines: Vec<String> = root
        .select(&content_sel)
        .flat_map(|content| content.select(&paragraph_sel))
        .map(element_text)
        .filter(|line| !line.is_empty())
        .collect();

    let updated = lines.iter().find(|line| DATE_LINE.is_match(line)).cloned();

    let trails: Vec<Trail> = lines
        .iter()
        .flat_map(|line| {
            KNOWN_TRAILS
                .iter()
                .filter(move |(pattern, _)| pattern.is_match(line))
                .map(move |(_, label)| {
                    Trail::new(*label, status_from_text(line)).with_detail(Some(line.clone()))
                })
        })
        .collect();

    let webcam_url = root
        .select(&content_sel)
        .flat_map(|content| content.select(&webcam_sel))
        .find_map(|link| link.value().attr("href").map(str::to_string))
        .filter(|href| !href.is_empty())
        .map(|href| resolve(page_url, &href).unwrap_or(href));

    let summary = lines
        .iter()
        .take(SUMMARY_LINES)
        .cloned()
        .collect::<Vec<_>>()
        .join(" ");

    let open = AreaReport::any_trail_open(&trails);
    Ok(AreaReport {
        updated,
        open,
        summary: if summary.is_empty() { None } else { Some(summary) },
        trails,
        webcam_url,
    })
}
