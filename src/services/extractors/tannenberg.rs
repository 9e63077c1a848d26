//! Skiclub Tannenberg snow report.
//!
//! The club publishes a text widget titled "Schneebericht". Its first
//! paragraph is the update stamp and the next three are the report. The area
//! counts as open only when the report names a groomed/open state and does
//! not mention a closure anywhere.

use std::sync::LazyLock;

use regex::Regex;
use scraper::Html;

use super::{element_text, select_text, selector};
use crate::error::Result;
use crate::models::{AreaReport, StatusValue, Trail};

static WIDGET_TITLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)schneebericht").expect("widget title pattern"));

static POSITIVE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)präpariert|offen").expect("positive pattern"));

static NEGATIVE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)geschlossen").expect("negative pattern"));

const TRAIL_NAME: &str = "Tannenberg Loipen";
const TRAIL_STYLE: &str = "Klassisch & Skating";
const TRAIL_DISTANCE: &str = "3-15 km";
const NO_DETAIL: &str = "Keine zusätzlichen Angaben";

/// Paragraphs after the stamp that make up the report.
const REPORT_PARAGRAPHS: usize = 3;

pub(super) fn parse(html: &str) -> Result<AreaReport> {
    let widget_sel = selector("#secondary .widget_text")?;
    let title_sel = selector(".widget-title")?;
    let paragraph_sel = selector(".textwidget p")?;

    let document = Html::parse_document(html);
    let root = document.root_element();

    let paragraphs: Vec<String> = root
        .select(&widget_sel)
        .find(|widget| WIDGET_TITLE.is_match(&select_text(*widget, &title_sel)))
        .map(|widget| {
            widget
                .select(&paragraph_sel)
                .map(element_text)
                .filter(|p| !p.is_empty())
                .collect()
        })
        .unwrap_or_default();

    let updated = paragraphs.first().cloned();
    let info = paragraphs
        .iter()
        .skip(1)
        .take(REPORT_PARAGRAPHS)
        .cloned()
        .collect::<Vec<_>>()
        .join(" ");
    let open = is_open(&info);

    let summary = if info.is_empty() { None } else { Some(info) };
    let status = if open {
        StatusValue::Open
    } else {
        StatusValue::Closed
    };
    let trail = Trail::new(TRAIL_NAME, status)
        .with_style(Some(TRAIL_STYLE.to_string()))
        .with_distance(Some(TRAIL_DISTANCE.to_string()))
        .with_detail(Some(
            summary.clone().unwrap_or_else(|| NO_DETAIL.to_string()),
        ));

    Ok(AreaReport {
        updated,
        open,
        summary,
        trails: vec![trail],
        webcam_url: None,
    })
}

/// Positive keyword present and no negative keyword anywhere.
fn is_open(info: &str) -> bool {
    POSITIVE.is_match(info) && !NEGATIVE.is_match(info)
}
