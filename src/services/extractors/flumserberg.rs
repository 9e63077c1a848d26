//! Bergbahnen Flumserberg facility table.
//!
//! The facility table lists every facility type. Only rows whose type icon is
//! labelled "Langlauf" count; the style comes from a parenthesized suffix of
//! that label ("Langlauf (Skating)"). Rows hidden from assistive technology
//! are duplicates for the mobile layout and are skipped.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html};

use super::{element_text, next_element, select_attr, selector};
use crate::error::Result;
use crate::models::{AreaReport, Trail};
use crate::services::classifier::status_from_modifier_class;
use crate::utils::{clean, non_empty};

static DISCIPLINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)langlauf").expect("discipline pattern"));

static STYLE_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)langlauf\s*\(([^)]+)\)").expect("style suffix pattern"));

const DEFAULT_SUMMARY: &str = "Status laut Bergbahnen Flumserberg";

pub(super) fn parse(html: &str) -> Result<AreaReport> {
    let table_sel = selector("table.facility-table")?;
    let row_sel = selector("table.facility-table tbody tr")?;
    let cell_sel = selector("td")?;
    let icon_sel = selector("span")?;
    let status_sel = selector(".status")?;

    let document = Html::parse_document(html);
    let root = document.root_element();

    let mut trails = Vec::new();
    for row in root.select(&row_sel) {
        if row.value().attr("aria-hidden") == Some("true") {
            continue;
        }
        let cells: Vec<ElementRef<'_>> = row.select(&cell_sel).collect();
        let [_, kind, name, status, ..] = cells.as_slice() else {
            continue;
        };

        let type_title = type_title(*kind, &icon_sel);
        if !DISCIPLINE.is_match(&type_title) {
            continue;
        }
        let name = element_text(*name);
        if name.is_empty() {
            continue;
        }
        let status_class = select_attr(*status, &status_sel, "class").unwrap_or_default();
        trails.push(
            Trail::new(name, status_from_modifier_class(&status_class))
                .with_style(style_from_title(&type_title)),
        );
    }

    let legend = root
        .select(&table_sel)
        .last()
        .and_then(next_element)
        .map(element_text)
        .and_then(non_empty);

    let open = AreaReport::any_trail_open(&trails);
    Ok(AreaReport {
        updated: None,
        open,
        summary: Some(legend.unwrap_or_else(|| DEFAULT_SUMMARY.to_string())),
        trails,
        webcam_url: None,
    })
}

/// Label of the type icon: `title`, else `aria-label`, else empty.
fn type_title(cell: ElementRef<'_>, icon_sel: &scraper::Selector) -> String {
    let non_blank = |value: Option<String>| value.filter(|v| !v.is_empty());
    non_blank(select_attr(cell, icon_sel, "title"))
        .or_else(|| non_blank(select_attr(cell, icon_sel, "aria-label")))
        .unwrap_or_default()
}

/// "Langlauf (Skating)" gives "Skating"; otherwise whatever remains once the
/// discipline word is removed.
fn style_from_title(title: &str) -> Option<String> {
    match STYLE_SUFFIX.captures(title).and_then(|caps| caps.get(1)) {
        Some(style) => non_empty(clean(style.as_str())),
        None => non_empty(clean(&DISCIPLINE.replace(title, ""))),
    }
}
