//! Langlaufzentrum Gais status table.
//!
//! One row per segment with a classic and a skating column, each carrying a
//! named state icon. Every column becomes its own trail unless its icon is
//! not recognized, in which case that column is dropped.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use super::{closest_with_class, element_text, select_attr, selector};
use crate::error::Result;
use crate::models::{AreaReport, StatusValue, Trail};
use crate::services::classifier::status_from_named_icon;

static HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)loipenzustand").expect("heading pattern"));

const SUMMARY: &str = "Langlaufzentrum Gais – Statusübersicht";

pub(super) fn parse(html: &str) -> Result<AreaReport> {
    let row_sel = selector("div.table--loipe table tbody tr")?;
    let cell_sel = selector("td")?;
    let icon_sel = selector("span")?;
    let heading_sel = selector("div.mod_article h2")?;
    let paragraph_sel = selector("p")?;

    let document = Html::parse_document(html);
    let root = document.root_element();

    let mut trails = Vec::new();
    for row in root.select(&row_sel) {
        let cells: Vec<ElementRef<'_>> = row.select(&cell_sel).collect();
        let [segment, classic, skating, ..] = cells.as_slice() else {
            continue;
        };
        let segment = element_text(*segment);

        let classic = icon_status(*classic, &icon_sel);
        if classic != StatusValue::Unknown {
            trails.push(
                Trail::new(format!("{segment} (klassisch)"), classic)
                    .with_style(Some("Klassisch".to_string())),
            );
        }
        let skating = icon_status(*skating, &icon_sel);
        if skating != StatusValue::Unknown {
            trails.push(
                Trail::new(format!("{segment} (skating)"), skating)
                    .with_style(Some("Skating".to_string())),
            );
        }
    }

    let updated = root
        .select(&heading_sel)
        .filter(|h2| HEADING.is_match(&h2.text().collect::<String>()))
        .filter_map(|h2| closest_with_class(h2, "content-table"))
        .find_map(|table| table.select(&paragraph_sel).next())
        .map(element_text)
        .filter(|text| !text.is_empty());

    let open = AreaReport::any_trail_open(&trails);
    Ok(AreaReport {
        updated,
        open,
        summary: Some(SUMMARY.to_string()),
        trails,
        webcam_url: None,
    })
}

fn icon_status(cell: ElementRef<'_>, icon_sel: &Selector) -> StatusValue {
    status_from_named_icon(&select_attr(cell, icon_sel, "class").unwrap_or_default())
}
