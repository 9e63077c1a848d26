//! Loipe First-Kyburg condition table.
//!
//! The page carries several tables; the trail table is the first one whose
//! header row mentions both "Loipe" and "Zustand". Its body rows are
//! name, length, condition, remark.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html};

use super::{element_text, selector};
use crate::error::Result;
use crate::models::{AreaReport, Trail};
use crate::services::classifier::status_from_text;
use crate::utils::non_empty;

static HEADER_CONDITION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)zustand").expect("condition header pattern"));

static HEADER_TRAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)loipe").expect("trail header pattern"));

const DEFAULT_SUMMARY: &str = "Status gemäss Loipen Kyburg";

pub(super) fn parse(html: &str) -> Result<AreaReport> {
    let table_sel = selector("table")?;
    let row_sel = selector("tr")?;
    let cell_sel = selector("td")?;
    let paragraph_sel = selector("p")?;

    let document = Html::parse_document(html);
    let root = document.root_element();

    let table = root.select(&table_sel).find(|table| {
        let header = table
            .select(&row_sel)
            .next()
            .map(element_text)
            .unwrap_or_default();
        HEADER_CONDITION.is_match(&header) && HEADER_TRAIL.is_match(&header)
    });

    let trails: Vec<Trail> = table
        .iter()
        .flat_map(|table| table.select(&row_sel).skip(1))
        .filter_map(|row| {
            let cells: Vec<ElementRef<'_>> = row.select(&cell_sel).collect();
            let [name, distance, condition, remark, ..] = cells.as_slice() else {
                return None;
            };
            let name = element_text(*name);
            if name.is_empty() {
                return None;
            }
            Some(
                Trail::new(name, status_from_text(&element_text(*condition)))
                    .with_distance(non_empty(element_text(*distance)))
                    .with_detail(non_empty(element_text(*remark))),
            )
        })
        .collect();

    let notice = table
        .and_then(|table| table.parent())
        .and_then(ElementRef::wrap)
        .and_then(|parent| parent.select(&paragraph_sel).next())
        .map(element_text)
        .and_then(non_empty);

    let open = AreaReport::any_trail_open(&trails);
    Ok(AreaReport {
        updated: None,
        open,
        summary: Some(notice.unwrap_or_else(|| DEFAULT_SUMMARY.to_string())),
        trails,
        webcam_url: None,
    })
}
