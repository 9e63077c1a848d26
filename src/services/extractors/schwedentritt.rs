//! Schwedentritt Einsiedeln trail condition block.
//!
//! The condition table groups rows by distance: a three-cell row opens a new
//! distance group (distance, style, status) and the two-cell rows after it
//! (style, status) belong to that group until the next three-cell row. The
//! update stamp only exists inside an inline comment.

use regex::Regex;
use scraper::{ElementRef, Html};

use super::{element_text, selector};
use crate::error::Result;
use crate::models::{AreaReport, Trail};
use crate::services::classifier::status_from_text;
use crate::utils::{clean, non_empty};

const STAMP_LABEL: &str = "Loipenzustand";
const SUMMARY: &str = "Loipenbericht Schwedentritt";

pub(super) fn parse(html: &str) -> Result<AreaReport> {
    let row_sel = selector("#block_12564 table tr")?;
    let cell_sel = selector("td")?;

    let document = Html::parse_document(html);
    let root = document.root_element();

    let (_, trails) = root.select(&row_sel).fold(
        (None::<String>, Vec::new()),
        |(current_distance, mut trails), row| {
            let cells: Vec<ElementRef<'_>> = row.select(&cell_sel).collect();
            match cells.as_slice() {
                [distance, style, status] => {
                    let distance = element_text(*distance);
                    trails.push(trail(&distance, *style, *status));
                    (non_empty(distance), trails)
                }
                [style, status] => {
                    if let Some(distance) = &current_distance {
                        trails.push(trail(distance, *style, *status));
                    }
                    (current_distance, trails)
                }
                _ => (current_distance, trails),
            }
        },
    );

    let open = AreaReport::any_trail_open(&trails);
    Ok(AreaReport {
        updated: extract_comment_timestamp(html, STAMP_LABEL),
        open,
        summary: Some(SUMMARY.to_string()),
        trails,
        webcam_url: None,
    })
}

fn trail(distance: &str, style: ElementRef<'_>, status: ElementRef<'_>) -> Trail {
    let style = element_text(style);
    Trail::new(
        clean(&format!("{distance} {style}")),
        status_from_text(&element_text(status)),
    )
    .with_style(non_empty(style))
    .with_distance(non_empty(distance.to_string()))
}

/// Find `<label>" (letzte Aktualisierung am <stamp>)` in the raw page and
/// return the stamp.
pub fn extract_comment_timestamp(html: &str, label: &str) -> Option<String> {
    let pattern = format!(
        r#"{}" \(letzte Aktualisierung am ([^)]+)\)"#,
        regex::escape(label)
    );
    let regex = Regex::new(&pattern).ok()?;
    regex
        .captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StatusValue;

    fn page(rows: &str) -> String {
        format!(
            r#"<html><body>
            <!-- Block "Loipenzustand" (letzte Aktualisierung am 14.01.2026 08:15) -->
            <div id="block_12564"><table>{rows}</table></div>
            </body></html>"#
        )
    }

    #[test]
    fn test_distance_carries_over_to_two_cell_rows() {
        let html = page(
            "<tr><td>2.5 km</td><td>classic</td><td>open</td></tr>\
             <tr><td>skating</td><td>closed</td></tr>",
        );
        let report = parse(&html).unwrap();
        assert_eq!(report.trails.len(), 2);
        assert_eq!(report.trails[0].distance.as_deref(), Some("2.5 km"));
        assert_eq!(report.trails[1].distance.as_deref(), Some("2.5 km"));
        assert_eq!(report.trails[0].name, "2.5 km classic");
        assert_eq!(report.trails[1].name, "2.5 km skating");
        assert_eq!(report.trails[0].status, StatusValue::Open);
        assert_eq!(report.trails[1].status, StatusValue::Closed);
        assert!(report.open);
    }

    #[test]
    fn test_new_group_resets_distance() {
        let html = page(
            "<tr><th>Strecke</th><th>Stil</th></tr>\
             <tr><td>Loipe</td><td>offen</td></tr>\
             <tr><td>5 km</td><td>Klassisch</td><td>präpariert</td></tr>\
             <tr><td>Skating</td><td>geschlossen</td></tr>\
             <tr><td>10 km</td><td>Klassisch</td><td>gesperrt</td></tr>\
             <tr><td>Skating</td><td>gesperrt</td></tr>\
             <tr><td>a</td><td>b</td><td>c</td><td>d</td></tr>",
        );
        let report = parse(&html).unwrap();
        let names: Vec<_> = report.trails.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(
            names,
            ["5 km Klassisch", "5 km Skating", "10 km Klassisch", "10 km Skating"]
        );
        assert_eq!(report.trails[3].distance.as_deref(), Some("10 km"));
        assert_eq!(report.trails[3].style.as_deref(), Some("Skating"));
    }

    #[test]
    fn test_open_only_when_a_trail_is_open() {
        let html = page(
            "<tr><td>5 km</td><td>Klassisch</td><td>geschlossen</td></tr>\
             <tr><td>Skating</td><td>teilweise</td></tr>",
        );
        let report = parse(&html).unwrap();
        assert!(!report.open);
        assert_eq!(report.trails[1].status, StatusValue::Partial);
    }

    #[test]
    fn test_comment_timestamp() {
        let report = parse(&page("")).unwrap();
        assert_eq!(report.updated.as_deref(), Some("14.01.2026 08:15"));
        assert_eq!(report.summary.as_deref(), Some("Loipenbericht Schwedentritt"));
    }

    #[test]
    fn test_missing_timestamp_is_none() {
        assert_eq!(extract_comment_timestamp("<html></html>", "Loipenzustand"), None);
        assert_eq!(
            extract_comment_timestamp(r#"Other" (letzte Aktualisierung am 1.1.)"#, "Loipenzustand"),
            None
        );
    }
}
