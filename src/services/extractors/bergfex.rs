//! bergfex trail plan.
//!
//! The report sits in a `dl.loipen-bericht` definition list (first `dd` is the
//! update time, the `dd` after the "Betrieb" term is the operation text) and
//! the trails in `table.status-table`. Row status prefers the desktop-only
//! text column and falls back to the tier icon when that column is empty or a
//! placeholder dash.

use std::sync::LazyLock;

use regex::Regex;
use scraper::Html;

use super::{element_text, next_element, select_attr, select_text, selector};
use crate::error::Result;
use crate::models::{AreaReport, Trail};
use crate::services::classifier::{status_from_text, status_from_tier_icon};
use crate::utils::{clean, non_empty};

static OPERATION_TERM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)betrieb").expect("operation term pattern"));

static OPERATING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)offen|betrieb").expect("operating pattern"));

pub(super) fn parse(html: &str) -> Result<AreaReport> {
    let report_dd = selector("dl.loipen-bericht dd")?;
    let report_dt = selector("dl.loipen-bericht dt")?;
    let row_sel = selector("table.status-table tbody tr")?;
    let name_sel = selector(".loipen-name .bold")?;
    let style_sel = selector(".loipen-name .small")?;
    let length_sel = selector(".loipen-laenge")?;
    let desktop_sel = selector("td.desktop-only")?;
    let icon_sel = selector(".icon-status")?;

    let document = Html::parse_document(html);
    let root = document.root_element();

    let updated = root
        .select(&report_dd)
        .next()
        .map(element_text)
        .and_then(non_empty);

    let operation_raw: String = root
        .select(&report_dt)
        .filter(|dt| OPERATION_TERM.is_match(&dt.text().collect::<String>()))
        .filter_map(next_element)
        .filter(|el| el.value().name() == "dd")
        .map(|dd| dd.text().collect::<String>())
        .collect();
    let operation = clean(&operation_raw);

    let trails = root
        .select(&row_sel)
        .filter_map(|row| {
            let name = select_text(row, &name_sel);
            if name.is_empty() {
                return None;
            }
            let desktop_status = select_text(row, &desktop_sel);
            let status = if !desktop_status.is_empty() && desktop_status != "-" {
                status_from_text(&desktop_status)
            } else {
                status_from_tier_icon(&select_attr(row, &icon_sel, "class").unwrap_or_default())
            };
            Some(
                Trail::new(name, status)
                    .with_style(non_empty(select_text(row, &style_sel)))
                    .with_distance(non_empty(select_text(row, &length_sel))),
            )
        })
        .collect();

    Ok(AreaReport {
        updated,
        open: OPERATING.is_match(&operation),
        summary: non_empty(operation),
        trails,
        webcam_url: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StatusValue;

    const PAGE: &str = r#"
        <html><body>
        <dl class="loipen-bericht">
            <dt>Letzte Aktualisierung</dt>
            <dd> 14.01.2026  07:30 </dd>
            <dt>Loipenbetrieb</dt>
            <dd>Loipen in Betrieb</dd>
        </dl>
        <table class="status-table">
            <tr>
                <td class="loipen-name"><span class="bold">Panoramaloipe</span><span class="small">klassisch</span></td>
                <td class="loipen-laenge">8 km</td>
                <td class="desktop-only">gespurt, geöffnet</td>
                <td><span class="icon-status icon-status0"></span></td>
            </tr>
            <tr>
                <td class="loipen-name"><span class="bold">Amslen</span><span class="small">skating</span></td>
                <td class="loipen-laenge">4 km</td>
                <td class="desktop-only">-</td>
                <td><span class="icon-status icon-status1"></span></td>
            </tr>
            <tr>
                <td class="loipen-name"><span class="bold">Bachtel</span></td>
                <td class="loipen-laenge"></td>
                <td class="desktop-only"></td>
                <td><span class="icon-status"></span></td>
            </tr>
            <tr>
                <td class="loipen-name"><span class="small">no name</span></td>
            </tr>
        </table>
        </body></html>
    "#;

    #[test]
    fn test_reads_report_and_operation() {
        let report = parse(PAGE).unwrap();
        assert_eq!(report.updated.as_deref(), Some("14.01.2026 07:30"));
        assert_eq!(report.summary.as_deref(), Some("Loipen in Betrieb"));
        assert!(report.open);
    }

    #[test]
    fn test_text_status_preferred_over_icon() {
        let report = parse(PAGE).unwrap();
        assert_eq!(report.trails.len(), 3);
        let first = &report.trails[0];
        assert_eq!(first.name, "Panoramaloipe");
        assert_eq!(first.style.as_deref(), Some("klassisch"));
        assert_eq!(first.distance.as_deref(), Some("8 km"));
        assert_eq!(first.status, StatusValue::Open);
    }

    #[test]
    fn test_dash_falls_back_to_icon() {
        let report = parse(PAGE).unwrap();
        assert_eq!(report.trails[1].status, StatusValue::Partial);
        assert_eq!(report.trails[2].status, StatusValue::Unknown);
        assert_eq!(report.trails[2].style, None);
        assert_eq!(report.trails[2].distance, None);
    }

    #[test]
    fn test_closed_operation() {
        let page = r#"<dl class="loipen-bericht"><dt>Betrieb</dt><dd>geschlossen</dd></dl>"#;
        let report = parse(page).unwrap();
        assert!(!report.open);
        assert_eq!(report.summary.as_deref(), Some("geschlossen"));
        assert_eq!(report.updated.as_deref(), Some("geschlossen"));
    }

    #[test]
    fn test_empty_page() {
        let report = parse("<html></html>").unwrap();
        assert_eq!(report, AreaReport::default());
    }
}
