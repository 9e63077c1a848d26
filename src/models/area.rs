//! Normalized trail and area report structures.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::StatusValue;

/// A single groomed segment or route within an area.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Trail {
    /// Human-readable label
    pub name: String,

    /// Discipline descriptor (classic, skating, combined)
    pub style: Option<String>,

    /// Free-text distance, e.g. "3-15 km"
    pub distance: Option<String>,

    pub status: StatusValue,

    /// Free-text elaboration
    pub detail: Option<String>,
}

impl Trail {
    /// Create a trail with only a name and status.
    pub fn new(name: impl Into<String>, status: StatusValue) -> Self {
        Self {
            name: name.into(),
            style: None,
            distance: None,
            status,
            detail: None,
        }
    }

    pub fn with_style(mut self, style: Option<String>) -> Self {
        self.style = style;
        self
    }

    pub fn with_distance(mut self, distance: Option<String>) -> Self {
        self.distance = distance;
        self
    }

    pub fn with_detail(mut self, detail: Option<String>) -> Self {
        self.detail = detail;
        self
    }
}

/// What one extractor reads from one source page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct AreaReport {
    /// Last update as published by the source; never parsed into a date
    pub updated: Option<String>,

    /// Whether the area as a whole is operating
    pub open: bool,

    pub summary: Option<String>,

    /// Trails in source-page order
    pub trails: Vec<Trail>,

    /// Overrides the registry webcam link when present
    pub webcam_url: Option<String>,
}

impl AreaReport {
    /// True iff at least one trail resolved to `open`.
    pub fn any_trail_open(trails: &[Trail]) -> bool {
        trails.iter().any(|trail| trail.status.is_open())
    }
}

/// One entry of the feed: registry metadata merged with an area report.
///
/// On failure `error` carries the message, `trails` is empty and `open` is
/// `false`. That `false` is a placeholder, not an observed closure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AreaResult {
    pub id: String,
    pub name: String,
    pub url: String,
    pub webcam_url: Option<String>,
    pub fetched_at: DateTime<Utc>,
    pub updated: Option<String>,
    pub open: bool,
    pub summary: Option<String>,
    pub trails: Vec<Trail>,
    pub error: Option<String>,
}

impl AreaResult {
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    pub fn open_trail_count(&self) -> usize {
        self.trails.iter().filter(|t| t.status.is_open()).count()
    }
}

/// Top-level payload handed to the page renderer and the snapshot file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Feed {
    pub generated_at: DateTime<Utc>,
    pub areas: Vec<AreaResult>,
}

impl Feed {
    /// Wrap the areas of one aggregation cycle, stamped now.
    pub fn new(areas: Vec<AreaResult>) -> Self {
        Self {
            generated_at: Utc::now(),
            areas,
        }
    }

    /// Number of areas reported as operating.
    pub fn open_count(&self) -> usize {
        self.areas.iter().filter(|a| a.open).count()
    }

    /// Number of areas whose extraction failed this cycle.
    pub fn failed_count(&self) -> usize {
        self.areas.iter().filter(|a| a.is_error()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_area(error: Option<&str>) -> AreaResult {
        AreaResult {
            id: "gais".to_string(),
            name: "Langlaufzentrum Gais".to_string(),
            url: "https://langlauf-gais.ch/".to_string(),
            webcam_url: None,
            fetched_at: Utc::now(),
            updated: None,
            open: error.is_none(),
            summary: None,
            trails: vec![
                Trail::new("Rundloipe (skating)", StatusValue::Open),
                Trail::new("Rundloipe (klassisch)", StatusValue::Closed),
            ],
            error: error.map(str::to_string),
        }
    }

    #[test]
    fn test_area_result_uses_camel_case_and_null_fields() {
        let json = serde_json::to_value(sample_area(None)).unwrap();
        assert!(json.get("webcamUrl").is_some());
        assert!(json.get("fetchedAt").is_some());
        assert!(json["error"].is_null());
        assert!(json["webcamUrl"].is_null());
        assert_eq!(json["trails"][0]["status"], "open");
        assert!(json["trails"][0]["distance"].is_null());
    }

    #[test]
    fn test_feed_shape_and_counts() {
        let feed = Feed::new(vec![sample_area(None), sample_area(Some("HTTP 500"))]);
        assert_eq!(feed.open_count(), 1);
        assert_eq!(feed.failed_count(), 1);

        let json = serde_json::to_value(&feed).unwrap();
        assert!(json["generatedAt"].is_string());
        assert_eq!(json["areas"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_any_trail_open() {
        let trails = vec![
            Trail::new("a", StatusValue::Closed),
            Trail::new("b", StatusValue::Partial),
        ];
        assert!(!AreaReport::any_trail_open(&trails));
        assert!(!AreaReport::any_trail_open(&[]));
        assert!(AreaReport::any_trail_open(&[Trail::new("c", StatusValue::Open)]));
    }

    #[test]
    fn test_open_trail_count() {
        assert_eq!(sample_area(None).open_trail_count(), 1);
    }
}
