//! Status classification from page text and icon classes.
//!
//! Every function here is total: any input maps to one [`StatusValue`], and
//! the absence of a recognizable signal maps to `Unknown`.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::StatusValue;
use crate::utils::clean;

static OPEN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)geöffnet|geoeffnet|offen|präpariert|praepariert|befahrbar|betrieb|\bopen\b")
        .expect("open pattern")
});

// `zu` only as a whole word, so "Zustand" and "zugeschneit" stay unmatched.
static CLOSED_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)geschlossen|\bzu\b|nicht offen|gesperrt|\bclosed\b").expect("closed pattern")
});

static PARTIAL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)teilweise|eingeschränkt|eingeschraenkt|kritisch|vorsicht|wenig schnee|in vorbereitung|präparation",
    )
    .expect("partial pattern")
});

/// Classify free text.
///
/// Patterns are tried open, closed, partial, in that order, so text naming
/// both an open and a closed state is `Open`.
pub fn status_from_text(text: &str) -> StatusValue {
    let value = clean(text).to_lowercase();
    if value.is_empty() {
        return StatusValue::Unknown;
    }
    if OPEN_PATTERN.is_match(&value) {
        return StatusValue::Open;
    }
    if CLOSED_PATTERN.is_match(&value) {
        return StatusValue::Closed;
    }
    if PARTIAL_PATTERN.is_match(&value) {
        return StatusValue::Partial;
    }
    StatusValue::Unknown
}

/// Numeric tier icons (`icon-status0` .. `icon-status3`).
pub fn status_from_tier_icon(class_name: &str) -> StatusValue {
    if class_name.contains("icon-status0") {
        StatusValue::Closed
    } else if class_name.contains("icon-status1") {
        StatusValue::Partial
    } else if class_name.contains("icon-status2") || class_name.contains("icon-status3") {
        StatusValue::Open
    } else {
        StatusValue::Unknown
    }
}

/// Named state icons (`icon-offen`, `icon-kritisch`, `icon-geschlossen`).
pub fn status_from_named_icon(class_name: &str) -> StatusValue {
    if class_name.contains("icon-offen") {
        StatusValue::Open
    } else if class_name.contains("icon-kritisch") {
        StatusValue::Partial
    } else if class_name.contains("icon-geschlossen") {
        StatusValue::Closed
    } else {
        StatusValue::Unknown
    }
}

/// BEM status modifiers (`status--success`, `status--info`, `status--error`).
pub fn status_from_modifier_class(class_name: &str) -> StatusValue {
    if class_name.contains("status--success") {
        StatusValue::Open
    } else if class_name.contains("status--info") {
        StatusValue::Partial
    } else if class_name.contains("status--error") {
        StatusValue::Closed
    } else {
        StatusValue::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_is_unknown() {
        assert_eq!(status_from_text(""), StatusValue::Unknown);
        assert_eq!(status_from_text("   \n\t "), StatusValue::Unknown);
    }

    #[test]
    fn test_open_keywords() {
        assert_eq!(status_from_text("Loipe offen"), StatusValue::Open);
        assert_eq!(status_from_text("PRÄPARIERT"), StatusValue::Open);
        assert_eq!(status_from_text("gut befahrbar"), StatusValue::Open);
        assert_eq!(status_from_text("In Betrieb"), StatusValue::Open);
        assert_eq!(status_from_text("Geöffnet"), StatusValue::Open);
    }

    #[test]
    fn test_closed_keywords() {
        assert_eq!(status_from_text("geschlossen"), StatusValue::Closed);
        assert_eq!(status_from_text("Loipe gesperrt"), StatusValue::Closed);
        assert_eq!(status_from_text("heute zu"), StatusValue::Closed);
    }

    #[test]
    fn test_zu_only_matches_as_word() {
        assert_eq!(status_from_text("Zustand unbekannt"), StatusValue::Unknown);
        assert_eq!(status_from_text("Loipe zugeschneit"), StatusValue::Unknown);
        assert_eq!(status_from_text("Loipe zu."), StatusValue::Closed);
    }

    #[test]
    fn test_english_keywords_are_whole_words() {
        assert_eq!(status_from_text("closed"), StatusValue::Closed);
        assert_eq!(status_from_text("Open"), StatusValue::Open);
        assert_eq!(status_from_text("reopening soon"), StatusValue::Unknown);
    }

    #[test]
    fn test_partial_keywords() {
        assert_eq!(status_from_text("teilweise"), StatusValue::Partial);
        assert_eq!(status_from_text("Eingeschränkt"), StatusValue::Partial);
        assert_eq!(status_from_text("kritisch"), StatusValue::Partial);
        assert_eq!(status_from_text("wenig   Schnee"), StatusValue::Partial);
        assert_eq!(status_from_text("in Vorbereitung"), StatusValue::Partial);
    }

    #[test]
    fn test_open_wins_over_closed() {
        assert_eq!(
            status_from_text("präpariert, aber Teilbereich geschlossen"),
            StatusValue::Open
        );
        assert_eq!(status_from_text("nicht offen"), StatusValue::Open);
    }

    #[test]
    fn test_unmatched_text_is_unknown() {
        assert_eq!(status_from_text("-"), StatusValue::Unknown);
        assert_eq!(status_from_text("Neuschnee 10 cm"), StatusValue::Unknown);
    }

    #[test]
    fn test_tier_icon() {
        assert_eq!(status_from_tier_icon("icon-status icon-status0"), StatusValue::Closed);
        assert_eq!(status_from_tier_icon("icon-status icon-status1"), StatusValue::Partial);
        assert_eq!(status_from_tier_icon("icon-status icon-status2"), StatusValue::Open);
        assert_eq!(status_from_tier_icon("icon-status icon-status3"), StatusValue::Open);
        assert_eq!(status_from_tier_icon("icon-status"), StatusValue::Unknown);
        assert_eq!(status_from_tier_icon(""), StatusValue::Unknown);
    }

    #[test]
    fn test_named_icon() {
        assert_eq!(status_from_named_icon("icon icon-offen"), StatusValue::Open);
        assert_eq!(status_from_named_icon("icon-kritisch"), StatusValue::Partial);
        assert_eq!(status_from_named_icon("icon-geschlossen"), StatusValue::Closed);
        assert_eq!(status_from_named_icon("icon-status2"), StatusValue::Unknown);
        assert_eq!(status_from_named_icon(""), StatusValue::Unknown);
    }

    #[test]
    fn test_modifier_class() {
        assert_eq!(status_from_modifier_class("status status--success"), StatusValue::Open);
        assert_eq!(status_from_modifier_class("status status--info"), StatusValue::Partial);
        assert_eq!(status_from_modifier_class("status status--error"), StatusValue::Closed);
        assert_eq!(status_from_modifier_class("status"), StatusValue::Unknown);
        assert_eq!(status_from_modifier_class(""), StatusValue::Unknown);
    }
}
