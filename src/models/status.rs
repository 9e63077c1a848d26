//! Trail status classification values.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Operational status of a trail or an area.
///
/// A flat categorical value; there is no ordering between members. Missing
/// signal is always `Unknown`, never an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StatusValue {
    Open,
    Closed,
    Partial,
    #[default]
    Unknown,
}

impl StatusValue {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
            Self::Partial => "partial",
            Self::Unknown => "unknown",
        }
    }

    /// German display label, as shown on the status page.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Open => "Offen",
            Self::Closed => "Geschlossen",
            Self::Partial => "Eingeschränkt",
            Self::Unknown => "Unbekannt",
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open)
    }
}

impl fmt::Display for StatusValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_lowercase() {
        let json = serde_json::to_string(&StatusValue::Partial).unwrap();
        assert_eq!(json, "\"partial\"");
        let back: StatusValue = serde_json::from_str("\"closed\"").unwrap();
        assert_eq!(back, StatusValue::Closed);
    }

    #[test]
    fn test_default_is_unknown() {
        assert_eq!(StatusValue::default(), StatusValue::Unknown);
    }

    #[test]
    fn test_labels() {
        assert_eq!(StatusValue::Open.label(), "Offen");
        assert_eq!(StatusValue::Unknown.label(), "Unbekannt");
    }
}
