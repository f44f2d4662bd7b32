use serde::{Deserialize, Serialize};

/// Closed set of investor risk profiles. Serialized as lowercase strings on
/// the wire and in storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskProfileKind {
    Conservative,
    Moderate,
    Aggressive,
}

impl RiskProfileKind {
    /// Assign a profile from a normalized 0-100 score. Boundaries are fixed:
    /// scores below 33 are conservative, below 66 moderate, otherwise
    /// aggressive.
    pub fn classify(normalized: f64) -> Self {
        if normalized < 33.0 {
            Self::Conservative
        } else if normalized < 66.0 {
            Self::Moderate
        } else {
            Self::Aggressive
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "conservative" => Some(Self::Conservative),
            "moderate" => Some(Self::Moderate),
            "aggressive" => Some(Self::Aggressive),
            _ => None,
        }
    }

    /// Label parse with the documented fallback: an unrecognized label gets
    /// the balanced template instead of an error.
    pub fn parse_or_moderate(label: &str) -> Self {
        Self::from_label(label).unwrap_or(Self::Moderate)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Conservative => "conservative",
            Self::Moderate => "moderate",
            Self::Aggressive => "aggressive",
        }
    }
}
