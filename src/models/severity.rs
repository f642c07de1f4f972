use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How strongly a disliked food or an allergy should be avoided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Mild,
    Moderate,
    Severe,
}

impl Severity {
    pub const ALL: [Severity; 3] = [Severity::Mild, Severity::Moderate, Severity::Severe];

    /// Label shown next to a disliked food.
    pub fn dislike_label(&self) -> &'static str {
        match self {
            Severity::Mild => "Mild",
            Severity::Moderate => "Moderate",
            Severity::Severe => "Absolutely Not",
        }
    }

    pub fn dislike_description(&self) -> &'static str {
        match self {
            Severity::Mild => "Slight discomfort or preference to avoid",
            Severity::Moderate => "Noticeable reaction or strong dislike",
            Severity::Severe => "Strong adverse reaction",
        }
    }

    /// Label shown next to an allergy.
    pub fn allergy_label(&self) -> &'static str {
        match self {
            Severity::Mild => "Mild",
            Severity::Moderate => "Moderate",
            Severity::Severe => "Severe",
        }
    }

    /// Default reaction text recorded for a new allergy at this severity.
    pub fn allergy_description(&self) -> &'static str {
        match self {
            Severity::Mild => "Digestive sensitivity",
            Severity::Moderate => "Noticeable reaction",
            Severity::Severe => "Anaphylaxis risk",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Mild => write!(f, "mild"),
            Severity::Moderate => write!(f, "moderate"),
            Severity::Severe => write!(f, "severe"),
        }
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mild" => Ok(Severity::Mild),
            "moderate" => Ok(Severity::Moderate),
            "severe" => Ok(Severity::Severe),
            _ => Err(format!(
                "Invalid severity '{}'. Valid options: mild, moderate, severe",
                s
            )),
        }
    }
}
