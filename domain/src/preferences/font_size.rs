//! Font size value object

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Body font size requested from the conversion service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl FontSize {
    /// Wire identifier for this size
    pub fn as_str(&self) -> &'static str {
        match self {
            FontSize::Small => "small",
            FontSize::Medium => "medium",
            FontSize::Large => "large",
        }
    }
}

impl std::fmt::Display for FontSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FontSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "small" | "s" => Ok(FontSize::Small),
            "medium" | "m" => Ok(FontSize::Medium),
            "large" | "l" => Ok(FontSize::Large),
            other => Err(format!(
                "unknown font size '{}' (expected small, medium or large)",
                other
            )),
        }
    }
}
