//! Conversion request value object

use crate::core::error::ConversionError;
use crate::preferences::{font_size::FontSize, settings::Preferences};
use serde::{Deserialize, Serialize};

/// One conversion request, serialized directly as the wire body
///
/// ```json
/// {"markdown": "# Hi", "theme": "default", "fontSize": "medium"}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionRequest {
    #[serde(rename = "markdown")]
    source_text: String,
    theme: String,
    #[serde(rename = "fontSize")]
    font_size: FontSize,
}

impl ConversionRequest {
    /// Build a request from document text and the current preferences
    ///
    /// Returns [`ConversionError::EmptyInput`] if the text is empty or only
    /// whitespace. The text itself is sent unmodified.
    pub fn new(
        source_text: impl Into<String>,
        preferences: &Preferences,
    ) -> Result<Self, ConversionError> {
        let source_text = source_text.into();
        if source_text.trim().is_empty() {
            return Err(ConversionError::EmptyInput);
        }
        Ok(Self {
            source_text,
            theme: preferences.theme.clone(),
            font_size: preferences.font_size,
        })
    }

    pub fn source_text(&self) -> &str {
        &self.source_text
    }

    pub fn theme(&self) -> &str {
        &self.theme
    }

    pub fn font_size(&self) -> FontSize {
        self.font_size
    }

    /// Serialize to the JSON request body
    pub fn to_body(&self) -> String {
        // A struct of strings and a unit enum always serializes.
        serde_json::to_string(self).unwrap_or_default()
    }
}
