//! User preferences for conversions

use super::font_size::FontSize;
use serde::{Deserialize, Serialize};

/// Theme used when none is configured
pub const DEFAULT_THEME: &str = "default";

/// Conversion preferences (Value Object)
///
/// Loaded once at startup with defaults merged under persisted values.
/// Changed only through [`Preferences::apply`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    /// API key sent as `X-API-Key`
    pub api_key: String,
    /// Theme identifier understood by the conversion service
    pub theme: String,
    pub font_size: FontSize,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            theme: DEFAULT_THEME.to_string(),
            font_size: FontSize::default(),
        }
    }
}

impl Preferences {
    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    /// API key suitable for logs and display
    pub fn masked_api_key(&self) -> &'static str {
        if self.has_api_key() {
            "***set***"
        } else {
            "unset"
        }
    }

    /// Apply an update, returning true when a value actually changed
    pub fn apply(&mut self, update: PreferenceUpdate) -> bool {
        match update {
            PreferenceUpdate::ApiKey(key) => replace_if_changed(&mut self.api_key, key),
            PreferenceUpdate::Theme(theme) => {
                let theme = if theme.trim().is_empty() {
                    DEFAULT_THEME.to_string()
                } else {
                    theme.trim().to_string()
                };
                replace_if_changed(&mut self.theme, theme)
            }
            PreferenceUpdate::FontSize(size) => replace_if_changed(&mut self.font_size, size),
        }
    }
}

fn replace_if_changed<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        false
    } else {
        *slot = value;
        true
    }
}

/// A single explicit preference mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreferenceUpdate {
    ApiKey(String),
    Theme(String),
    FontSize(FontSize),
}

impl PreferenceUpdate {
    /// Parse a `key value` pair as typed by the user
    ///
    /// Accepts `api_key`/`apiKey`/`key`, `theme`, and `font_size`/`fontSize`/`font`.
    pub fn parse(key: &str, value: &str) -> Result<Self, String> {
        match key.trim() {
            "api_key" | "apiKey" | "key" => Ok(PreferenceUpdate::ApiKey(value.trim().to_string())),
            "theme" => Ok(PreferenceUpdate::Theme(value.to_string())),
            "font_size" | "fontSize" | "font" => value.parse().map(PreferenceUpdate::FontSize),
            other => Err(format!(
                "unknown preference '{}' (expected api_key, theme or font_size)",
                other
            )),
        }
    }
}
