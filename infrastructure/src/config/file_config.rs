//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.
//!
//! ```toml
//! [preferences]
//! api_key = "wme_your_api_key_here"
//! theme = "default"
//! font_size = "medium"
//!
//! [service]
//! endpoint = "https://www.md2wechat.cn/api/convert"
//! timeout_seconds = 30
//!
//! [preview]
//! path = "md2wechat-preview.html"
//!
//! [output]
//! color = true
//! ```

use md2wechat_application::{DEFAULT_ENDPOINT, DEFAULT_TIMEOUT, ServiceParams};
use md2wechat_domain::Preferences;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Default preview file, relative to the working directory
pub const DEFAULT_PREVIEW_FILE: &str = "md2wechat-preview.html";

/// Configuration validation errors
#[derive(Debug, Error)]
pub enum ConfigValidationError {
    #[error("service.timeout_seconds cannot be 0")]
    InvalidTimeout,

    #[error("service.endpoint cannot be empty")]
    EmptyEndpoint,

    #[error("service.endpoint must start with http:// or https://: {0}")]
    InvalidEndpoint(String),
}

/// Raw service configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileServiceConfig {
    /// Conversion endpoint URL
    pub endpoint: String,
    /// Timeout in seconds for one conversion request
    pub timeout_seconds: u64,
}

impl Default for FileServiceConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT.as_secs(),
        }
    }
}

/// Raw preview configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilePreviewConfig {
    /// File the preview HTML is written to
    pub path: PathBuf,
}

impl Default for FilePreviewConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_PREVIEW_FILE),
        }
    }
}

/// Raw output configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    /// Enable colored terminal output
    pub color: bool,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self { color: true }
    }
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// User preferences (api key, theme, font size)
    pub preferences: Preferences,
    /// Conversion service settings
    pub service: FileServiceConfig,
    /// Preview file settings
    pub preview: FilePreviewConfig,
    /// Output settings
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.service.timeout_seconds == 0 {
            return Err(ConfigValidationError::InvalidTimeout);
        }

        let endpoint = self.service.endpoint.trim();
        if endpoint.is_empty() {
            return Err(ConfigValidationError::EmptyEndpoint);
        }
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(ConfigValidationError::InvalidEndpoint(endpoint.to_string()));
        }

        Ok(())
    }

    /// Service parameters for the conversion use case
    pub fn service_params(&self) -> ServiceParams {
        ServiceParams::default()
            .with_endpoint(self.service.endpoint.trim())
            .with_timeout_seconds(self.service.timeout_seconds)
    }
}
