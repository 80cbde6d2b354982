//! Service parameters: where and how long to talk to the conversion service.
//!
//! [`ServiceParams`] groups the static parameters of
//! [`ConvertDocumentUseCase`](crate::use_cases::convert_document::ConvertDocumentUseCase).
//! They come from the `[service]` config section, not from user preferences.

use std::time::Duration;

/// Endpoint of the hosted conversion service
pub const DEFAULT_ENDPOINT: &str = "https://www.md2wechat.cn/api/convert";

/// Default time to wait for the service before reporting a network error
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Conversion service parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceParams {
    /// URL the request body is POSTed to.
    pub endpoint: String,
    /// Upper bound for one request, including reading the body.
    pub timeout: Duration,
}

impl Default for ServiceParams {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ServiceParams {
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_timeout_seconds(self, seconds: u64) -> Self {
        self.with_timeout(Duration::from_secs(seconds))
    }
}
