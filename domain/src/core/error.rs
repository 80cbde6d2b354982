//! Conversion error types

use thiserror::Error;

/// Classified failure of a single conversion attempt.
///
/// Every failure the workflow can produce is mapped to exactly one of these
/// kinds. Callers never see raw transport detail, only the kind and its
/// payload.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    #[error("API key is not configured")]
    MissingCredential,

    #[error("Document has no content")]
    EmptyInput,

    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP request failed with status {status}{}", .message.as_deref().map(|m| format!(": {m}")).unwrap_or_default())]
    Http { status: u16, message: Option<String> },

    #[error("Server returned an invalid response: {raw_fragment}")]
    InvalidResponse { raw_fragment: String },

    #[error("API error ({code}): {msg}")]
    Business { code: i64, msg: String },

    #[error("API reported success but returned no HTML")]
    MissingPayload,
}

impl ConversionError {
    /// Human-readable one-line notice for a user-initiated conversion
    pub fn user_message(&self) -> String {
        match self {
            ConversionError::MissingCredential => {
                "Please set an API key first (md2wechat config set api_key <KEY>)".to_string()
            }
            ConversionError::EmptyInput => "The current document has no content".to_string(),
            ConversionError::Network(_) => {
                "Conversion failed: network connection failed, please check your connection"
                    .to_string()
            }
            ConversionError::Http { status, message } => {
                let hint = match status {
                    401 => Some("API key is invalid or expired, please check your settings"),
                    403 => Some("access denied, please check the API key permissions"),
                    429 => Some("too many requests, please try again later"),
                    500 => Some("internal server error, please try again later"),
                    _ => None,
                };
                match (hint, message) {
                    (Some(hint), _) => format!("Conversion failed: {}", hint),
                    (None, Some(msg)) => {
                        format!("Conversion failed: HTTP {} ({})", status, msg)
                    }
                    (None, None) => format!("Conversion failed: HTTP {}", status),
                }
            }
            other => format!("Conversion failed: {}", other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_display_with_message() {
        let error = ConversionError::Http {
            status: 502,
            message: Some("bad gateway".to_string()),
        };
        assert_eq!(
            error.to_string(),
            "HTTP request failed with status 502: bad gateway"
        );
    }

    #[test]
    fn test_http_display_without_message() {
        let error = ConversionError::Http {
            status: 404,
            message: None,
        };
        assert_eq!(error.to_string(), "HTTP request failed with status 404");
    }

    #[test]
    fn test_user_message_status_hints() {
        let unauthorized = ConversionError::Http {
            status: 401,
            message: Some("invalid key".to_string()),
        };
        assert!(unauthorized.user_message().contains("invalid or expired"));

        let limited = ConversionError::Http {
            status: 429,
            message: None,
        };
        assert!(limited.user_message().contains("too many requests"));
    }

    #[test]
    fn test_user_message_business_error() {
        let error = ConversionError::Business {
            code: 5,
            msg: "bad theme".to_string(),
        };
        assert_eq!(
            error.user_message(),
            "Conversion failed: API error (5): bad theme"
        );
    }

    #[test]
    fn test_user_message_network() {
        let error = ConversionError::Network("connection refused".to_string());
        assert!(error.user_message().contains("network connection failed"));
    }
}
