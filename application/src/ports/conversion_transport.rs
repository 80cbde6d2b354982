//! Conversion transport port
//!
//! Defines the single HTTP primitive the conversion workflow needs. Adapters
//! live in the infrastructure layer (reqwest) and in tests (in-memory).

use async_trait::async_trait;
use thiserror::Error;

/// Errors where no HTTP response was received
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Timeout")]
    Timeout,

    #[error("Failed to read response body: {0}")]
    BodyError(String),

    #[error("Other error: {0}")]
    Other(String),
}

/// An outbound JSON POST
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportRequest {
    pub endpoint: String,
    /// Sent as the `X-API-Key` header
    pub api_key: String,
    /// Serialized JSON body
    pub body: String,
}

/// A received HTTP response with its full body read as text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// HTTP client for the conversion service
#[async_trait]
pub trait ConversionTransport: Send + Sync {
    /// POST `request.body` with `Content-Type: application/json` and `X-API-Key`.
    ///
    /// Any HTTP status is a successful return; only transport failures are errors.
    async fn post_json(
        &self,
        request: &TransportRequest,
    ) -> Result<TransportResponse, TransportError>;
}
