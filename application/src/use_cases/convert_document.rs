//! Convert Document use case
//!
//! The stateless conversion workflow: validate, build the request, dispatch
//! it once, and classify whatever comes back. It never touches display state.

use crate::config::ServiceParams;
use crate::ports::conversion_transport::{ConversionTransport, TransportRequest};
use md2wechat_domain::{
    ConversionError, ConversionRequest, ConversionResult, Preferences, classify_response,
};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Use case for converting one document
///
/// A single attempt per call. Retrying is the caller's decision.
#[derive(Clone)]
pub struct ConvertDocumentUseCase {
    transport: Arc<dyn ConversionTransport>,
    params: ServiceParams,
}

impl ConvertDocumentUseCase {
    pub fn new(transport: Arc<dyn ConversionTransport>, params: ServiceParams) -> Self {
        Self { transport, params }
    }

    /// Convert `source_text` with the given preferences
    pub async fn convert(&self, source_text: &str, preferences: &Preferences) -> ConversionResult {
        self.convert_cancellable(source_text, preferences, &CancellationToken::new())
            .await
    }

    /// Convert, giving up early if `cancel` fires
    ///
    /// A cancelled or timed-out request is reported as [`ConversionError::Network`].
    pub async fn convert_cancellable(
        &self,
        source_text: &str,
        preferences: &Preferences,
        cancel: &CancellationToken,
    ) -> ConversionResult {
        if !preferences.has_api_key() {
            return Err(ConversionError::MissingCredential);
        }
        let request = ConversionRequest::new(source_text, preferences)?;

        debug!(
            endpoint = %self.params.endpoint,
            api_key = preferences.masked_api_key(),
            theme = request.theme(),
            font_size = %request.font_size(),
            markdown_length = source_text.len(),
            "Sending conversion request"
        );

        let transport_request = TransportRequest {
            endpoint: self.params.endpoint.clone(),
            api_key: preferences.api_key.trim().to_string(),
            body: request.to_body(),
        };

        let outcome = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!("Conversion request cancelled");
                return Err(ConversionError::Network("request cancelled".to_string()));
            }
            outcome = tokio::time::timeout(
                self.params.timeout,
                self.transport.post_json(&transport_request),
            ) => outcome,
        };

        let response = match outcome {
            Err(_) => {
                warn!(
                    "Conversion request timed out after {}s",
                    self.params.timeout.as_secs()
                );
                return Err(ConversionError::Network(format!(
                    "no response within {}s",
                    self.params.timeout.as_secs()
                )));
            }
            Ok(Err(e)) => {
                warn!("Conversion transport failed: {}", e);
                return Err(ConversionError::Network(e.to_string()));
            }
            Ok(Ok(response)) => response,
        };

        debug!(
            status = response.status,
            body_length = response.body.len(),
            "Received conversion response"
        );

        let result = classify_response(response.status, &response.body);
        match &result {
            Ok(html) => info!("Conversion succeeded, HTML length: {}", html.as_str().len()),
            Err(e) => warn!("Conversion failed: {}", e),
        }
        result
    }
}
