//! reqwest-backed conversion transport

use async_trait::async_trait;
use md2wechat_application::{
    ConversionTransport, TransportError, TransportRequest, TransportResponse,
};
use reqwest::header::{CONTENT_TYPE, HeaderValue};
use std::time::Duration;
use tracing::debug;

/// User agent sent with every request
pub const USER_AGENT: &str = concat!("md2wechat/", env!("CARGO_PKG_VERSION"));

/// Header carrying the API key
pub const API_KEY_HEADER: &str = "X-API-Key";

/// HTTP transport for the conversion service
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Create a transport whose requests give up after `timeout`
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| TransportError::Other(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

fn map_send_error(error: reqwest::Error) -> TransportError {
    if error.is_timeout() {
        TransportError::Timeout
    } else if error.is_connect() {
        TransportError::ConnectionError(error.to_string())
    } else {
        TransportError::Other(error.to_string())
    }
}

#[async_trait]
impl ConversionTransport for ReqwestTransport {
    async fn post_json(
        &self,
        request: &TransportRequest,
    ) -> Result<TransportResponse, TransportError> {
        let api_key = HeaderValue::from_str(&request.api_key)
            .map_err(|e| TransportError::Other(format!("Invalid API key header: {}", e)))?;

        let response = self
            .client
            .post(&request.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .header(API_KEY_HEADER, api_key)
            .body(request.body.clone())
            .send()
            .await
            .map_err(map_send_error)?;

        let status = response.status();
        debug!(
            status = status.as_u16(),
            reason = status.canonical_reason().unwrap_or("Unknown"),
            content_type = response
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .unwrap_or(""),
            "HTTP response received"
        );

        // Read as text first so malformed bodies can still be reported
        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                TransportError::Timeout
            } else {
                TransportError::BodyError(e.to_string())
            }
        })?;

        Ok(TransportResponse::new(status.as_u16(), body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve one canned HTTP response and hand back the raw request text
    async fn one_shot_server(
        status_line: &'static str,
        body: &'static str,
    ) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut received = Vec::new();
            let mut buf = [0u8; 4096];
            // Read until the headers and the declared body have arrived
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                received.extend_from_slice(&buf[..n]);
                let text = String::from_utf8_lossy(&received);
                if let Some(header_end) = text.find("\r\n\r\n") {
                    let content_length = text[..header_end]
                        .lines()
                        .find_map(|line| {
                            let lower = line.to_ascii_lowercase();
                            lower
                                .strip_prefix("content-length:")
                                .map(|v| v.trim().parse::<usize>().unwrap_or(0))
                        })
                        .unwrap_or(0);
                    if received.len() >= header_end + 4 + content_length {
                        break;
                    }
                }
            }

            let response = format!(
                "{}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            String::from_utf8_lossy(&received).to_string()
        });

        (format!("http://{}/api/convert", addr), handle)
    }

    fn request(endpoint: String) -> TransportRequest {
        TransportRequest {
            endpoint,
            api_key: "wme_test".to_string(),
            body: r##"{"markdown":"# Hi","theme":"default","fontSize":"medium"}"##.to_string(),
        }
    }

    #[tokio::test]
    async fn test_posts_json_with_api_key() {
        let (endpoint, server) =
            one_shot_server("HTTP/1.1 200 OK", r#"{"code":0,"data":{"html":"<p>x</p>"}}"#).await;
        let transport = ReqwestTransport::new(Duration::from_secs(5)).unwrap();

        let response = transport.post_json(&request(endpoint)).await.unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(response.body, r#"{"code":0,"data":{"html":"<p>x</p>"}}"#);

        let raw = server.await.unwrap();
        let lower = raw.to_ascii_lowercase();
        assert!(raw.starts_with("POST /api/convert HTTP/1.1"));
        assert!(lower.contains("x-api-key: wme_test"));
        assert!(lower.contains("content-type: application/json"));
        assert!(raw.ends_with(r##"{"markdown":"# Hi","theme":"default","fontSize":"medium"}"##));
    }

    #[tokio::test]
    async fn test_error_status_is_not_a_transport_error() {
        let (endpoint, _server) =
            one_shot_server("HTTP/1.1 401 Unauthorized", r#"{"code":401,"msg":"bad key"}"#)
                .await;
        let transport = ReqwestTransport::new(Duration::from_secs(5)).unwrap();

        let response = transport.post_json(&request(endpoint)).await.unwrap();
        assert_eq!(response.status, 401);
        assert!(response.body.contains("bad key"));
    }

    #[tokio::test]
    async fn test_connection_refused() {
        // Bind then drop to get a port nobody listens on
        let addr = {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            listener.local_addr().unwrap()
        };
        let transport = ReqwestTransport::new(Duration::from_secs(5)).unwrap();

        let result = transport
            .post_json(&request(format!("http://{}/api/convert", addr)))
            .await;
        assert!(result.is_err());
    }
}
