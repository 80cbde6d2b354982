//! Conversion request and response
//!
//! - [`request::ConversionRequest`]: validated outbound request / wire body
//! - [`response::classify_response`]: maps status + body to a [`response::ConversionResult`]

pub mod request;
pub mod response;
