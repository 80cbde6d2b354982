//! Application-level configuration.
//!
//! - [`ServiceParams`]: conversion endpoint and request timeout

pub mod service_params;

pub use service_params::{DEFAULT_ENDPOINT, DEFAULT_TIMEOUT, ServiceParams};
