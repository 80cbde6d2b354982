//! Core domain concepts shared across all subdomains.
//!
//! - [`error::ConversionError`]: classified conversion failures

pub mod error;
