//! Domain layer for md2wechat
//!
//! This crate contains the conversion request/response model, user
//! preferences and preview state. It has no dependencies on infrastructure
//! or presentation concerns.
//!
//! # Core Concepts
//!
//! - **Conversion**: markdown text plus preferences is sent to the remote
//!   service, and the response is classified into HTML or a [`ConversionError`]
//! - **Preferences**: API key, theme and font size
//! - **Preview state**: the last successful HTML and the source text behind it

pub mod conversion;
pub mod core;
pub mod preferences;
pub mod preview;

// Re-export commonly used types
pub use conversion::{
    request::ConversionRequest,
    response::{ConversionResult, ConvertedHtml, classify_response},
};
pub use core::error::ConversionError;
pub use preferences::{
    font_size::FontSize,
    settings::{DEFAULT_THEME, PreferenceUpdate, Preferences},
};
pub use preview::state::PreviewState;
