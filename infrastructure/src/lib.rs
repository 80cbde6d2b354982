//! Infrastructure layer for md2wechat
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod clipboard;
pub mod config;
pub mod document;
pub mod http;
pub mod opener;

// Re-export commonly used types
pub use clipboard::{ClipboardCommand, SystemClipboard};
pub use config::{
    ConfigLoader, ConfigValidationError, DEFAULT_PREVIEW_FILE, FileConfig, FileOutputConfig,
    FilePreviewConfig, FileServiceConfig, TomlPreferencesStore,
};
pub use document::{FileDocument, StdinDocument};
pub use http::ReqwestTransport;
pub use opener::SystemLinkOpener;
