//! Application layer for md2wechat
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{DEFAULT_ENDPOINT, DEFAULT_TIMEOUT, ServiceParams};
pub use ports::{
    clipboard::{ClipboardError, ClipboardPort},
    conversion_transport::{
        ConversionTransport, TransportError, TransportRequest, TransportResponse,
    },
    document_source::{DocumentError, DocumentSource},
    link_opener::{LinkOpener, OpenError},
    preferences_store::{InMemoryPreferencesStore, PreferencesStore, PreferencesStoreError},
    preview_surface::{NoticeLevel, PreviewSurface},
};
pub use use_cases::convert_document::ConvertDocumentUseCase;
pub use use_cases::copy_content::{
    CopyContentUseCase, CopyError, CopyOutcome, MANUAL_COPY_GUIDANCE,
};
