//! Clipboard port
//!
//! Three write primitives, tried in order by
//! [`CopyContentUseCase`](crate::use_cases::copy_content::CopyContentUseCase).

use async_trait::async_trait;
use thiserror::Error;

/// Errors from a single clipboard tier
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClipboardError {
    #[error("No clipboard tool available for this tier")]
    Unavailable,

    #[error("Clipboard write failed: {0}")]
    WriteFailed(String),
}

/// System clipboard access
#[async_trait]
pub trait ClipboardPort: Send + Sync {
    /// Write HTML with a plain-text alternative as one clipboard item
    async fn write_rich(&self, html: &str, plain_text: &str) -> Result<(), ClipboardError>;

    /// Copy through the selection mechanism
    async fn write_selection(&self, html: &str) -> Result<(), ClipboardError>;

    /// Write plain text only
    async fn write_text(&self, plain_text: &str) -> Result<(), ClipboardError>;
}
