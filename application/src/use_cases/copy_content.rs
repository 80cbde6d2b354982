//! Copy Content use case
//!
//! Copies converted HTML to the clipboard, falling back through three tiers:
//! rich text, selection copy, plain text. When all three fail the user gets
//! manual-copy guidance instead of an error.

use crate::ports::clipboard::ClipboardPort;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Shown when no clipboard tier worked
pub const MANUAL_COPY_GUIDANCE: &str = "Copy failed, please copy manually:
  1. Open the preview file in a browser and select all of its content
  2. Press Ctrl+C (Windows/Linux) or Cmd+C (macOS)
  3. Paste into the WeChat Official Account editor with Ctrl+V / Cmd+V";

/// Errors that prevent a copy attempt
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CopyError {
    #[error("Nothing to copy, convert a document first")]
    NothingToCopy,
}

/// Which tier ended up on the clipboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyOutcome {
    RichText,
    Selection,
    PlainText,
    ManualGuidance(String),
}

impl CopyOutcome {
    /// Whether the formatted HTML reached the clipboard
    pub fn preserves_formatting(&self) -> bool {
        matches!(self, CopyOutcome::RichText | CopyOutcome::Selection)
    }
}

/// Use case for copying the preview to the clipboard
#[derive(Clone)]
pub struct CopyContentUseCase {
    clipboard: Arc<dyn ClipboardPort>,
}

impl CopyContentUseCase {
    pub fn new(clipboard: Arc<dyn ClipboardPort>) -> Self {
        Self { clipboard }
    }

    /// Copy `html`, with `plain_text` as the fallback representation
    pub async fn execute(&self, html: &str, plain_text: &str) -> Result<CopyOutcome, CopyError> {
        if html.trim().is_empty() {
            return Err(CopyError::NothingToCopy);
        }

        match self.clipboard.write_rich(html, plain_text).await {
            Ok(()) => {
                info!("Copied rich text ({} bytes)", html.len());
                return Ok(CopyOutcome::RichText);
            }
            Err(e) => debug!("Rich text copy failed: {}", e),
        }

        match self.clipboard.write_selection(html).await {
            Ok(()) => {
                info!("Copied via selection");
                return Ok(CopyOutcome::Selection);
            }
            Err(e) => debug!("Selection copy failed: {}", e),
        }

        match self.clipboard.write_text(plain_text).await {
            Ok(()) => {
                info!("Copied plain text ({} bytes)", plain_text.len());
                return Ok(CopyOutcome::PlainText);
            }
            Err(e) => debug!("Plain text copy failed: {}", e),
        }

        Ok(CopyOutcome::ManualGuidance(MANUAL_COPY_GUIDANCE.to_string()))
    }
}
