//! Document source port
//!
//! Supplies the full text of the document to convert. The workflow never
//! edits this text.

use thiserror::Error;

/// Errors from reading the document
#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("Document not found: {0}")]
    NotFound(String),

    #[error("Failed to read document: {0}")]
    Io(String),
}

pub trait DocumentSource: Send + Sync {
    /// Human-readable name of the document (path, `<stdin>`)
    fn name(&self) -> String;

    fn read_text(&self) -> Result<String, DocumentError>;
}
