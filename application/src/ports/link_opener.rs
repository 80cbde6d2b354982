//! Link opener port

use thiserror::Error;

#[derive(Error, Debug)]
pub enum OpenError {
    #[error("No opener available on this platform")]
    Unavailable,

    #[error("Failed to open {url}: {reason}")]
    Failed { url: String, reason: String },
}

/// Opens a URL in the user's browser
pub trait LinkOpener: Send + Sync {
    fn open(&self, url: &str) -> Result<(), OpenError>;
}
