//! Clipboard adapters

mod system;

pub use system::{ClipboardCommand, SystemClipboard};
