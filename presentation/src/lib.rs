//! Presentation layer for md2wechat
//!
//! This crate contains CLI definitions, console output, progress spinners,
//! the preview presenter and the interactive preview REPL.

pub mod cli;
pub mod output;
pub mod preview;
pub mod progress;

// Re-export commonly used types
pub use cli::commands::{Cli, Command, ConfigAction};
pub use output::console::ConsoleFormatter;
pub use preview::{
    HtmlFilePreview, PUBLISHING_PLATFORM_URL, Presentation, PreviewPresenter, PreviewRepl,
    ReplCommand,
};
pub use progress::spinner::ConversionSpinner;
