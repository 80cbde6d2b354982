//! Preview pane
//!
//! [`PreviewPresenter`] keeps the displayed HTML consistent with the
//! preferences; [`HtmlFilePreview`] is the file-backed surface it renders to.

mod presenter;
mod repl;
mod surface;
pub mod text;

pub use presenter::{Presentation, PreviewPresenter};
pub use repl::{PUBLISHING_PLATFORM_URL, PreviewRepl, ReplCommand};
pub use surface::HtmlFilePreview;
