//! HTML file preview surface
//!
//! Renders converted HTML into a standalone page on disk that can be kept
//! open in a browser, and prints notices to the terminal.

use super::text::html_to_text;
use crate::output::console::ConsoleFormatter;
use md2wechat_application::{NoticeLevel, PreviewSurface};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

/// Placeholder shown before the first successful conversion
const PLACEHOLDER: &str = r#"<div class="md2wechat-placeholder">
  <h3>WeChat article preview</h3>
  <p>Convert a markdown document to see the styled result here.</p>
  <ol>
    <li>Run <code>md2wechat preview &lt;FILE&gt;</code></li>
    <li>Adjust the theme with <code>:theme</code> or <code>:font</code></li>
    <li>Copy the result with <code>:copy</code> and paste it into the editor</li>
  </ol>
</div>"#;

const SCROLL_TO_TOP: &str = "<script>window.scrollTo(0, 0);</script>";

/// Preview surface writing a standalone HTML page
pub struct HtmlFilePreview {
    path: PathBuf,
    /// Content currently on the page
    content: Mutex<String>,
    quiet: bool,
}

impl HtmlFilePreview {
    /// Create the surface and write the placeholder page
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let surface = Self {
            path: path.into(),
            content: Mutex::new(PLACEHOLDER.to_string()),
            quiet: false,
        };
        surface.write_page(PLACEHOLDER, false);
        surface
    }

    /// Suppress info and success notices (errors are always shown)
    pub fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Build the full page around `content`
    pub fn page(content: &str, scroll_to_top: bool) -> String {
        format!(
            "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>md2wechat preview</title>\n</head>\n<body>\n<a id=\"top\"></a>\n<div class=\"md2wechat-content-area\">\n{}\n</div>\n{}</body>\n</html>\n",
            content,
            if scroll_to_top { SCROLL_TO_TOP } else { "" }
        )
    }

    fn write_page(&self, content: &str, scroll_to_top: bool) {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!("Could not create preview directory {}: {}", parent.display(), e);
            return;
        }
        if let Err(e) = std::fs::write(&self.path, Self::page(content, scroll_to_top)) {
            warn!("Could not write preview file {}: {}", self.path.display(), e);
        }
    }
}

impl PreviewSurface for HtmlFilePreview {
    fn render_html(&self, html: &str) {
        let mut content = self
            .content
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        *content = html.to_string();
        self.write_page(html, false);
    }

    fn reset_scroll(&self) {
        let content = self
            .content
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        self.write_page(&content, true);
    }

    fn notify(&self, level: NoticeLevel, message: &str) {
        if self.quiet && level != NoticeLevel::Error {
            return;
        }
        eprintln!("{}", ConsoleFormatter::notice(level, message));
    }

    fn text_content(&self, html: &str) -> String {
        html_to_text(html)
    }
}
