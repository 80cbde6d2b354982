//! Preview surface port
//!
//! The display sink the preview presenter renders into. The presenter treats
//! it as opaque; implementations decide what "rendering" means (a file, a
//! terminal, a webview).
//!
//! Methods are synchronous and non-fallible. A surface that cannot render
//! logs the problem itself.

/// Severity of a user-facing notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

/// Display surface for converted HTML
pub trait PreviewSurface: Send + Sync {
    /// Replace the displayed content with `html`
    fn render_html(&self, html: &str);

    /// Scroll the displayed content back to the top
    fn reset_scroll(&self);

    /// Show a one-line notice to the user
    fn notify(&self, level: NoticeLevel, message: &str);

    /// Plain text the user would see for `html`, used as a clipboard fallback
    fn text_content(&self, html: &str) -> String;
}
