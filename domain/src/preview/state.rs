//! Preview state entity

use crate::conversion::response::ConvertedHtml;

/// What a preview pane currently shows and which text produced it
///
/// Empty at creation. Populated on every successful conversion and never
/// cleared by a failure.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreviewState {
    last_source_text: Option<String>,
    last_html: Option<ConvertedHtml>,
}

impl PreviewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a successful conversion
    pub fn record(&mut self, source_text: impl Into<String>, html: ConvertedHtml) {
        self.last_source_text = Some(source_text.into());
        self.last_html = Some(html);
    }

    /// Replace only the HTML, keeping the source text
    pub fn replace_html(&mut self, html: ConvertedHtml) {
        self.last_html = Some(html);
    }

    pub fn last_source_text(&self) -> Option<&str> {
        self.last_source_text.as_deref()
    }

    pub fn last_html(&self) -> Option<&ConvertedHtml> {
        self.last_html.as_ref()
    }

    pub fn is_populated(&self) -> bool {
        self.last_html.is_some()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
