//! Spinner shown while a user-initiated conversion is in flight

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Spinner on stderr that clears itself when dropped
pub struct ConversionSpinner {
    bar: Option<ProgressBar>,
}

impl ConversionSpinner {
    /// Start a spinner, or a no-op one when `enabled` is false
    pub fn start(message: impl Into<String>, enabled: bool) -> Self {
        if !enabled {
            return Self { bar: None };
        }

        let bar = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            bar.set_style(style);
        }
        bar.set_message(message.into());
        bar.enable_steady_tick(Duration::from_millis(100));
        Self { bar: Some(bar) }
    }
}

impl Drop for ConversionSpinner {
    fn drop(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }
}
