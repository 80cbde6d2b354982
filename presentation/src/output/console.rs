//! Console output formatting

use colored::Colorize;
use md2wechat_application::{CopyOutcome, NoticeLevel};
use md2wechat_domain::Preferences;

/// Formats notices and settings for terminal display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// One-line notice with a status marker
    pub fn notice(level: NoticeLevel, message: &str) -> String {
        match level {
            NoticeLevel::Info => format!("{} {}", "->".cyan(), message),
            NoticeLevel::Success => format!("{} {}", "v".green(), message),
            NoticeLevel::Error => format!("{} {}", "x".red(), message.red()),
        }
    }

    /// Current preferences, API key masked
    pub fn format_preferences(preferences: &Preferences) -> String {
        let mut output = String::new();
        output.push_str(&format!("{}\n", "Preferences".cyan().bold()));
        output.push_str(&format!(
            "  {:<10} {}\n",
            "api_key",
            preferences.masked_api_key()
        ));
        output.push_str(&format!("  {:<10} {}\n", "theme", preferences.theme));
        output.push_str(&format!("  {:<10} {}\n", "font_size", preferences.font_size));
        output
    }

    /// Result of a copy attempt
    pub fn format_copy_outcome(outcome: &CopyOutcome) -> String {
        match outcome {
            CopyOutcome::RichText => {
                Self::notice(NoticeLevel::Success, "Copied with formatting")
            }
            CopyOutcome::Selection => Self::notice(
                NoticeLevel::Success,
                "Copied with formatting (primary selection)",
            ),
            CopyOutcome::PlainText => Self::notice(
                NoticeLevel::Info,
                "Copied as plain text, formatting was not preserved",
            ),
            CopyOutcome::ManualGuidance(guidance) => Self::notice(NoticeLevel::Error, guidance),
        }
    }

    /// Result of `config set`
    pub fn format_preference_update(key: &str, changed: bool, persisted: bool) -> String {
        match (changed, persisted) {
            (false, _) => Self::notice(NoticeLevel::Info, &format!("{} unchanged", key)),
            (true, true) => Self::notice(NoticeLevel::Success, &format!("Saved {}", key)),
            (true, false) => Self::notice(
                NoticeLevel::Info,
                &format!("{} not persisted (--no-config)", key),
            ),
        }
    }
}
