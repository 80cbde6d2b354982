//! Clipboard adapter backed by platform clipboard tools
//!
//! Each tier is a list of candidate commands that read the content from
//! stdin. The first candidate found on `PATH` that exits successfully wins.
//!
//! | Tier      | Candidates                                                |
//! |-----------|-----------------------------------------------------------|
//! | rich      | `wl-copy --type text/html`, `xclip -t text/html`          |
//! | selection | `wl-copy --primary`, `xclip -selection primary`           |
//! | text      | `wl-copy`, `xclip`, `xsel`, `pbcopy`, `clip`              |

use async_trait::async_trait;
use md2wechat_application::{ClipboardError, ClipboardPort};
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

/// A clipboard command that reads its content from stdin
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl ClipboardCommand {
    pub fn new(program: &str, args: &[&str]) -> Self {
        Self {
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }

    pub fn is_available(&self) -> bool {
        which::which(&self.program).is_ok()
    }

    async fn run(&self, input: &str) -> Result<(), String> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| format!("{}: {}", self.program, e))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(input.as_bytes())
                .await
                .map_err(|e| format!("{}: {}", self.program, e))?;
            // Dropping stdin closes the pipe so the tool sees EOF
        }

        let status = child
            .wait()
            .await
            .map_err(|e| format!("{}: {}", self.program, e))?;
        if status.success() {
            Ok(())
        } else {
            Err(format!("{} exited with {}", self.program, status))
        }
    }
}

/// System clipboard using external tools
#[derive(Debug, Clone)]
pub struct SystemClipboard {
    rich: Vec<ClipboardCommand>,
    selection: Vec<ClipboardCommand>,
    text: Vec<ClipboardCommand>,
}

impl SystemClipboard {
    /// Clipboard with the platform default candidates
    pub fn new() -> Self {
        Self {
            rich: vec![
                ClipboardCommand::new("wl-copy", &["--type", "text/html"]),
                ClipboardCommand::new("xclip", &["-selection", "clipboard", "-t", "text/html"]),
            ],
            selection: vec![
                ClipboardCommand::new("wl-copy", &["--primary", "--type", "text/html"]),
                ClipboardCommand::new("xclip", &["-selection", "primary", "-t", "text/html"]),
            ],
            text: vec![
                ClipboardCommand::new("wl-copy", &[]),
                ClipboardCommand::new("xclip", &["-selection", "clipboard"]),
                ClipboardCommand::new("xsel", &["--clipboard", "--input"]),
                ClipboardCommand::new("pbcopy", &[]),
                ClipboardCommand::new("clip", &[]),
            ],
        }
    }

    /// Clipboard with explicit candidates per tier
    pub fn with_tiers(
        rich: Vec<ClipboardCommand>,
        selection: Vec<ClipboardCommand>,
        text: Vec<ClipboardCommand>,
    ) -> Self {
        Self {
            rich,
            selection,
            text,
        }
    }

    async fn run_tier(
        tier: &str,
        candidates: &[ClipboardCommand],
        input: &str,
    ) -> Result<(), ClipboardError> {
        let mut last_error = None;
        for command in candidates.iter().filter(|c| c.is_available()) {
            match command.run(input).await {
                Ok(()) => {
                    debug!("Clipboard {} tier written with {}", tier, command.program);
                    return Ok(());
                }
                Err(e) => {
                    debug!("Clipboard {} tier candidate failed: {}", tier, e);
                    last_error = Some(e);
                }
            }
        }
        match last_error {
            Some(e) => Err(ClipboardError::WriteFailed(e)),
            None => Err(ClipboardError::Unavailable),
        }
    }
}

impl Default for SystemClipboard {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ClipboardPort for SystemClipboard {
    async fn write_rich(&self, html: &str, _plain_text: &str) -> Result<(), ClipboardError> {
        Self::run_tier("rich", &self.rich, html).await
    }

    async fn write_selection(&self, html: &str) -> Result<(), ClipboardError> {
        Self::run_tier("selection", &self.selection, html).await
    }

    async fn write_text(&self, plain_text: &str) -> Result<(), ClipboardError> {
        Self::run_tier("text", &self.text, plain_text).await
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn missing() -> ClipboardCommand {
        ClipboardCommand::new("md2wechat-no-such-clipboard-tool", &[])
    }

    #[tokio::test]
    async fn test_unavailable_when_no_candidate_on_path() {
        let clipboard = SystemClipboard::with_tiers(vec![missing()], vec![], vec![]);
        assert_eq!(
            clipboard.write_rich("<p>x</p>", "x").await,
            Err(ClipboardError::Unavailable)
        );
        assert_eq!(
            clipboard.write_selection("<p>x</p>").await,
            Err(ClipboardError::Unavailable)
        );
    }

    #[tokio::test]
    async fn test_first_working_candidate_wins() {
        let clipboard = SystemClipboard::with_tiers(
            vec![],
            vec![],
            vec![missing(), ClipboardCommand::new("cat", &[])],
        );
        assert_eq!(clipboard.write_text("hello").await, Ok(()));
    }

    #[tokio::test]
    async fn test_failing_candidate_reports_write_failure() {
        let clipboard =
            SystemClipboard::with_tiers(vec![ClipboardCommand::new("false", &[])], vec![], vec![]);
        assert!(matches!(
            clipboard.write_rich("<p>x</p>", "x").await,
            Err(ClipboardError::WriteFailed(_))
        ));
    }
}
