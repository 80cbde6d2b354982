//! Opens URLs with the platform's default handler

use md2wechat_application::{LinkOpener, OpenError};
use std::process::{Command, Stdio};
use tracing::debug;

/// Launches `xdg-open`, `open` or `cmd /C start`
#[derive(Debug, Clone, Default)]
pub struct SystemLinkOpener;

impl SystemLinkOpener {
    pub fn new() -> Self {
        Self
    }

    fn command_for(url: &str) -> Option<Command> {
        if cfg!(target_os = "windows") {
            let mut cmd = Command::new("cmd");
            cmd.args(["/C", "start", "", url]);
            return Some(cmd);
        }

        let program = if cfg!(target_os = "macos") {
            "open"
        } else {
            "xdg-open"
        };
        if which::which(program).is_err() {
            return None;
        }
        let mut cmd = Command::new(program);
        cmd.arg(url);
        Some(cmd)
    }
}

impl LinkOpener for SystemLinkOpener {
    fn open(&self, url: &str) -> Result<(), OpenError> {
        let mut command = Self::command_for(url).ok_or(OpenError::Unavailable)?;
        debug!("Opening {} with {:?}", url, command.get_program());

        command
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map(|_| ())
            .map_err(|e| OpenError::Failed {
                url: url.to_string(),
                reason: e.to_string(),
            })
    }
}
