//! REPL (Read-Eval-Print Loop) for interactive preview sessions
//!
//! Converts a document once on start, then lets the user tweak preferences,
//! re-read the document, copy the result and open the publishing platform.

use super::presenter::{Presentation, PreviewPresenter};
use crate::output::console::ConsoleFormatter;
use crate::progress::spinner::ConversionSpinner;
use md2wechat_application::{
    CopyContentUseCase, DocumentSource, LinkOpener, NoticeLevel, PreferencesStore,
    PreferencesStoreError,
};
use md2wechat_domain::{PreferenceUpdate, Preferences};
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use std::sync::Arc;
use tracing::warn;

/// Editor of the publishing platform
pub const PUBLISHING_PLATFORM_URL: &str = "https://mp.weixin.qq.com";

/// A parsed REPL command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    /// Re-read the document and convert it again
    Reload,
    /// Change one preference and refresh the preview
    Set(PreferenceUpdate),
    Copy,
    OpenPlatform,
    ShowPreferences,
    Help,
    Quit,
}

impl ReplCommand {
    /// Parse a `:command [args]` line
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        let (name, rest) = match line.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (line, ""),
        };

        let require_arg = |what: &str| {
            if rest.is_empty() {
                Err(format!("{} requires an argument", what))
            } else {
                Ok(rest)
            }
        };

        match name {
            ":reload" | ":r" => Ok(ReplCommand::Reload),
            ":theme" => Ok(ReplCommand::Set(PreferenceUpdate::Theme(
                require_arg(":theme")?.to_string(),
            ))),
            ":font" => require_arg(":font")?
                .parse()
                .map(|size| ReplCommand::Set(PreferenceUpdate::FontSize(size))),
            ":key" => Ok(ReplCommand::Set(PreferenceUpdate::ApiKey(
                require_arg(":key")?.to_string(),
            ))),
            ":set" => {
                let (key, value) = require_arg(":set")?
                    .split_once(char::is_whitespace)
                    .ok_or_else(|| ":set requires a key and a value".to_string())?;
                PreferenceUpdate::parse(key, value.trim()).map(ReplCommand::Set)
            }
            ":copy" | ":c" => Ok(ReplCommand::Copy),
            ":open" | ":o" => Ok(ReplCommand::OpenPlatform),
            ":show" | ":prefs" => Ok(ReplCommand::ShowPreferences),
            ":help" | ":h" | ":?" => Ok(ReplCommand::Help),
            ":quit" | ":exit" | ":q" => Ok(ReplCommand::Quit),
            other => Err(format!("Unknown command: {}", other)),
        }
    }

    /// Whether the command line may be written to the history file
    ///
    /// API keys never are.
    pub fn is_recordable(&self) -> bool {
        !matches!(self, ReplCommand::Set(PreferenceUpdate::ApiKey(_)))
    }
}

/// Interactive preview session
pub struct PreviewRepl {
    presenter: PreviewPresenter,
    document: Arc<dyn DocumentSource>,
    store: Arc<dyn PreferencesStore>,
    copier: CopyContentUseCase,
    opener: Arc<dyn LinkOpener>,
    preferences: Preferences,
    show_progress: bool,
}

impl PreviewRepl {
    pub fn new(
        presenter: PreviewPresenter,
        document: Arc<dyn DocumentSource>,
        store: Arc<dyn PreferencesStore>,
        copier: CopyContentUseCase,
        opener: Arc<dyn LinkOpener>,
        preferences: Preferences,
    ) -> Self {
        Self {
            presenter,
            document,
            store,
            copier,
            opener,
            preferences,
            show_progress: true,
        }
    }

    /// Set whether to show a spinner during conversions
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    pub fn presenter(&self) -> &PreviewPresenter {
        &self.presenter
    }

    /// Run the interactive REPL
    pub async fn run(&mut self) -> RlResult<()> {
        let mut rl = DefaultEditor::new()?;

        let history_path = dirs::data_dir().map(|p| p.join("md2wechat").join("history.txt"));
        if let Some(ref path) = history_path {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        self.print_welcome();
        self.convert_document().await;

        loop {
            match rl.readline("md2wechat> ") {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    match ReplCommand::parse(line) {
                        Ok(command) => {
                            if command.is_recordable() {
                                let _ = rl.add_history_entry(line);
                            }
                            if self.handle(command).await {
                                break;
                            }
                        }
                        Err(e) => {
                            println!("{}", e);
                            println!("Type :help for available commands");
                        }
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Bye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }

        if let Some(ref path) = history_path {
            let _ = rl.save_history(path);
        }

        Ok(())
    }

    /// Execute one command. Returns true if the session should end.
    pub async fn handle(&mut self, command: ReplCommand) -> bool {
        match command {
            ReplCommand::Reload => {
                self.convert_document().await;
            }
            ReplCommand::Set(update) => self.update_preference(update).await,
            ReplCommand::Copy => match self.presenter.copy_displayed(&self.copier).await {
                Ok(outcome) => println!("{}", ConsoleFormatter::format_copy_outcome(&outcome)),
                Err(e) => eprintln!(
                    "{}",
                    ConsoleFormatter::notice(NoticeLevel::Error, &e.to_string())
                ),
            },
            ReplCommand::OpenPlatform => self.open_platform(),
            ReplCommand::ShowPreferences => {
                print!("{}", ConsoleFormatter::format_preferences(&self.preferences));
            }
            ReplCommand::Help => Self::print_help(),
            ReplCommand::Quit => {
                println!("Bye!");
                return true;
            }
        }
        false
    }

    /// Read the document and run a user-initiated conversion
    async fn convert_document(&self) -> Presentation {
        let text = match self.document.read_text() {
            Ok(text) => text,
            Err(e) => {
                eprintln!("{}", ConsoleFormatter::notice(NoticeLevel::Error, &e.to_string()));
                return Presentation::Skipped;
            }
        };

        let _spinner = ConversionSpinner::start(
            format!("Converting {}...", self.document.name()),
            self.show_progress,
        );
        self.presenter.convert_and_show(&text, &self.preferences).await
    }

    async fn update_preference(&mut self, update: PreferenceUpdate) {
        if !self.preferences.apply(update.clone()) {
            println!("{}", ConsoleFormatter::notice(NoticeLevel::Info, "Unchanged"));
            return;
        }

        if let Err(e) = self.persist(update) {
            warn!("Could not persist preferences: {}", e);
            eprintln!(
                "{}",
                ConsoleFormatter::notice(
                    NoticeLevel::Error,
                    &format!("Preferences updated for this session only: {}", e)
                )
            );
        }

        let refresh = self.presenter.on_preference_changed(&self.preferences).await;
        if refresh == Presentation::Displayed {
            println!("{}", ConsoleFormatter::notice(NoticeLevel::Info, "Preview refreshed"));
        }
    }

    /// Write only the changed field to the store
    ///
    /// Session preferences include project and environment values, which
    /// stay out of the store.
    fn persist(&self, update: PreferenceUpdate) -> Result<(), PreferencesStoreError> {
        let mut stored = self.store.load()?;
        if stored.apply(update) {
            self.store.save(&stored)?;
        }
        Ok(())
    }

    fn open_platform(&self) {
        match self.opener.open(PUBLISHING_PLATFORM_URL) {
            Ok(()) => println!(
                "{}",
                ConsoleFormatter::notice(
                    NoticeLevel::Success,
                    &format!("Opened {}", PUBLISHING_PLATFORM_URL)
                )
            ),
            Err(e) => eprintln!(
                "{}",
                ConsoleFormatter::notice(
                    NoticeLevel::Error,
                    &format!("{}, please visit {} manually", e, PUBLISHING_PLATFORM_URL)
                )
            ),
        }
    }

    fn print_welcome(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│          md2wechat - Preview Mode           │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        println!("Document: {}", self.document.name());
        println!();
        Self::print_help();
    }

    fn print_help() {
        println!("Commands:");
        println!("  :reload, :r           - Re-read the document and convert it");
        println!("  :theme <name>         - Change the theme");
        println!("  :font <small|medium|large> - Change the font size");
        println!("  :key <api-key>        - Set the API key");
        println!("  :set <key> <value>    - Change any preference");
        println!("  :copy, :c             - Copy the preview to the clipboard");
        println!("  :open, :o             - Open the WeChat Official Account platform");
        println!("  :show                 - Show current preferences");
        println!("  :help, :h, :?         - Show this help");
        println!("  :quit, :exit, :q      - Exit");
        println!();
    }
}
