//! CLI command definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for md2wechat
#[derive(Parser, Debug)]
#[command(name = "md2wechat")]
#[command(author, version, about = "Convert Markdown into WeChat-ready HTML")]
#[command(long_about = r#"
md2wechat sends Markdown to the md2wechat conversion service and returns
HTML styled for WeChat Official Account articles.

Configuration files are loaded from (later entries override earlier ones):
1. ~/.config/md2wechat/config.toml   Global config
2. ./md2wechat.toml or ./.md2wechat.toml   Project-level config
3. --config <path>     Explicit config file
4. MD2WECHAT_* environment variables (e.g. MD2WECHAT_PREFERENCES__API_KEY)

Example:
  md2wechat convert post.md --output post.html
  cat post.md | md2wechat convert - --copy
  md2wechat preview post.md
  md2wechat config set theme orange
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators and informational notices
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Convert a Markdown document once
    Convert {
        /// Markdown file to convert, or `-` for stdin
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Write the HTML to this file instead of the preview file
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,

        /// Print the HTML to stdout instead of writing a file
        #[arg(long)]
        stdout: bool,

        /// Copy the HTML to the clipboard
        #[arg(short, long)]
        copy: bool,
    },

    /// Start an interactive preview session for a document
    Preview {
        /// Markdown file to preview
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Inspect or change configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Open the WeChat Official Account platform in a browser
    Open,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show configuration sources and effective preferences
    Show,
    /// Persist a preference (api_key, theme, font_size)
    Set {
        key: String,
        value: String,
    },
}

impl Cli {
    /// Reads stdin when the input is `-`
    pub fn reads_stdin(input: &std::path::Path) -> bool {
        input.as_os_str() == "-"
    }
}
