//! CLI entrypoint for md2wechat
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use md2wechat_application::{
    ConvertDocumentUseCase, CopyContentUseCase, DocumentSource, InMemoryPreferencesStore,
    LinkOpener, NoticeLevel, PreferencesStore,
};
use md2wechat_domain::{ConversionError, PreferenceUpdate, Preferences};
use md2wechat_infrastructure::{
    ConfigLoader, FileConfig, FileDocument, ReqwestTransport, StdinDocument, SystemClipboard,
    SystemLinkOpener, TomlPreferencesStore,
};
use md2wechat_presentation::preview::text::html_to_text;
use md2wechat_presentation::{
    Cli, Command, ConfigAction, ConsoleFormatter, ConversionSpinner, HtmlFilePreview,
    PUBLISHING_PLATFORM_URL, PreviewPresenter, PreviewRepl,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    info!("Starting md2wechat");

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };
    config.validate().context("Invalid configuration")?;

    if !config.output.color {
        colored::control::set_override(false);
    }

    debug!(
        "Effective preferences: api_key={}, theme={}, font_size={}",
        config.preferences.masked_api_key(),
        config.preferences.theme,
        config.preferences.font_size
    );

    match cli.command {
        Command::Convert {
            ref input,
            ref output,
            stdout,
            copy,
        } => run_convert(&cli, &config, input, output.as_deref(), stdout, copy).await,
        Command::Preview { ref file } => run_preview(&cli, config, file).await,
        Command::Config { ref action } => run_config(&cli, &config, action),
        Command::Open => {
            SystemLinkOpener::new()
                .open(PUBLISHING_PLATFORM_URL)
                .with_context(|| format!("Please visit {} manually", PUBLISHING_PLATFORM_URL))?;
            if !cli.quiet {
                println!(
                    "{}",
                    ConsoleFormatter::notice(
                        NoticeLevel::Success,
                        &format!("Opened {}", PUBLISHING_PLATFORM_URL)
                    )
                );
            }
            Ok(())
        }
    }
}

fn build_workflow(config: &FileConfig) -> Result<ConvertDocumentUseCase> {
    let params = config.service_params();
    let transport = Arc::new(ReqwestTransport::new(params.timeout)?);
    Ok(ConvertDocumentUseCase::new(transport, params))
}

/// Store that preference updates are written to
fn preferences_store(cli: &Cli, config: &FileConfig) -> Arc<dyn PreferencesStore> {
    if cli.no_config {
        return Arc::new(InMemoryPreferencesStore::new(config.preferences.clone()));
    }
    match ConfigLoader::preferences_path(cli.config.as_ref()) {
        Some(path) => Arc::new(TomlPreferencesStore::new(path)),
        None => Arc::new(InMemoryPreferencesStore::new(config.preferences.clone())),
    }
}

/// Top-level error for a failed conversion, worded like the preview notices
fn conversion_failure(error: ConversionError) -> anyhow::Error {
    anyhow!(error.user_message())
}

async fn run_convert(
    cli: &Cli,
    config: &FileConfig,
    input: &Path,
    output: Option<&Path>,
    stdout: bool,
    copy: bool,
) -> Result<()> {
    let document: Box<dyn DocumentSource> = if Cli::reads_stdin(input) {
        Box::new(StdinDocument::new())
    } else {
        Box::new(FileDocument::new(input))
    };
    let text = document.read_text()?;

    let workflow = build_workflow(config)?;
    let result = {
        let _spinner = ConversionSpinner::start(
            format!("Converting {}...", document.name()),
            !cli.quiet && !stdout,
        );
        workflow.convert(&text, &config.preferences).await
    };

    let html = result.map_err(conversion_failure)?;

    if stdout {
        println!("{}", html);
    } else {
        let path = output.unwrap_or(config.preview.path.as_path());
        std::fs::write(path, html.as_str())
            .with_context(|| format!("Failed to write {}", path.display()))?;
        if !cli.quiet {
            eprintln!(
                "{}",
                ConsoleFormatter::notice(
                    NoticeLevel::Success,
                    &format!("Wrote {}", path.display())
                )
            );
        }
    }

    if copy {
        let copier = CopyContentUseCase::new(Arc::new(SystemClipboard::new()));
        let outcome = copier
            .execute(html.as_str(), &html_to_text(html.as_str()))
            .await?;
        eprintln!("{}", ConsoleFormatter::format_copy_outcome(&outcome));
    }

    Ok(())
}

async fn run_preview(cli: &Cli, config: FileConfig, file: &PathBuf) -> Result<()> {
    let document = Arc::new(FileDocument::new(file));
    // Fail fast on a missing document before starting the session
    document.read_text()?;

    let surface = Arc::new(HtmlFilePreview::open(&config.preview.path).with_quiet(cli.quiet));
    println!("Preview page: {}", surface.path().display());

    let presenter = PreviewPresenter::new(build_workflow(&config)?, surface);
    let copier = CopyContentUseCase::new(Arc::new(SystemClipboard::new()));
    let store = preferences_store(cli, &config);

    let mut repl = PreviewRepl::new(
        presenter,
        document,
        store,
        copier,
        Arc::new(SystemLinkOpener::new()),
        config.preferences,
    )
    .with_progress(!cli.quiet);

    repl.run().await?;
    Ok(())
}

fn run_config(cli: &Cli, config: &FileConfig, action: &ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => {
            if cli.no_config {
                println!("Configuration files disabled (--no-config)");
            } else {
                ConfigLoader::print_config_sources(cli.config.as_ref());
            }
            println!();
            print!("{}", ConsoleFormatter::format_preferences(&config.preferences));
            println!("Endpoint:   {}", config.service.endpoint);
            println!("Timeout:    {}s", config.service.timeout_seconds);
            println!("Preview:    {}", config.preview.path.display());
            Ok(())
        }
        ConfigAction::Set { key, value } => {
            let update = PreferenceUpdate::parse(key, value).map_err(|e| anyhow!(e))?;
            let store = preferences_store(cli, config);
            let mut preferences: Preferences = store.load()?;
            let changed = preferences.apply(update);
            let persisted =
                !cli.no_config && ConfigLoader::preferences_path(cli.config.as_ref()).is_some();
            if changed {
                store.save(&preferences)?;
            }
            if !cli.quiet {
                println!(
                    "{}",
                    ConsoleFormatter::format_preference_update(key, changed, persisted)
                );
            }
            Ok(())
        }
    }
}
