//! Configuration file loading for md2wechat
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `MD2WECHAT_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./md2wechat.toml` or `./.md2wechat.toml`
//! 4. Global config: `~/.config/md2wechat/config.toml`
//! 5. Default values

mod file_config;
mod loader;
mod preferences_store;

pub use file_config::{
    ConfigValidationError, DEFAULT_PREVIEW_FILE, FileConfig, FileOutputConfig, FilePreviewConfig,
    FileServiceConfig,
};
pub use loader::{ConfigLoader, ENV_PREFIX};
pub use preferences_store::TomlPreferencesStore;
