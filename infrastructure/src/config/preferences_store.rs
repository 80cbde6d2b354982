//! TOML-backed preferences store
//!
//! Reads and writes the `[preferences]` table of a config file. Other tables
//! in the same file are preserved on save.

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Format, Serialized, Toml},
};
use md2wechat_application::{PreferencesStore, PreferencesStoreError};
use md2wechat_domain::Preferences;
use std::path::{Path, PathBuf};
use tracing::debug;

const PREFERENCES_TABLE: &str = "preferences";

/// Preferences persisted in a TOML config file
#[derive(Debug, Clone)]
pub struct TomlPreferencesStore {
    path: PathBuf,
}

impl TomlPreferencesStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_table(&self) -> Result<toml::Table, PreferencesStoreError> {
        if !self.path.exists() {
            return Ok(toml::Table::new());
        }
        let content = std::fs::read_to_string(&self.path)
            .map_err(|e| PreferencesStoreError::Read(format!("{}: {}", self.path.display(), e)))?;
        content
            .parse::<toml::Table>()
            .map_err(|e| PreferencesStoreError::Read(format!("{}: {}", self.path.display(), e)))
    }
}

impl PreferencesStore for TomlPreferencesStore {
    fn load(&self) -> Result<Preferences, PreferencesStoreError> {
        Figment::new()
            .merge(Serialized::defaults(FileConfig::default()))
            .merge(Toml::file(&self.path))
            .extract_inner(PREFERENCES_TABLE)
            .map_err(|e| PreferencesStoreError::Read(e.to_string()))
    }

    fn save(&self, preferences: &Preferences) -> Result<(), PreferencesStoreError> {
        let mut table = self.read_table()?;
        let value = toml::Value::try_from(preferences)
            .map_err(|e| PreferencesStoreError::Write(e.to_string()))?;
        table.insert(PREFERENCES_TABLE.to_string(), value);

        let content = toml::to_string_pretty(&table)
            .map_err(|e| PreferencesStoreError::Write(e.to_string()))?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| {
                PreferencesStoreError::Write(format!("{}: {}", parent.display(), e))
            })?;
        }
        std::fs::write(&self.path, content)
            .map_err(|e| PreferencesStoreError::Write(format!("{}: {}", self.path.display(), e)))?;

        debug!("Saved preferences to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use md2wechat_domain::{FontSize, PreferenceUpdate};

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = TomlPreferencesStore::new(dir.path().join("config.toml"));
        assert_eq!(store.load().unwrap(), Preferences::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = TomlPreferencesStore::new(dir.path().join("nested").join("config.toml"));

        let mut prefs = Preferences::default();
        prefs.apply(PreferenceUpdate::ApiKey("wme_abc".to_string()));
        prefs.apply(PreferenceUpdate::FontSize(FontSize::Small));
        store.save(&prefs).unwrap();

        assert_eq!(store.load().unwrap(), prefs);
    }

    #[test]
    fn test_save_preserves_other_sections() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[service]\ntimeout_seconds = 12\n").unwrap();

        let store = TomlPreferencesStore::new(&path);
        store.save(&Preferences::default()).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("timeout_seconds = 12"));
        assert!(content.contains("[preferences]"));
    }

    #[test]
    fn test_load_merges_partial_preferences() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[preferences]\ntheme = \"orange\"\n").unwrap();

        let prefs = TomlPreferencesStore::new(&path).load().unwrap();
        assert_eq!(prefs.theme, "orange");
        assert_eq!(prefs.font_size, FontSize::Medium);
    }
}
