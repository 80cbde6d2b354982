//! Preferences store port
//!
//! Persistence for [`Preferences`]. Loading merges persisted values over the
//! defaults; saving writes the whole record.

use md2wechat_domain::Preferences;
use thiserror::Error;

/// Errors from loading or saving preferences
#[derive(Error, Debug)]
pub enum PreferencesStoreError {
    #[error("Failed to read preferences: {0}")]
    Read(String),

    #[error("Failed to write preferences: {0}")]
    Write(String),
}

/// Persistent preferences storage
pub trait PreferencesStore: Send + Sync {
    fn load(&self) -> Result<Preferences, PreferencesStoreError>;

    fn save(&self, preferences: &Preferences) -> Result<(), PreferencesStoreError>;
}

/// In-memory store for tests and `--no-config` runs
#[derive(Debug, Default)]
pub struct InMemoryPreferencesStore {
    preferences: std::sync::Mutex<Preferences>,
}

impl InMemoryPreferencesStore {
    pub fn new(preferences: Preferences) -> Self {
        Self {
            preferences: std::sync::Mutex::new(preferences),
        }
    }
}

impl PreferencesStore for InMemoryPreferencesStore {
    fn load(&self) -> Result<Preferences, PreferencesStoreError> {
        self.preferences
            .lock()
            .map(|p| p.clone())
            .map_err(|e| PreferencesStoreError::Read(e.to_string()))
    }

    fn save(&self, preferences: &Preferences) -> Result<(), PreferencesStoreError> {
        let mut slot = self
            .preferences
            .lock()
            .map_err(|e| PreferencesStoreError::Write(e.to_string()))?;
        *slot = preferences.clone();
        Ok(())
    }
}
