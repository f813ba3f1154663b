//! Plugin settings: auto-generation toggle and image API credentials.
//!
//! Settings are loaded through a [`SettingsProvider`] on every invocation so
//! admin edits take effect without a restart, and are never read from global
//! state inside the workflow itself.

use crate::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_API_URL: &str = "http://localhost:8000/v1/images/generations";
pub const DEFAULT_API_KEY: &str = "change-me";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    pub auto_generate: bool,
    pub api_key: String,
    pub api_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            auto_generate: false,
            api_key: DEFAULT_API_KEY.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
        }
    }
}

pub trait SettingsProvider: Send + Sync {
    fn load(&self) -> Result<Settings>;
}

/// JSON-file-backed settings store. A missing file yields the defaults, so
/// first run behaves like a fresh activation.
pub struct FileSettingsStore {
    path: PathBuf,
}

impl FileSettingsStore {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    /// Persist settings, creating parent directories as needed. This is the
    /// admin settings form's save path.
    pub fn save(&self, settings: &Settings) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(settings)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

impl SettingsProvider for FileSettingsStore {
    fn load(&self) -> Result<Settings> {
        if !self.path.exists() {
            return Ok(Settings::default());
        }
        let json = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&json)?)
    }
}

/// Fixed settings for tests and harnesses.
pub struct StaticSettings(pub Settings);

impl SettingsProvider for StaticSettings {
    fn load(&self) -> Result<Settings> {
        Ok(self.0.clone())
    }
}
