//! Persisted settings from the last run.
//!
//! The CLI remembers the last-used paths, prefix and category so repeated
//! runs only need to pass what changed.

use std::cell::RefCell;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{DecalError, Result};

/// Default settings file name, relative to the working directory.
pub const SETTINGS_FILENAME: &str = "cs2decalbuilder_settings.json";

/// Last-used job parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub src: String,
    pub dest: String,
    pub tmpl: String,
    pub prefix: String,
    pub category: String,
}

/// Where settings are loaded from and saved to.
pub trait SettingsStore {
    fn load(&self) -> Result<Settings>;
    fn save(&self, settings: &Settings) -> Result<()>;
}

/// Settings stored as a flat JSON object on disk.
#[derive(Debug, Clone)]
pub struct JsonSettingsFile {
    path: PathBuf,
}

impl JsonSettingsFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for JsonSettingsFile {
    fn default() -> Self {
        Self::new(SETTINGS_FILENAME)
    }
}

impl SettingsStore for JsonSettingsFile {
    /// A missing file loads as empty settings.
    fn load(&self) -> Result<Settings> {
        if !self.path.exists() {
            return Ok(Settings::default());
        }

        let content = std::fs::read_to_string(&self.path).map_err(|e| DecalError::Settings {
            path: self.path.clone(),
            message: format!("Failed to read settings: {}", e),
        })?;

        serde_json::from_str(&content).map_err(|e| DecalError::Settings {
            path: self.path.clone(),
            message: format!("Invalid settings: {}", e),
        })
    }

    fn save(&self, settings: &Settings) -> Result<()> {
        let content = serde_json::to_string(settings).map_err(|e| DecalError::Settings {
            path: self.path.clone(),
            message: e.to_string(),
        })?;

        std::fs::write(&self.path, content).map_err(|e| DecalError::Settings {
            path: self.path.clone(),
            message: format!("Failed to write settings: {}", e),
        })
    }
}

/// In-memory store, for embedding and tests.
#[derive(Debug, Default)]
pub struct MemorySettings {
    settings: RefCell<Settings>,
}

impl MemorySettings {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings: RefCell::new(settings),
        }
    }
}

impl SettingsStore for MemorySettings {
    fn load(&self) -> Result<Settings> {
        Ok(self.settings.borrow().clone())
    }

    fn save(&self, settings: &Settings) -> Result<()> {
        *self.settings.borrow_mut() = settings.clone();
        Ok(())
    }
}
