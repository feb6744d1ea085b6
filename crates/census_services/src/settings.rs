//! Settings management
//!
//! Settings live in a JSON file next to the server. A missing file is
//! created with defaults on first load.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Census settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Log rebuild metrics after every count.
    pub debug: bool,
    /// Lines per page of `/ec list`.
    pub page_size: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug: false,
            page_size: 10,
        }
    }
}

impl Settings {
    /// Clamp values that would make listing impossible.
    fn sanitised(mut self) -> Self {
        self.page_size = self.page_size.max(1);
        self
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to access settings file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid settings in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Settings plus the file they were loaded from.
///
/// A detached store has no file; `reload` and `save` are no-ops.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: Option<PathBuf>,
    settings: Settings,
}

impl SettingsStore {
    /// Load `path`, writing the defaults there first if it does not exist.
    pub fn load_or_default(path: impl Into<PathBuf>) -> Result<Self, SettingsError> {
        let path = path.into();
        if !path.exists() {
            let store = Self {
                path: Some(path),
                settings: Settings::default(),
            };
            store.save()?;
            return Ok(store);
        }
        let settings = read_settings(&path)?;
        Ok(Self {
            path: Some(path),
            settings,
        })
    }

    /// In-memory settings with no backing file.
    pub fn detached(settings: Settings) -> Self {
        Self {
            path: None,
            settings: settings.sanitised(),
        }
    }

    pub fn get(&self) -> &Settings {
        &self.settings
    }

    pub fn get_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Re-read the backing file.
    pub fn reload(&mut self) -> Result<(), SettingsError> {
        if let Some(path) = &self.path {
            self.settings = read_settings(path)?;
            info!(path = %path.display(), settings = ?self.settings, "settings reloaded");
        }
        Ok(())
    }

    /// Write the current settings to the backing file.
    pub fn save(&self) -> Result<(), SettingsError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let json = serde_json::to_string_pretty(&self.settings).map_err(|source| SettingsError::Json {
            path: path.clone(),
            source,
        })?;
        fs::write(path, json).map_err(|source| SettingsError::Io {
            path: path.clone(),
            source,
        })?;
        info!(path = %path.display(), "settings saved");
        Ok(())
    }
}

fn read_settings(path: &Path) -> Result<Settings, SettingsError> {
    let text = fs::read_to_string(path).map_err(|source| SettingsError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let settings: Settings = serde_json::from_str(&text).map_err(|source| SettingsError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(settings.sanitised())
}
