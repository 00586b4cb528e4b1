//! User settings.
//!
//! Settings hold the configuration a session starts from and how the
//! clipboard behaves. They live in a TOML file under the platform config
//! directory:
//!
//! - **Linux**: `~/.config/bytegen/settings.toml`
//! - **macOS**: `~/Library/Application Support/dev.bytegen.bytegen/settings.toml`
//! - **Windows**: `C:\Users\<User>\AppData\Roaming\bytegen\bytegen\config\settings.toml`
//!
//! Generated passwords are never written here.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::generator::GenerationConfig;

const SETTINGS_FILE: &str = "settings.toml";

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ClipboardSettings {
    /// Seconds after which a copied password is wiped from the clipboard
    pub clear_after_secs: Option<u64>,
}

impl ClipboardSettings {
    pub fn clear_after(&self) -> Option<Duration> {
        self.clear_after_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Configuration used when a session is mounted
    pub defaults: GenerationConfig,

    pub clipboard: ClipboardSettings,
}

impl Settings {
    /// Path of the settings file. Nothing is created on disk.
    pub fn default_path() -> Result<PathBuf> {
        let Some(dirs) = ProjectDirs::from("dev", "bytegen", "bytegen") else {
            return Err(Error::invalid("could not determine config directory"));
        };
        Ok(dirs.config_dir().join(SETTINGS_FILE))
    }

    /// Load from the default location.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::default_path()?)
    }

    /// Load settings from `path`.
    ///
    /// A missing file yields the defaults. A stored length outside the
    /// allowed range is clamped.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no settings file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let mut settings: Settings = toml::from_str(&content)?;

        let clamped = GenerationConfig::clamp_length(settings.defaults.length);
        if clamped != settings.defaults.length {
            tracing::warn!(
                stored = settings.defaults.length,
                clamped,
                "stored default length out of range"
            );
            settings.defaults.length = clamped;
        }

        Ok(settings)
    }

    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::default_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Write settings to `path`, creating its directory if needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            if !dir.exists() {
                fs::create_dir_all(dir)?;
            }
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        tracing::debug!(path = %path.display(), "settings saved");
        Ok(())
    }
}
