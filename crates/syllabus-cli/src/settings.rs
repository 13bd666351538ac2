//! User settings, loaded from `settings.toml`.
//!
//! The file lives in the platform config folder unless `--config` points
//! elsewhere:
//! - macOS: ~/Library/Application Support/dev.syllabus.Syllabus/
//! - Windows: %APPDATA%/syllabus/Syllabus/config/
//! - Linux: ~/.config/syllabus/
//!
//! ```toml
//! [catalog]
//! path = "/path/to/catalog.json"
//!
//! [state]
//! path = "/path/to/state.json"
//!
//! [display]
//! table_width = 120
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

const APP_QUALIFIER: &str = "dev";
const APP_ORG: &str = "syllabus";
const APP_NAME: &str = "Syllabus";
const CONFIG_FILENAME: &str = "settings.toml";
const STATE_FILENAME: &str = "state.json";

const DEFAULT_TABLE_WIDTH: u16 = 120;
const MIN_TABLE_WIDTH: u16 = 40;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub catalog: CatalogSettings,
    pub state: StateSettings,
    pub display: DisplaySettings,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogSettings {
    /// Catalog JSON file.
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StateSettings {
    /// Session state file. Defaults to the platform data folder.
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    pub table_width: u16,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            table_width: DEFAULT_TABLE_WIDTH,
        }
    }
}

impl DisplaySettings {
    /// Configured width, never narrower than a readable table.
    pub fn effective_table_width(&self) -> u16 {
        self.table_width.max(MIN_TABLE_WIDTH)
    }
}

impl Settings {
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Catalog path: command-line flag first, then settings.
    pub fn catalog_path(&self, flag: Option<&Path>) -> Option<PathBuf> {
        flag.map(Path::to_path_buf)
            .or_else(|| self.catalog.path.clone())
    }

    /// State path: command-line flag, then settings, then the platform data folder.
    pub fn state_path(&self, flag: Option<&Path>) -> Option<PathBuf> {
        flag.map(Path::to_path_buf)
            .or_else(|| self.state.path.clone())
            .or_else(default_state_path)
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
}

/// Default settings file location, if the platform has one.
pub fn settings_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
}

/// Default state file location, if the platform has one.
pub fn default_state_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_dir().join(STATE_FILENAME))
}

/// Load settings from `explicit` or the default location.
///
/// A missing file, an unreadable file, or invalid TOML all yield defaults;
/// the latter two are logged as warnings.
pub fn load_settings(explicit: Option<&Path>) -> Settings {
    let Some(path) = explicit.map(Path::to_path_buf).or_else(settings_path) else {
        warn!("could not determine settings path, using defaults");
        return Settings::default();
    };

    match fs::read_to_string(&path) {
        Ok(content) => match Settings::from_toml_str(&content) {
            Ok(settings) => {
                info!(path = %path.display(), "loaded settings");
                settings
            }
            Err(error) => {
                warn!(path = %path.display(), %error, "invalid settings file, using defaults");
                Settings::default()
            }
        },
        Err(error) if error.kind() == io::ErrorKind::NotFound => {
            info!(path = %path.display(), "no settings file, using defaults");
            Settings::default()
        }
        Err(error) => {
            warn!(path = %path.display(), %error, "failed to read settings file, using defaults");
            Settings::default()
        }
    }
}
