//! Persisted application settings.
//!
//! Settings live in a TOML file under the `.petri` config root. Missing
//! fields fall back to defaults so old files keep loading as the schema
//! grows, and `PETRI_API_BASE_URL` overrides the stored backend address for
//! the lifetime of the process.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::app_dirs;

/// Default filename used to store the app configuration.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Environment variable overriding the backend base URL.
pub const API_BASE_URL_VAR: &str = "PETRI_API_BASE_URL";

/// Application settings persisted in the TOML config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Base URL of the prediction backend, including the API prefix.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Catalog page size applied on startup.
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            page_size: default_page_size(),
        }
    }
}

/// Errors that may occur while loading or saving app configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unable to create config directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config at {path}: {source}")]
    ParseToml {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Failed to serialize config to TOML at {path}: {source}")]
    SerializeToml {
        path: PathBuf,
        source: toml::ser::Error,
    },
    #[error("No suitable config directory found")]
    NoConfigDir,
}

/// Resolve the configuration file path, ensuring the parent directory exists.
pub fn config_path() -> Result<PathBuf, ConfigError> {
    let dir = app_dirs::app_root_dir().map_err(map_app_dir_error)?;
    Ok(dir.join(CONFIG_FILE_NAME))
}

/// Load settings from disk, returning defaults if the file is missing.
///
/// The `PETRI_API_BASE_URL` environment variable, when set and non-empty,
/// wins over whatever the file contains.
pub fn load_or_default() -> Result<Settings, ConfigError> {
    let path = config_path()?;
    let mut settings = load_from_path(&path)?;
    apply_api_base_override(&mut settings, std::env::var(API_BASE_URL_VAR).ok());
    Ok(settings)
}

/// Persist settings to the default config path.
pub fn save(settings: &Settings) -> Result<(), ConfigError> {
    let path = config_path()?;
    save_to_path(settings, &path)
}

/// Save settings to a specific path, creating parent directories as needed.
pub fn save_to_path(settings: &Settings, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| ConfigError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let data = toml::to_string_pretty(settings).map_err(|source| ConfigError::SerializeToml {
        path: path.to_path_buf(),
        source,
    })?;
    std::fs::write(path, data).map_err(|source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    })
}

fn load_from_path(path: &Path) -> Result<Settings, ConfigError> {
    if !path.exists() {
        return Ok(Settings::default());
    }
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&text).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })
}

fn apply_api_base_override(settings: &mut Settings, value: Option<String>) {
    if let Some(value) = value {
        let trimmed = value.trim();
        if !trimmed.is_empty() {
            settings.api_base_url = trimmed.to_string();
        }
    }
}

fn default_api_base_url() -> String {
    "http://localhost:8000/api/v1".to_string()
}

fn default_page_size() -> u32 {
    10
}

fn map_app_dir_error(error: app_dirs::AppDirError) -> ConfigError {
    match error {
        app_dirs::AppDirError::NoBaseDir => ConfigError::NoConfigDir,
        app_dirs::AppDirError::CreateDir { path, source } => {
            ConfigError::CreateDir { path, source }
        }
    }
}
