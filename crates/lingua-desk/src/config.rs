use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use lingua_catalog::{CatalogError, PlacementBank, TeacherDirectory};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::contact::{ContactChannel, DEFAULT_CONTACT_URL};

pub const CONTACT_URL_ENV: &str = "LINGUA_DESK_CONTACT_URL";
pub const LOCALE_ENV: &str = "LINGUA_DESK_LOCALE";
pub const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Desk settings.
///
/// | Source                      | Applies to                 |
/// |-----------------------------|----------------------------|
/// | `config.toml`               | every field                |
/// | `LINGUA_DESK_CONTACT_URL`   | `contact_url`              |
/// | `LINGUA_DESK_LOCALE`        | `locale`                   |
///
/// Environment values override the file. Unset fields fall back to the
/// bundled teacher directory and placement bank and the placeholder chat
/// URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DeskConfig {
    pub contact_url: String,
    pub locale: Option<String>,
    pub teachers_path: Option<PathBuf>,
    pub placement_path: Option<PathBuf>,
}

impl Default for DeskConfig {
    fn default() -> Self {
        Self {
            contact_url: DEFAULT_CONTACT_URL.to_string(),
            locale: None,
            teachers_path: None,
            placement_path: None,
        }
    }
}

impl DeskConfig {
    /// Reads `explicit`, or the platform config file when it exists, then
    /// applies the process environment.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match explicit {
            Some(path) => Self::from_path(path)?,
            None => match default_config_path() {
                Some(path) if path.is_file() => Self::from_path(&path)?,
                _ => Self::default(),
            },
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(path = %path.display(), "loaded desk config");
        Ok(config)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }

    /// Overrides fields from `lookup`; blank values are skipped.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        if let Some(url) = read(CONTACT_URL_ENV) {
            self.contact_url = url;
        }
        if let Some(locale) = read(LOCALE_ENV) {
            self.locale = Some(locale);
        }
    }

    pub fn contact_channel(&self) -> ContactChannel {
        ContactChannel::new(self.contact_url.clone())
    }

    pub fn load_directory(&self) -> Result<TeacherDirectory, CatalogError> {
        match &self.teachers_path {
            Some(path) => TeacherDirectory::from_path(path),
            None => TeacherDirectory::embedded(),
        }
    }

    pub fn load_bank(&self) -> Result<PlacementBank, CatalogError> {
        match &self.placement_path {
            Some(path) => PlacementBank::from_path(path),
            None => PlacementBank::embedded(),
        }
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "lingua-desk").map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}
