//! Configuration loading and persistence with atomic file operations.

use crate::defaults::{ENV_LANGUAGE, ENV_LOCALES_DIR};
use crate::error::{ConfigError, ConfigResult};
use crate::schema::Config;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Serialization format of a configuration file, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// `.toml`
    Toml,
    /// `.json`
    Json,
}

impl ConfigFormat {
    /// Detects the format from the file extension.
    pub fn from_path(path: &Path) -> ConfigResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Ok(Self::Toml),
            Some("json") => Ok(Self::Json),
            _ => Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        }
    }

    /// Parses a configuration document.
    pub fn parse(self, text: &str) -> ConfigResult<Config> {
        match self {
            Self::Toml => Ok(toml::from_str(text)?),
            Self::Json => Ok(serde_json::from_str(text)?),
        }
    }

    /// Renders a configuration document.
    pub fn render(self, config: &Config) -> ConfigResult<String> {
        match self {
            Self::Toml => Ok(toml::to_string_pretty(config)?),
            Self::Json => Ok(serde_json::to_string_pretty(config)?),
        }
    }
}

/// Configuration loader with atomic file operations.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    path: PathBuf,
}

impl ConfigLoader {
    /// Creates a new configuration loader.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the configuration file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads configuration from file, applies environment overrides and validates it.
    pub async fn load(&self) -> ConfigResult<Config> {
        let format = ConfigFormat::from_path(&self.path)?;
        let text = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| ConfigError::Io {
                path: self.path.clone(),
                source,
            })?;

        let mut config = format.parse(&text)?;
        config.apply_env_overrides();
        config.validate()?;

        info!(path = ?self.path, language = %config.i18n.default_language, "Loaded configuration");
        Ok(config)
    }

    /// Like [`load`](Self::load), but a missing file yields the defaults.
    pub async fn load_or_default(&self) -> ConfigResult<Config> {
        if tokio::fs::try_exists(&self.path).await.unwrap_or(false) {
            return self.load().await;
        }

        debug!(path = ?self.path, "Config file not found, using defaults");
        let mut config = Config::default();
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Saves configuration to file atomically.
    ///
    /// The document is written next to the target and renamed over it.
    pub async fn save(&self, config: &Config) -> ConfigResult<()> {
        config.validate()?;
        let format = ConfigFormat::from_path(&self.path)?;
        let text = format.render(config)?;

        let staging = self.path.with_extension("tmp");
        let io_err = |source| ConfigError::Io {
            path: self.path.clone(),
            source,
        };
        tokio::fs::write(&staging, text).await.map_err(io_err)?;
        tokio::fs::rename(&staging, &self.path).await.map_err(io_err)?;

        info!(path = ?self.path, "Saved configuration");
        Ok(())
    }
}

impl Config {
    /// Applies `LINGO_LANG` and `LINGO_LOCALES_DIR` from the process environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from an arbitrary variable source.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(lang) = lookup(ENV_LANGUAGE).filter(|v| !v.is_empty()) {
            debug!(language = %lang, "Default language overridden by environment");
            self.i18n.default_language = lang;
        }
        if let Some(dir) = lookup(ENV_LOCALES_DIR).filter(|v| !v.is_empty()) {
            self.i18n.locales_dir = dir.into();
        }
    }
}
