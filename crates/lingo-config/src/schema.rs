//! Configuration schema definitions using serde.

use lingo_common::{LogFormat, LoggingConfig};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Translation settings.
    pub i18n: I18nConfig,
    /// Logging settings.
    pub logging: LoggingSettings,
}

/// Translation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct I18nConfig {
    /// Language active when the store is created.
    pub default_language: String,
    /// Directory holding one `<lang>.json` file per language.
    pub locales_dir: PathBuf,
    /// Languages fetched eagerly next to the default language.
    pub preload: Vec<String>,
}

/// Logging settings as they appear in the config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Filter directive, e.g. `info` or `lingo_i18n=debug`.
    pub level: String,
    /// One of `compact`, `pretty`, `json`.
    pub format: String,
}

impl LoggingSettings {
    /// Converts the file representation into the runtime logging config.
    ///
    /// Unknown formats fall back to compact output; [`crate::ConfigValidator`]
    /// rejects them before this point when used.
    pub fn to_logging_config(&self) -> LoggingConfig {
        let format = match self.format.as_str() {
            "pretty" => LogFormat::Pretty,
            "json" => LogFormat::Json,
            _ => LogFormat::Compact,
        };
        LoggingConfig {
            level: self.level.clone(),
            format,
            ..LoggingConfig::default()
        }
    }
}

impl I18nConfig {
    /// Every language the store should have loaded at startup, default first,
    /// without duplicates.
    pub fn startup_languages(&self) -> Vec<&str> {
        let mut languages = vec![self.default_language.as_str()];
        for lang in &self.preload {
            if !languages.contains(&lang.as_str()) {
                languages.push(lang);
            }
        }
        languages
    }
}
