//! Default values for every configuration section.

use crate::schema::{I18nConfig, LoggingSettings};

/// Language used when nothing else is configured.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Directory searched for locale files by default.
pub const DEFAULT_LOCALES_DIR: &str = "locales";

/// Environment variable overriding [`I18nConfig::default_language`].
pub const ENV_LANGUAGE: &str = "LINGO_LANG";

/// Environment variable overriding [`I18nConfig::locales_dir`].
pub const ENV_LOCALES_DIR: &str = "LINGO_LOCALES_DIR";

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            default_language: DEFAULT_LANGUAGE.to_string(),
            locales_dir: DEFAULT_LOCALES_DIR.into(),
            preload: Vec::new(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "compact".to_string(),
        }
    }
}
