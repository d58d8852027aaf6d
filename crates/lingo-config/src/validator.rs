//! Runtime validation of loaded configuration.

use crate::error::{ConfigError, ConfigResult};
use crate::schema::Config;

const LOG_FORMATS: [&str; 3] = ["compact", "pretty", "json"];

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validates a configuration.
    pub fn validate(config: &Config) -> ConfigResult<()> {
        Self::validate_language("i18n.default_language", &config.i18n.default_language)?;
        for lang in &config.i18n.preload {
            Self::validate_language("i18n.preload", lang)?;
        }

        if config.i18n.locales_dir.as_os_str().is_empty() {
            return Err(ConfigError::invalid("i18n.locales_dir", "cannot be empty"));
        }

        if !LOG_FORMATS.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::invalid(
                "logging.format",
                format!("expected one of {LOG_FORMATS:?}, got '{}'", config.logging.format),
            ));
        }

        Ok(())
    }

    /// Language identifiers become file names, so path syntax is refused.
    fn validate_language(field: &str, lang: &str) -> ConfigResult<()> {
        if lang.trim().is_empty() {
            return Err(ConfigError::invalid(field, "language cannot be empty"));
        }
        if lang.contains(['/', '\\']) || lang.contains("..") {
            return Err(ConfigError::invalid(
                field,
                format!("'{lang}' is not a plain language identifier"),
            ));
        }
        Ok(())
    }
}

impl Config {
    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        ConfigValidator::validate(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_empty_language() {
        let mut config = Config::default();
        config.i18n.default_language = "  ".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("i18n.default_language"));
    }

    #[test]
    fn test_rejects_path_like_preload() {
        let mut config = Config::default();
        config.i18n.preload = vec!["../secrets".to_string()];
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { field, .. }) if field == "i18n.preload"
        ));
    }

    #[test]
    fn test_rejects_unknown_log_format() {
        let mut config = Config::default();
        config.logging.format = "xml".to_string();
        assert!(config.validate().is_err());
    }
}
