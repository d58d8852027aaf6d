//! Structured logging setup built on `tracing-subscriber`.

use crate::error::CommonError;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Output format of the fmt layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Single-line human readable output.
    #[default]
    Compact,
    /// Multi-line output with colors.
    Pretty,
    /// Newline-delimited JSON objects.
    Json,
}

/// Configuration for the logging system
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "lingo_i18n=debug"). `RUST_LOG` wins when set.
    pub level: String,
    /// Output format
    pub format: LogFormat,
    /// Whether to include target module information
    pub include_targets: bool,
    /// Whether to emit ANSI colors
    pub ansi: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Compact,
            include_targets: true,
            ansi: true,
        }
    }
}

impl LoggingConfig {
    /// Shorthand for a default configuration at the given level.
    pub fn with_level(level: impl Into<String>) -> Self {
        Self {
            level: level.into(),
            ..Self::default()
        }
    }

    /// Builds the env filter, preferring `RUST_LOG` over the configured level.
    pub fn env_filter(&self) -> Result<EnvFilter, CommonError> {
        if let Ok(filter) = EnvFilter::try_from_default_env() {
            return Ok(filter);
        }
        EnvFilter::try_new(&self.level).map_err(|e| CommonError::InvalidFilter {
            filter: self.level.clone(),
            reason: e.to_string(),
        })
    }
}

/// Initialize the global tracing subscriber with the given configuration.
///
/// Fails if the filter does not parse or a subscriber is already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<(), CommonError> {
    let env_filter = config.env_filter()?;

    let layer = match config.format {
        LogFormat::Compact => fmt::layer()
            .compact()
            .with_target(config.include_targets)
            .with_ansi(config.ansi)
            .boxed(),
        LogFormat::Pretty => fmt::layer()
            .pretty()
            .with_target(config.include_targets)
            .with_ansi(config.ansi)
            .boxed(),
        LogFormat::Json => fmt::layer()
            .json()
            .with_target(config.include_targets)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(layer)
        .try_init()
        .map_err(|e| CommonError::AlreadyInitialized(e.to_string()))?;

    tracing::debug!(level = %config.level, format = ?config.format, "Logging initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, "info");
        assert_eq!(config.format, LogFormat::Compact);
        assert!(config.include_targets);
    }

    #[test]
    fn test_with_level() {
        let config = LoggingConfig::with_level("lingo_i18n=trace");
        assert_eq!(config.level, "lingo_i18n=trace");
        assert!(config.ansi);
    }

    #[test]
    fn test_invalid_filter_is_rejected() {
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }
        let config = LoggingConfig::with_level("lingo=loud");
        let err = config.env_filter().unwrap_err();
        assert!(matches!(err, CommonError::InvalidFilter { .. }));
    }
}
