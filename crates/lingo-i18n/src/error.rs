//! Error types for translation store operations

use lingo_common::BoxError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during internationalization operations.
///
/// Missing keys and missing placeholder arguments are not errors: lookups
/// degrade to the key path or the literal placeholder instead.
#[derive(Error, Debug)]
pub enum I18nError {
    /// The configured fetcher failed to produce a locale tree
    #[error("Failed to fetch locale '{lang}': {source}")]
    Fetch {
        /// Language that was requested.
        lang: String,
        /// Error reported by the fetcher.
        #[source]
        source: BoxError,
    },

    /// A locale file could not be read
    #[error("Failed to load locale file {path}: {source}")]
    ResourceLoad {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A locale document is not a tree of strings
    #[error("Failed to parse locale '{lang}': {source}")]
    Parse {
        /// Language whose document was rejected.
        lang: String,
        /// JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// The language identifier cannot name a locale file
    #[error("Invalid language identifier: {0}")]
    InvalidLanguageId(String),

    /// Configuration could not be used to build a store
    #[error(transparent)]
    Config(#[from] lingo_config::ConfigError),
}

/// Result type for i18n operations
pub type I18nResult<T> = Result<T, I18nError>;
