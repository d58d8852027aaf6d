//! Error aliases shared by every crate in the workspace.

/// Boxed error type used for errors coming from outside the workspace,
/// such as a user-supplied locale fetcher.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors raised while setting up shared infrastructure.
#[derive(thiserror::Error, Debug)]
pub enum CommonError {
    /// The log filter directive could not be parsed.
    #[error("Invalid log filter '{filter}': {reason}")]
    InvalidFilter {
        /// The directive that was rejected.
        filter: String,
        /// Parser message.
        reason: String,
    },

    /// A global tracing subscriber was already installed.
    #[error("Logging already initialized: {0}")]
    AlreadyInitialized(String),
}
