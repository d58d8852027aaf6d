//! Sources of locale trees for languages that are not loaded yet

use crate::locale::{LocaleTable, LocaleTree};
use async_trait::async_trait;
use lingo_common::BoxError;
use std::future::Future;
use tracing::debug;

/// Error returned by a fetcher. Any error type can be boxed into it.
pub type FetchError = BoxError;

/// Produces the locale tree of a language on demand.
///
/// Implemented for async closures of the shape
/// `Fn(String) -> impl Future<Output = Result<LocaleTree, FetchError>>`:
///
/// ```rust
/// use lingo_i18n::{I18n, LocaleTree, FetchError};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let i18n = I18n::preload("en", |lang: String| async move {
///     Ok::<LocaleTree, FetchError>(LocaleTree::new().with("lang", lang))
/// })
/// .await?;
/// assert_eq!(i18n.t("lang", None), "en");
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait LocaleFetcher: Send + Sync {
    /// Fetch the tree for `lang`.
    async fn fetch(&self, lang: &str) -> Result<LocaleTree, FetchError>;
}

#[async_trait]
impl<F, Fut> LocaleFetcher for F
where
    F: Fn(String) -> Fut + Send + Sync,
    Fut: Future<Output = Result<LocaleTree, FetchError>> + Send + 'static,
{
    async fn fetch(&self, lang: &str) -> Result<LocaleTree, FetchError> {
        self(lang.to_string()).await
    }
}

/// Serves trees from memory, for bundled translations and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryFetcher {
    locales: LocaleTable,
}

impl MemoryFetcher {
    /// Fetcher over a prepared table
    pub fn new(locales: LocaleTable) -> Self {
        Self { locales }
    }

    /// Builder form adding one language
    #[must_use]
    pub fn with_locale(mut self, lang: impl Into<String>, tree: LocaleTree) -> Self {
        self.locales.insert(lang, tree);
        self
    }
}

#[async_trait]
impl LocaleFetcher for MemoryFetcher {
    async fn fetch(&self, lang: &str) -> Result<LocaleTree, FetchError> {
        debug!(lang, "Serving locale from memory");
        self.locales
            .get(lang)
            .map(|tree| LocaleTree::clone(tree))
            .ok_or_else(|| format!("no bundled locale for '{lang}'").into())
    }
}
