//! The translation store
//!
//! [`I18n`] owns two roots, the active language and the table of loaded
//! locale trees, and derives three layers from them:
//!
//! ```text
//! (lang, locales) ──> locale tree ──> flat locale ──> resolver
//! ```
//!
//! Each layer is recomputed on the next read after its direct input changed
//! identity, and only then. The resolver layer creates a fresh
//! [`TemplateCache`](crate::resolver::TemplateCache), so compiled templates
//! never survive a change of flat locale.

use crate::args::Args;
use crate::error::{I18nError, I18nResult};
use crate::fetcher::LocaleFetcher;
use crate::flatten::{flatten, FlatLocale};
use crate::loader::JsonDirFetcher;
use crate::locale::{LocaleLang, LocaleTable, LocaleTree, EMPTY_LOCALE};
use crate::reactive::{Computed, Writable};
use crate::resolver::Resolver;
use lingo_config::Config;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Stable translation handle.
///
/// The handle stays the same for the lifetime of its store while the
/// resolver behind it follows language and locale changes, so it can be
/// stored anywhere without going stale.
#[derive(Debug)]
pub struct Translator {
    resolver: Computed<Arc<Resolver>>,
}

impl Translator {
    /// Translate `key_path` with optional interpolation arguments.
    ///
    /// Unknown keys come back unchanged.
    pub fn t<'a>(&self, key_path: &str, args: impl Into<Option<&'a Args>>) -> String {
        self.resolver.get().resolve(key_path, args.into())
    }

    /// The resolver currently behind this handle
    pub fn current(&self) -> Arc<Resolver> {
        self.resolver.get()
    }
}

/// Manages the active language and its translations
pub struct I18n {
    lang: Writable<LocaleLang>,
    locales: Writable<Arc<LocaleTable>>,
    locale: Computed<Arc<LocaleTree>>,
    flat_locale: Computed<Arc<FlatLocale>>,
    resolver: Computed<Arc<Resolver>>,
    translator: Arc<Translator>,
    fetcher: Option<Arc<dyn LocaleFetcher>>,
}

impl fmt::Debug for I18n {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("I18n")
            .field("lang", &self.lang.get())
            .field("languages", &self.languages())
            .field("fetcher", &self.fetcher.is_some())
            .finish_non_exhaustive()
    }
}

impl I18n {
    /// Create a store with `initial_lang` active over `locales`.
    ///
    /// The language does not need an entry in `locales`; lookups then
    /// resolve against an empty tree.
    pub fn new(initial_lang: impl Into<LocaleLang>, locales: LocaleTable) -> Self {
        let lang = Writable::new(initial_lang.into());
        let locales = Writable::new(Arc::new(locales));

        let locale = Computed::new([lang.dependency(), locales.dependency()], {
            let lang = lang.clone();
            let locales = locales.clone();
            move || {
                let lang = lang.get();
                locales.get().get(&lang).cloned().unwrap_or_else(|| {
                    debug!(lang = %lang, "No locale loaded, using an empty tree");
                    Arc::clone(&EMPTY_LOCALE)
                })
            }
        });

        let flat_locale = Computed::new([locale.dependency()], {
            let locale = locale.clone();
            move || {
                let flat = flatten(&locale.get());
                debug!(messages = flat.len(), "Flattened active locale");
                Arc::new(flat)
            }
        });

        let resolver = Computed::new([flat_locale.dependency()], {
            let flat_locale = flat_locale.clone();
            move || Arc::new(Resolver::new(flat_locale.get()))
        });

        let translator = Arc::new(Translator {
            resolver: resolver.clone(),
        });

        info!(lang = %lang.get(), languages = locales.get().len(), "I18n initialized");

        Self {
            lang,
            locales,
            locale,
            flat_locale,
            resolver,
            translator,
            fetcher: None,
        }
    }

    /// Fetch the locale of `initial_lang` and create a store with it loaded,
    /// keeping `fetcher` for later switches.
    pub async fn preload(
        initial_lang: impl Into<LocaleLang>,
        fetcher: impl LocaleFetcher + 'static,
    ) -> I18nResult<Self> {
        let lang = initial_lang.into();
        let tree = fetch(&fetcher, &lang).await?;

        let mut locales = LocaleTable::new();
        locales.insert(lang.clone(), tree);
        Ok(Self::new(lang, locales).with_fetcher(fetcher))
    }

    /// Create a store from configuration: locales are read from
    /// `i18n.locales_dir`, the default language and every `i18n.preload`
    /// language are loaded up front.
    pub async fn from_config(config: &Config) -> I18nResult<Self> {
        config.validate()?;

        let fetcher = JsonDirFetcher::new(&config.i18n.locales_dir);
        let mut locales = LocaleTable::new();
        for lang in config.i18n.startup_languages() {
            locales.insert(lang, fetcher.load(lang).await?);
        }

        Ok(Self::new(config.i18n.default_language.clone(), locales).with_fetcher(fetcher))
    }

    /// Use `fetcher` for languages missing from the table
    #[must_use]
    pub fn with_fetcher(mut self, fetcher: impl LocaleFetcher + 'static) -> Self {
        self.set_fetcher(fetcher);
        self
    }

    /// Replace the fetcher
    pub fn set_fetcher(&mut self, fetcher: impl LocaleFetcher + 'static) {
        self.fetcher = Some(Arc::new(fetcher));
    }

    /// Whether a fetcher is configured
    pub fn has_fetcher(&self) -> bool {
        self.fetcher.is_some()
    }

    /// Current language
    pub fn lang(&self) -> LocaleLang {
        self.lang.get()
    }

    /// Locale tree of the current language
    pub fn locale(&self) -> Arc<LocaleTree> {
        self.locale.get()
    }

    /// All loaded locale trees
    pub fn locales(&self) -> Arc<LocaleTable> {
        self.locales.get()
    }

    /// Flattened locale of the current language
    pub fn flat_locale(&self) -> Arc<FlatLocale> {
        self.flat_locale.get()
    }

    /// Loaded languages, sorted
    pub fn languages(&self) -> Vec<LocaleLang> {
        self.locales.get().languages().into_iter().map(str::to_string).collect()
    }

    /// Translate `key_path` in the current language.
    ///
    /// ```rust
    /// use lingo_i18n::{locale_tree, t_args, I18n, LocaleTable};
    ///
    /// let locales: LocaleTable = [("en", locale_tree! { "intro" => "{{name}} eats {{fruit}}" })]
    ///     .into_iter()
    ///     .collect();
    /// let i18n = I18n::new("en", locales);
    ///
    /// let args = t_args!["name" => "CRIMX", "fruit" => "apple"];
    /// assert_eq!(i18n.t("intro", &args), "CRIMX eats apple");
    /// assert_eq!(i18n.t("outro", None), "outro");
    /// ```
    pub fn t<'a>(&self, key_path: &str, args: impl Into<Option<&'a Args>>) -> String {
        self.translator.t(key_path, args)
    }

    /// The stable translation handle; the same `Arc` for the store's lifetime
    pub fn translator(&self) -> Arc<Translator> {
        Arc::clone(&self.translator)
    }

    /// Whether the current flat locale has exactly `key_path`.
    /// Modifier variants are not considered.
    pub fn has_key(&self, key_path: &str) -> bool {
        self.flat_locale.with(|flat| flat.contains_key(key_path))
    }

    /// Change the active language.
    ///
    /// A language missing from the table is fetched first when a fetcher is
    /// configured. The active language changes only after the tree is
    /// installed; on fetch failure it stays as it was.
    ///
    /// Concurrent switches are not serialized: whichever finishes last wins.
    pub async fn switch_lang(&self, lang: impl Into<LocaleLang>) -> I18nResult<()> {
        let lang = lang.into();

        if !self.locales.get().contains(&lang) {
            if let Some(fetcher) = self.fetcher.clone() {
                let tree = fetch(fetcher.as_ref(), &lang).await?;
                self.add_locale(lang.clone(), tree);
            }
        }

        if self.lang.set(lang.clone()) {
            info!(lang = %lang, "Switched language");
        }
        Ok(())
    }

    /// Add or replace the tree of one language. The active language is
    /// not changed.
    pub fn add_locale(&self, lang: impl Into<LocaleLang>, tree: impl Into<Arc<LocaleTree>>) {
        let lang = lang.into();
        debug!(lang = %lang, "Adding locale");
        self.locales.update(|table| Arc::new(table.with_locale(lang, tree)));
    }

    /// Replace the whole table of loaded locales
    pub fn set_locales(&self, locales: LocaleTable) {
        debug!(languages = locales.len(), "Replacing locale table");
        self.locales.set(Arc::new(locales));
    }

    /// Release every subscription in the dependency graph.
    ///
    /// Reads after disposal return the last derived values and no longer
    /// follow writes.
    pub fn dispose(&self) {
        self.resolver.dispose();
        self.flat_locale.dispose();
        self.locale.dispose();
        self.locales.dispose();
        self.lang.dispose();
        debug!("I18n disposed");
    }

    /// Subscriptions still registered on the two roots
    pub fn subscription_count(&self) -> usize {
        self.lang.dependent_count() + self.locales.dependent_count()
    }
}

async fn fetch(fetcher: &dyn LocaleFetcher, lang: &str) -> I18nResult<LocaleTree> {
    debug!(lang, "Fetching locale");
    fetcher.fetch(lang).await.map_err(|source| {
        warn!(lang, error = %source, "Failed to fetch locale");
        I18nError::Fetch {
            lang: lang.to_string(),
            source,
        }
    })
}
