//! # Lingo I18n
//!
//! Reactive translation store over nested locale trees.
//!
//! Locale trees are flattened to dotted key paths, messages are compiled to
//! `{{placeholder}}` templates on first use and cached until the active
//! table changes, and a `key@modifier` entry is preferred over `key` when
//! the `@` argument selects it.
//!
//! ```rust
//! use lingo_i18n::{locale_tree, t_args, I18n, LocaleTable};
//!
//! let locales: LocaleTable = [
//!     ("en", locale_tree! {
//!         "stock" => { "fruit" => "apple" },
//!         "apple" => "{{@}} apples",
//!         "apple@0" => "No apple",
//!     }),
//! ]
//! .into_iter()
//! .collect();
//!
//! let i18n = I18n::new("en", locales);
//! assert_eq!(i18n.t("stock.fruit", None), "apple");
//! assert_eq!(i18n.t("apple", &t_args!["@" => 0]), "No apple");
//! assert_eq!(i18n.t("apple", &t_args!["@" => 5]), "5 apples");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod args;
pub mod error;
pub mod fetcher;
pub mod flatten;
pub mod loader;
pub mod locale;
pub mod reactive;
pub mod resolver;
pub mod store;
pub mod template;

pub use args::{ArgValue, Args, MODIFIER_KEY};
pub use error::{I18nError, I18nResult};
pub use fetcher::{FetchError, LocaleFetcher, MemoryFetcher};
pub use flatten::{flatten, FlatLocale};
pub use loader::JsonDirFetcher;
pub use locale::{LocaleLang, LocaleTable, LocaleTree, LocaleValue};
pub use resolver::{Resolver, TemplateCache};
pub use store::{I18n, Translator};
pub use template::Template;
