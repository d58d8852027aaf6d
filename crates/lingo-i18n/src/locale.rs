//! Locale trees and the table of loaded languages

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

/// Identifier of a language, e.g. `"en"` or `"zh-CN"`. Opaque to the store.
pub type LocaleLang = String;

/// Tree shared by every store whose active language has no entry.
pub(crate) static EMPTY_LOCALE: Lazy<Arc<LocaleTree>> = Lazy::new(|| Arc::new(LocaleTree::new()));

/// A value inside a [`LocaleTree`]: either a message or a nested tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LocaleValue {
    /// A message string, possibly containing `{{...}}` placeholders
    Message(String),
    /// A nested group of messages
    Nested(LocaleTree),
}

impl LocaleValue {
    /// The message string, if this is a leaf
    pub fn as_message(&self) -> Option<&str> {
        match self {
            Self::Message(message) => Some(message),
            Self::Nested(_) => None,
        }
    }

    /// The nested tree, if this is a branch
    pub fn as_tree(&self) -> Option<&LocaleTree> {
        match self {
            Self::Message(_) => None,
            Self::Nested(tree) => Some(tree),
        }
    }
}

impl From<&str> for LocaleValue {
    fn from(message: &str) -> Self {
        Self::Message(message.to_string())
    }
}

impl From<String> for LocaleValue {
    fn from(message: String) -> Self {
        Self::Message(message)
    }
}

impl From<LocaleTree> for LocaleValue {
    fn from(tree: LocaleTree) -> Self {
        Self::Nested(tree)
    }
}

/// Nested translation table for one language.
///
/// Deserializes from any self-describing format where strings are messages
/// and maps are nested groups:
///
/// ```rust
/// use lingo_i18n::LocaleTree;
///
/// let tree = LocaleTree::from_json_str(r#"{"daily": {"fruit": "apple"}}"#).unwrap();
/// assert_eq!(tree.lookup("daily.fruit"), Some("apple"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocaleTree {
    entries: BTreeMap<String, LocaleValue>,
}

impl LocaleTree {
    /// Create an empty tree
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a tree from a JSON object
    pub fn from_json_str(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Insert a message or nested tree, returning the previous value
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<LocaleValue>) -> Option<LocaleValue> {
        self.entries.insert(key.into(), value.into())
    }

    /// Builder form of [`insert`](Self::insert)
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<LocaleValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Direct child by key
    pub fn get(&self, key: &str) -> Option<&LocaleValue> {
        self.entries.get(key)
    }

    /// Walk a dotted key path segment by segment and return the message at its end.
    pub fn lookup(&self, key_path: &str) -> Option<&str> {
        let (parents, leaf) = match key_path.rsplit_once('.') {
            Some((parents, leaf)) => (Some(parents), leaf),
            None => (None, key_path),
        };

        let mut node = self;
        if let Some(parents) = parents {
            for segment in parents.split('.') {
                node = node.get(segment)?.as_tree()?;
            }
        }
        node.get(leaf)?.as_message()
    }

    /// Number of direct children
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the tree has no children
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Direct children in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &LocaleValue)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }
}

impl<K, V> FromIterator<(K, V)> for LocaleTree
where
    K: Into<String>,
    V: Into<LocaleValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tree = Self::new();
        for (key, value) in iter {
            tree.insert(key, value);
        }
        tree
    }
}

/// All loaded locale trees, keyed by language.
///
/// Trees are shared, so deriving a new table with
/// [`with_locale`](Self::with_locale) leaves every other entry pointing at
/// the very same tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocaleTable {
    locales: HashMap<LocaleLang, Arc<LocaleTree>>,
}

impl LocaleTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Tree for a language
    pub fn get(&self, lang: &str) -> Option<&Arc<LocaleTree>> {
        self.locales.get(lang)
    }

    /// Whether a tree is loaded for the language
    pub fn contains(&self, lang: &str) -> bool {
        self.locales.contains_key(lang)
    }

    /// Add or replace one language's tree
    pub fn insert(&mut self, lang: impl Into<LocaleLang>, tree: impl Into<Arc<LocaleTree>>) {
        self.locales.insert(lang.into(), tree.into());
    }

    /// A copy of this table with one language added or replaced
    #[must_use]
    pub fn with_locale(&self, lang: impl Into<LocaleLang>, tree: impl Into<Arc<LocaleTree>>) -> Self {
        let mut next = self.clone();
        next.insert(lang, tree);
        next
    }

    /// Loaded languages, sorted
    pub fn languages(&self) -> Vec<&str> {
        let mut languages: Vec<&str> = self.locales.keys().map(String::as_str).collect();
        languages.sort_unstable();
        languages
    }

    /// Number of loaded languages
    pub fn len(&self) -> usize {
        self.locales.len()
    }

    /// Whether no language is loaded
    pub fn is_empty(&self) -> bool {
        self.locales.is_empty()
    }
}

impl<K, T> FromIterator<(K, T)> for LocaleTable
where
    K: Into<LocaleLang>,
    T: Into<Arc<LocaleTree>>,
{
    fn from_iter<I: IntoIterator<Item = (K, T)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (lang, tree) in iter {
            table.insert(lang, tree);
        }
        table
    }
}

/// Macro to build a [`LocaleTree`] inline
///
/// ```rust
/// use lingo_i18n::locale_tree;
///
/// let tree = locale_tree! {
///     "name" => "CRIMX",
///     "daily" => { "fruit" => { "stock" => "apple" } },
/// };
/// assert_eq!(tree.lookup("daily.fruit.stock"), Some("apple"));
/// ```
#[macro_export]
macro_rules! locale_tree {
    (@value { $($inner:tt)* }) => {
        $crate::LocaleValue::Nested($crate::locale_tree!($($inner)*))
    };
    (@value $value:expr) => {
        $crate::LocaleValue::from($value)
    };
    () => {
        $crate::LocaleTree::new()
    };
    ($($key:expr => $value:tt),+ $(,)?) => {{
        let mut tree = $crate::LocaleTree::new();
        $(
            tree.insert($key, $crate::locale_tree!(@value $value));
        )+
        tree
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_round_shape() {
        let tree = LocaleTree::from_json_str(r#"{"a": "x", "b": {"c": "y"}}"#).unwrap();
        assert_eq!(tree.len(), 2);
        assert_eq!(tree.get("a"), Some(&LocaleValue::from("x")));
        assert!(tree.get("b").and_then(LocaleValue::as_tree).is_some());
    }

    #[test]
    fn test_json_rejects_non_string_leaves() {
        assert!(LocaleTree::from_json_str(r#"{"count": 3}"#).is_err());
        assert!(LocaleTree::from_json_str(r#"["a"]"#).is_err());
    }

    #[test]
    fn test_lookup() {
        let tree = locale_tree! {
            "person" => { "name" => "CRIMX" },
            "apple" => "apple",
        };
        assert_eq!(tree.lookup("person.name"), Some("CRIMX"));
        assert_eq!(tree.lookup("apple"), Some("apple"));
        assert_eq!(tree.lookup("person"), None);
        assert_eq!(tree.lookup("apple.name"), None);
        assert_eq!(tree.lookup("missing.name"), None);
    }

    #[test]
    fn test_with_locale_shares_other_trees() {
        let en = Arc::new(locale_tree! { "apple" => "apple" });
        let table: LocaleTable = [("en", Arc::clone(&en))].into_iter().collect();

        let next = table.with_locale("zh", locale_tree! { "apple" => "苹果" });

        assert!(!table.contains("zh"));
        assert_eq!(next.languages(), vec!["en", "zh"]);
        assert!(Arc::ptr_eq(next.get("en").unwrap(), &en));
    }

    #[test]
    fn test_empty_macro() {
        assert!(locale_tree!().is_empty());
    }
}
