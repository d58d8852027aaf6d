//! Projection of a nested locale tree onto dotted key paths

use crate::locale::{LocaleTree, LocaleValue};
use std::collections::HashMap;

/// Dotted key path → message, one entry per string leaf of a [`LocaleTree`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlatLocale {
    messages: HashMap<String, String>,
}

impl FlatLocale {
    /// Message at a key path
    pub fn get(&self, key_path: &str) -> Option<&str> {
        self.messages.get(key_path).map(String::as_str)
    }

    /// Whether a message exists at exactly this key path
    pub fn contains_key(&self, key_path: &str) -> bool {
        self.messages.contains_key(key_path)
    }

    /// Number of messages
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether there are no messages
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Key paths, unordered
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.messages.keys().map(String::as_str)
    }

    /// Entries, unordered
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.messages.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Flatten a locale tree depth-first.
///
/// `{"a": {"b": "x"}, "c": "y"}` becomes `{"a.b": "x", "c": "y"}`. A tree with
/// no string leaves flattens to an empty table.
pub fn flatten(tree: &LocaleTree) -> FlatLocale {
    let mut messages = HashMap::new();
    flatten_into(tree, None, &mut messages);
    FlatLocale { messages }
}

fn flatten_into(tree: &LocaleTree, prefix: Option<&str>, out: &mut HashMap<String, String>) {
    for (key, value) in tree.iter() {
        let path = match prefix {
            Some(prefix) => format!("{prefix}.{key}"),
            None => key.to_string(),
        };
        match value {
            LocaleValue::Message(message) => {
                out.insert(path, message.clone());
            }
            LocaleValue::Nested(child) => flatten_into(child, Some(&path), out),
        }
    }
}
