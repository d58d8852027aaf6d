//! Key lookup against one flattened locale

use crate::args::Args;
use crate::flatten::FlatLocale;
use crate::template::Template;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Compiled templates for one [`FlatLocale`], keyed by the resolved key path.
///
/// A cache is born empty together with its [`Resolver`] and dies with it, so
/// it never outlives the table its templates were compiled from.
#[derive(Debug, Default)]
pub struct TemplateCache {
    templates: Mutex<HashMap<String, Arc<Template>>>,
}

impl TemplateCache {
    /// Cached template for `key`, compiling `source` on first use
    pub fn get_or_compile(&self, key: &str, source: &str) -> Arc<Template> {
        let mut templates = self.templates.lock();
        if let Some(template) = templates.get(key) {
            return Arc::clone(template);
        }
        let template = Arc::new(Template::compile(source));
        templates.insert(key.to_string(), Arc::clone(&template));
        template
    }

    /// Whether a template for `key` has been compiled
    pub fn contains(&self, key: &str) -> bool {
        self.templates.lock().contains_key(key)
    }

    /// Number of compiled templates
    pub fn len(&self) -> usize {
        self.templates.lock().len()
    }

    /// Whether nothing has been compiled yet
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Translation function over one flattened locale.
#[derive(Debug)]
pub struct Resolver {
    flat: Arc<FlatLocale>,
    templates: TemplateCache,
}

impl Resolver {
    /// Resolver with an empty template cache
    pub fn new(flat: Arc<FlatLocale>) -> Self {
        Self {
            flat,
            templates: TemplateCache::default(),
        }
    }

    /// The table this resolver reads
    pub fn flat_locale(&self) -> &Arc<FlatLocale> {
        &self.flat
    }

    /// Templates compiled so far
    pub fn templates(&self) -> &TemplateCache {
        &self.templates
    }

    /// Resolve `key_path`.
    ///
    /// With a modifier `m` in `args`, `key_path@m` is preferred when present.
    /// Without `args` the raw message is returned uninterpolated. Unknown keys
    /// resolve to `key_path` itself.
    pub fn resolve(&self, key_path: &str, args: Option<&Args>) -> String {
        let Some(args) = args else {
            return self.raw(key_path);
        };

        let modifier_key = args
            .modifier_value()
            .map(|modifier| format!("{key_path}@{modifier}"))
            .filter(|key| self.flat.contains_key(key));
        let key = modifier_key.as_deref().unwrap_or(key_path);

        match self.flat.get(key) {
            Some(message) => self.templates.get_or_compile(key, message).render(args),
            None => Self::missing(key_path),
        }
    }

    fn raw(&self, key_path: &str) -> String {
        self.flat
            .get(key_path)
            .map_or_else(|| Self::missing(key_path), str::to_string)
    }

    fn missing(key_path: &str) -> String {
        debug!(key = key_path, "Translation not found, returning key path");
        key_path.to_string()
    }
}
