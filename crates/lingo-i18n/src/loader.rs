//! Locale loading from a directory of JSON files

use crate::error::{I18nError, I18nResult};
use crate::fetcher::{FetchError, LocaleFetcher};
use crate::locale::LocaleTree;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

/// Loads `<base_dir>/<lang>.json` for each requested language.
#[derive(Debug, Clone)]
pub struct JsonDirFetcher {
    /// Base directory for locale resources
    base_dir: PathBuf,
}

impl JsonDirFetcher {
    /// Create a fetcher rooted at `base_dir`
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    /// Get the base directory for resources
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// File holding the locale of `lang`
    pub fn path_for(&self, lang: &str) -> I18nResult<PathBuf> {
        if lang.is_empty() || lang.contains(['/', '\\']) || lang.contains("..") {
            return Err(I18nError::InvalidLanguageId(lang.to_string()));
        }
        Ok(self.base_dir.join(format!("{lang}.json")))
    }

    /// Read and parse the locale of `lang`
    pub async fn load(&self, lang: &str) -> I18nResult<LocaleTree> {
        let path = self.path_for(lang)?;
        debug!("Loading locale file: {:?}", path);

        let content = tokio::fs::read_to_string(&path).await.map_err(|source| {
            warn!("Locale file could not be read: {:?}", path);
            I18nError::ResourceLoad {
                path: path.clone(),
                source,
            }
        })?;

        let tree = LocaleTree::from_json_str(&content).map_err(|source| {
            error!("Failed to parse locale '{}': {}", lang, source);
            I18nError::Parse {
                lang: lang.to_string(),
                source,
            }
        })?;

        info!("Successfully loaded locale: {}", lang);
        Ok(tree)
    }
}

impl Default for JsonDirFetcher {
    fn default() -> Self {
        Self::new(lingo_config::DEFAULT_LOCALES_DIR)
    }
}

#[async_trait]
impl LocaleFetcher for JsonDirFetcher {
    async fn fetch(&self, lang: &str) -> Result<LocaleTree, FetchError> {
        Ok(self.load(lang).await?)
    }
}
