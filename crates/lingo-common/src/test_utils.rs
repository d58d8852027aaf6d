//! Test utilities and shared fixtures for the lingo workspace.
//!
//! Enabled for unit tests and, for other crates, behind the `testing` feature.

use std::sync::Once;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize test logging once per test run.
static INIT: Once = Once::new();

/// Initialize logging for tests with a sensible default configuration.
/// This function is safe to call multiple times and will only initialize once.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

        // Another harness may already own the global subscriber.
        let _ = fmt().with_test_writer().with_env_filter(filter).try_init();
    });
}

/// JSON locale fixtures mirroring a small application.
pub mod fixtures {
    /// English locale with nested and templated messages.
    pub const EN_JSON: &str = r#"{
  "stock": { "fruit": "apple" },
  "intro": "{{name}} eats {{fruit}}",
  "apple": "{{@}} apples",
  "apple@0": "No apple",
  "apple@1": "An apple"
}"#;

    /// Chinese locale with the same keys as [`EN_JSON`].
    pub const ZH_JSON: &str = r#"{
  "stock": { "fruit": "苹果" },
  "intro": "{{name}} 吃 {{fruit}}",
  "apple": "{{@}} 个苹果",
  "apple@0": "没有苹果",
  "apple@1": "一个苹果"
}"#;
}

/// Create a temporary locale directory holding `<lang>.json` files.
#[cfg(feature = "tempfile")]
pub fn create_locale_dir(files: &[(&str, &str)]) -> tempfile::TempDir {
    let dir = tempfile::tempdir().expect("Failed to create temporary directory");
    for (lang, contents) in files {
        std::fs::write(dir.path().join(format!("{lang}.json")), contents)
            .expect("Failed to write locale fixture");
    }
    dir
}

/// Create a temporary directory with the English and Chinese fixtures.
#[cfg(feature = "tempfile")]
pub fn create_sample_locale_dir() -> tempfile::TempDir {
    create_locale_dir(&[("en", fixtures::EN_JSON), ("zh", fixtures::ZH_JSON)])
}
