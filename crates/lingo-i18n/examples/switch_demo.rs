//! Switches between bundled languages and prints a few messages.
//!
//! Logging follows the `[logging]` section of `lingo.toml` when the file
//! exists, defaults otherwise.
//!
//! ```sh
//! RUST_LOG=lingo_i18n=debug cargo run -p lingo-i18n --example switch_demo
//! ```

use anyhow::Result;
use lingo_common::init_logging;
use lingo_config::ConfigLoader;
use lingo_i18n::{locale_tree, t_args, I18n, MemoryFetcher};

#[tokio::main]
async fn main() -> Result<()> {
    let config = ConfigLoader::new("lingo.toml").load_or_default().await?;
    init_logging(&config.logging.to_logging_config())?;

    let fetcher = MemoryFetcher::default()
        .with_locale(
            "en",
            locale_tree! {
                "greeting" => "Hello, {{name}}!",
                "basket" => {
                    "apple" => "{{@}} apples in the {{place}}",
                    "apple@0" => "No apple in the {{place}}",
                    "apple@1" => "An apple in the {{place}}",
                },
            },
        )
        .with_locale(
            "zh",
            locale_tree! {
                "greeting" => "你好，{{name}}！",
                "basket" => {
                    "apple" => "{{place}}里有 {{@}} 个苹果",
                    "apple@0" => "{{place}}里没有苹果",
                },
            },
        );

    let i18n = I18n::preload("en", fetcher).await?;
    let t = i18n.translator();

    for lang in ["en", "zh"] {
        i18n.switch_lang(lang).await?;
        println!("[{}] {}", i18n.lang(), t.t("greeting", &t_args!["name" => "CRIMX"]));
        for count in [0, 1, 4] {
            let args = t_args!["@" => count, "place" => "house"];
            println!("[{}] {}", i18n.lang(), t.t("basket.apple", &args));
        }
    }

    println!("missing key: {}", t.t("basket.pear", None));
    i18n.dispose();
    Ok(())
}
