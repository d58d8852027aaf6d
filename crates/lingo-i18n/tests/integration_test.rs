//! Integration tests for lingo-i18n crate.
//!
//! These tests drive the store the way an application does: build it from a
//! table, translate, switch languages and add locales.

use lingo_common::test_utils::init_test_logging;
use lingo_i18n::{locale_tree, t_args, Args, I18n, LocaleTable, LocaleTree};
use std::sync::Arc;

fn table(entries: Vec<(&str, LocaleTree)>) -> LocaleTable {
    entries.into_iter().collect()
}

#[test]
fn test_smoke() {
    init_test_logging();

    let i18n = I18n::new("en", table(vec![("en", locale_tree! { "name" => "CRIMX" })]));
    assert_eq!(i18n.lang(), "en");
    assert_eq!(i18n.t("name", None), "CRIMX");
    i18n.dispose();
}

#[test]
fn test_nested_message() {
    let i18n = I18n::new(
        "en",
        table(vec![("en", locale_tree! { "daily" => { "fruit" => { "stock" => "apple" } } })]),
    );
    assert_eq!(i18n.t("daily.fruit.stock", None), "apple");
    assert_eq!(i18n.t("daily.fruit", None), "daily.fruit");
}

#[tokio::test]
async fn test_translator_is_stable_across_switches() {
    init_test_logging();

    let i18n = I18n::new(
        "en",
        table(vec![
            ("en", locale_tree! { "apple" => "apple" }),
            ("zh", locale_tree! { "apple" => "苹果" }),
        ]),
    );

    let t = i18n.translator();
    assert_eq!(t.t("apple", None), "apple");

    i18n.switch_lang("zh").await.unwrap();

    assert!(Arc::ptr_eq(&t, &i18n.translator()));
    assert_eq!(t.t("apple", None), "苹果");
    assert_eq!(i18n.t("apple", None), "苹果");
}

#[tokio::test]
async fn test_add_locale() {
    let en = Arc::new(locale_tree! { "apple" => "apple" });
    let mut locales = LocaleTable::new();
    locales.insert("en", Arc::clone(&en));
    let i18n = I18n::new("en", locales);

    assert!(Arc::ptr_eq(&i18n.locale(), &en));
    assert_eq!(i18n.t("apple", None), "apple");

    let zh = Arc::new(locale_tree! { "apple" => "苹果" });
    i18n.add_locale("zh", Arc::clone(&zh));

    assert_eq!(i18n.lang(), "en");
    assert!(Arc::ptr_eq(&i18n.locale(), &en));
    assert_eq!(i18n.languages(), vec!["en", "zh"]);

    i18n.switch_lang("zh").await.unwrap();

    assert_eq!(i18n.lang(), "zh");
    assert!(Arc::ptr_eq(&i18n.locale(), &zh));
    assert_eq!(i18n.t("apple", None), "苹果");
}

#[test]
fn test_adding_other_language_keeps_flat_locale() {
    let i18n = I18n::new("en", table(vec![("en", locale_tree! { "apple" => "apple" })]));
    let flat = i18n.flat_locale();

    i18n.add_locale("zh", locale_tree! { "apple" => "苹果" });

    assert!(Arc::ptr_eq(&flat, &i18n.flat_locale()));
}

#[test]
fn test_set_locales_replaces_table() {
    let i18n = I18n::new("en", table(vec![("en", locale_tree! { "apple" => "apple" })]));

    i18n.set_locales(table(vec![("en", locale_tree! { "apple" => "Apple" })]));

    assert_eq!(i18n.t("apple", None), "Apple");
    assert_eq!(i18n.languages(), vec!["en"]);
}

#[test]
fn test_has_key() {
    let i18n = I18n::new(
        "en",
        table(vec![("en", locale_tree! {
            "apple" => "apple",
            "person" => { "name" => "CRIMX" },
            "pear@1" => "A pear",
        })]),
    );

    assert!(i18n.has_key("apple"));
    assert!(!i18n.has_key("name"));
    assert!(i18n.has_key("person.name"));
    assert!(!i18n.has_key("person"));
    assert!(!i18n.has_key("pear"));
    assert!(i18n.has_key("pear@1"));
}

#[test]
fn test_named_template() {
    let i18n = I18n::new("en", table(vec![("en", locale_tree! { "intro" => "{{name}} eats {{fruit}}" })]));
    let args = t_args!["name" => "CRIMX", "fruit" => "apple"];
    assert_eq!(i18n.t("intro", &args), "CRIMX eats apple");
}

#[test]
fn test_positional_template() {
    let i18n = I18n::new("en", table(vec![("en", locale_tree! { "intro" => "{{0}} eats {{1}}" })]));
    assert_eq!(i18n.t("intro", &t_args!["CRIMX", "apple"]), "CRIMX eats apple");
    assert_eq!(i18n.t("intro", &t_args!["CRIMX"]), "CRIMX eats {{1}}");
}

#[test]
fn test_modifier_message() {
    let i18n = I18n::new(
        "en",
        table(vec![("en", locale_tree! {
            "apple@few" => "Few apples",
            "apple@many" => "Many apples",
        })]),
    );
    let option = |n: u32| if n <= 5 { "few" } else { "many" };

    assert_eq!(i18n.t("apple", &t_args!["@" => option(1)]), "Few apples");
    assert_eq!(i18n.t("apple", &t_args!["@" => option(6)]), "Many apples");
}

#[test]
fn test_plural_message() {
    let i18n = I18n::new(
        "en",
        table(vec![("en", locale_tree! {
            "apple" => "{{@}} apples",
            "apple@0" => "No apple",
            "apple@1" => "An apple",
        })]),
    );

    assert_eq!(i18n.t("apple", &t_args!["@" => 0]), "No apple");
    assert_eq!(i18n.t("apple", &t_args!["@" => 1]), "An apple");
    assert_eq!(i18n.t("apple", &t_args!["@" => 3]), "3 apples");
    assert_eq!(i18n.t("apple", &Args::new().modifier(3.0)), "3 apples");
}

#[test]
fn test_modifier_without_variants() {
    let i18n = I18n::new("en", table(vec![("en", locale_tree! { "message" => "{{@}} world" })]));
    assert_eq!(i18n.t("message", &t_args!["@" => "hello"]), "hello world");
    assert_eq!(i18n.t("message", &t_args!["@" => "bye"]), "bye world");
}

#[test]
fn test_modifier_with_named_args() {
    let i18n = I18n::new(
        "en",
        table(vec![("en", locale_tree! {
            "apple" => "{{@}} apples in the {{place}}",
            "apple@0" => "No apple in the {{place}}",
            "apple@1" => "An apple in the {{place}}",
        })]),
    );

    let args = |n: i32| t_args!["@" => n, "place" => "house"];
    assert_eq!(i18n.t("apple", &args(0)), "No apple in the house");
    assert_eq!(i18n.t("apple", &args(1)), "An apple in the house");
    assert_eq!(i18n.t("apple", &args(3)), "3 apples in the house");
}

#[test]
fn test_missing_key_returns_key_path() {
    let i18n = I18n::new("en", LocaleTable::new());
    assert_eq!(i18n.t("fruit", None), "fruit");
    assert_eq!(i18n.t("fruit", &t_args!["fruit" => "apple"]), "fruit");
}

#[test]
fn test_empty_message_is_present() {
    let i18n = I18n::new("en", table(vec![("en", locale_tree! { "blank" => "" })]));
    assert!(i18n.has_key("blank"));
    assert_eq!(i18n.t("blank", None), "");
}

#[test]
fn test_dispose_releases_subscriptions() {
    let i18n = I18n::new("en", table(vec![("en", locale_tree! { "apple" => "apple" })]));
    assert!(i18n.subscription_count() > 0);

    i18n.dispose();

    assert_eq!(i18n.subscription_count(), 0);
    i18n.add_locale("en", locale_tree! { "apple" => "Apple" });
    assert_eq!(i18n.t("apple", None), "apple");
}

#[test]
fn test_translator_usable_from_threads() {
    let i18n = I18n::new("en", table(vec![("en", locale_tree! { "intro" => "{{0}} eats {{1}}" })]));
    let t = i18n.translator();

    let handles: Vec<_> = (0..4)
        .map(|n| {
            let t = Arc::clone(&t);
            std::thread::spawn(move || t.t("intro", &t_args![n, "apple"]))
        })
        .collect();

    for (n, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.join().unwrap(), format!("{n} eats apple"));
    }
    assert_eq!(i18n.translator().current().templates().len(), 1);
}
