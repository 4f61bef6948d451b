//! Tests for translators and translator chains.

use std::collections::HashMap;
use std::sync::Arc;

use icumsg::translate::{HierarchicalTranslator, NoopTranslator, Translator};
use icumsg::{MessageFormatter, Value, params};

fn translations(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

// =============================================================================
// Single translator
// =============================================================================

#[test]
fn renders_templates_by_key() {
    let translator = HierarchicalTranslator::builder()
        .translations(translations(&[("foo:bar", "Hello {foo}!"), ("zap", "{fizzle}")]))
        .build();

    assert_eq!(
        translator.translate("foo:bar", &params! { "foo" => "FOO" }),
        "Hello FOO!"
    );
    assert_eq!(translator.translate("zap", &params! { "fizzle" => "BAR" }), "BAR");
    assert_eq!(translator.translate("fizzle", &params! {}), "fizzle");
}

#[test]
fn default_language_is_english() {
    let translator = HierarchicalTranslator::builder().build();
    assert_eq!(translator.language(), "en");
    assert!(translator.is_root());
    assert!(translator.is_empty());
}

#[test]
fn plural_rules_follow_translator_language() {
    let template = "{n, plural, one {# Datei} other {# Dateien}}";
    let de = HierarchicalTranslator::builder()
        .language("de")
        .translations(translations(&[("files", template)]))
        .build();
    assert_eq!(de.translate("files", &params! { "n" => 1 }), "1 Datei");
    assert_eq!(de.translate("files", &params! { "n" => 4 }), "4 Dateien");
}

#[test]
fn accessors() {
    let translator = HierarchicalTranslator::builder()
        .language("fr")
        .translations(translations(&[("b", "B"), ("a", "A")]))
        .build();
    assert_eq!(translator.language(), "fr");
    assert_eq!(translator.keys(), vec!["a", "b"]);
    assert_eq!(translator.len(), 2);
    assert!(translator.contains("a"));
    assert!(!translator.contains("c"));
    assert_eq!(translator.template("b"), Some("B"));
    assert_eq!(translator.template("c"), None);
    assert!(translator.base().is_none());
}

// =============================================================================
// Chains
// =============================================================================

fn chain() -> HierarchicalTranslator {
    let root = HierarchicalTranslator::builder()
        .language("en")
        .translations(translations(&[
            ("hello", "Hello {name}!"),
            ("bye", "Goodbye!"),
            ("broken", "fallback {name}"),
        ]))
        .build();
    HierarchicalTranslator::builder()
        .language("de")
        .translations(translations(&[
            ("hello", "Hallo {name}!"),
            ("broken", "kaputt {name"),
        ]))
        .base(Arc::new(root))
        .build()
}

#[test]
fn own_template_wins() {
    assert_eq!(chain().translate("hello", &params! { "name" => "Ada" }), "Hallo Ada!");
}

#[test]
fn missing_key_walks_to_base() {
    let de = chain();
    assert!(!de.is_root());
    assert_eq!(de.translate("bye", &params! {}), "Goodbye!");
}

#[test]
fn invalid_template_walks_to_base() {
    assert_eq!(
        chain().translate("broken", &params! { "name" => "Ada" }),
        "fallback Ada"
    );
}

#[test]
fn key_missing_everywhere_is_returned_raw() {
    assert_eq!(chain().translate("nowhere", &params! {}), "nowhere");
}

#[test]
fn invalid_template_without_base_returns_key() {
    let translator = HierarchicalTranslator::builder()
        .translations(translations(&[("broken", "{oops")]))
        .build();
    assert_eq!(translator.translate("broken", &params! {}), "broken");
}

#[test]
fn three_level_chain() {
    let root = HierarchicalTranslator::builder()
        .translations(translations(&[("a", "root a"), ("b", "root b"), ("c", "root c")]))
        .build();
    let middle = HierarchicalTranslator::builder()
        .language("de")
        .translations(translations(&[("b", "middle b"), ("c", "middle c")]))
        .base(Arc::new(root))
        .build();
    let leaf = HierarchicalTranslator::builder()
        .language("de-CH")
        .translations(translations(&[("c", "leaf c")]))
        .base(Arc::new(middle))
        .build();
    let p = params! {};
    assert_eq!(leaf.translate("a", &p), "root a");
    assert_eq!(leaf.translate("b", &p), "middle b");
    assert_eq!(leaf.translate("c", &p), "leaf c");
}

// =============================================================================
// Other translators
// =============================================================================

#[test]
fn noop_translator_returns_key() {
    assert_eq!(NoopTranslator.translate("any.key", &params! { "x" => 1 }), "any.key");
}

#[test]
fn closures_are_translators() {
    let base = |key: &str, params: &HashMap<String, Value>| format!("<{key}:{}>", params.len());
    let translator = HierarchicalTranslator::builder()
        .base(Arc::new(base))
        .build();
    assert_eq!(translator.translate("k", &params! { "a" => 1 }), "<k:1>");
}

#[test]
fn translators_share_a_formatter_cache() {
    let formatter = Arc::new(MessageFormatter::new());
    let a = HierarchicalTranslator::builder()
        .translations(translations(&[("k", "same {x}")]))
        .formatter(Arc::clone(&formatter))
        .build();
    let b = HierarchicalTranslator::builder()
        .language("de")
        .translations(translations(&[("k", "same {x}")]))
        .formatter(Arc::clone(&formatter))
        .build();
    a.translate("k", &params! { "x" => 1 });
    b.translate("k", &params! { "x" => 2 });
    assert_eq!(formatter.cache_len(), 1);
}

#[test]
fn translator_objects_are_shareable() {
    let translators: Vec<Arc<dyn Translator>> = vec![Arc::new(NoopTranslator), Arc::new(chain())];
    let rendered: Vec<String> = translators
        .iter()
        .map(|t| t.translate("hello", &params! { "name" => "Ada" }))
        .collect();
    assert_eq!(rendered, vec!["hello", "Hallo Ada!"]);
}
