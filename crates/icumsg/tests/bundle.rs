//! Tests for directory-backed bundles.

use std::fs::{self, File};
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use icumsg::params;
use icumsg::translate::{Bundle, LoadError, Resource, Translator};
use tempfile::TempDir;

fn write_resource(dir: &Path, tag: &str, content: &str) {
    fs::write(dir.join(format!("{tag}.toml")), content).unwrap();
}

/// Pin a file's modification time to `secs` after the epoch.
fn set_mtime(path: &Path, secs: u64) {
    let file = File::options().write(true).open(path).unwrap();
    file.set_modified(SystemTime::UNIX_EPOCH + Duration::from_secs(secs))
        .unwrap();
}

fn bundle(dir: &TempDir) -> Bundle {
    Bundle::builder().directory(dir.path()).build()
}

fn fixture() -> TempDir {
    let dir = TempDir::new().unwrap();
    write_resource(
        dir.path(),
        "en",
        r#"
[translations]
greeting = "Hello {name}!"
files = "{n, plural, one {# file} other {# files}}"
bye = "Goodbye!"
"#,
    );
    write_resource(
        dir.path(),
        "de",
        r#"
base = "en"

[translations]
greeting = "Hallo {name}!"
files = "{n, plural, one {# Datei} other {# Dateien}}"
"#,
    );
    dir
}

// =============================================================================
// Resources
// =============================================================================

#[test]
fn resource_parses_all_fields() {
    let resource = Resource::parse(
        r#"
tag = "de-CH"
base = "de"

[translations]
a = "A"
"#,
    )
    .unwrap();
    assert_eq!(resource.tag.as_deref(), Some("de-CH"));
    assert_eq!(resource.base.as_deref(), Some("de"));
    assert_eq!(resource.translations["a"], "A");
}

#[test]
fn resource_fields_are_optional() {
    let resource = Resource::parse("").unwrap();
    assert_eq!(resource, Resource::default());
}

#[test]
fn resource_rejects_unknown_fields() {
    assert!(Resource::parse("language = \"de\"").is_err());
    assert!(Resource::parse("translations = 5").is_err());
}

// =============================================================================
// Loading
// =============================================================================

#[test]
fn load_renders_with_file_language() {
    let dir = fixture();
    let bundle = bundle(&dir);
    let de = bundle.load("de").unwrap();
    assert_eq!(de.language(), "de");
    let p = params! { "name" => "Ada", "n" => 3 };
    assert_eq!(de.translate("greeting", &p), "Hallo Ada!");
    assert_eq!(de.translate("files", &p), "3 Dateien");
    assert_eq!(de.translate("bye", &p), "Goodbye!");
    assert_eq!(de.translate("missing", &p), "missing");
}

#[test]
fn tag_field_overrides_file_stem() {
    let dir = TempDir::new().unwrap();
    write_resource(dir.path(), "swiss", "tag = \"de-CH\"\n[translations]\na = \"A\"\n");
    let translator = bundle(&dir).load("swiss").unwrap();
    assert_eq!(translator.language(), "de-CH");
}

#[test]
fn missing_resource_is_io_error() {
    let dir = TempDir::new().unwrap();
    let err = bundle(&dir).load("fr").unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }));
    assert!(err.to_string().contains("fr.toml"));
}

#[test]
fn malformed_resource_is_decode_error() {
    let dir = TempDir::new().unwrap();
    write_resource(dir.path(), "en", "[translations\n");
    let err = bundle(&dir).load("en").unwrap_err();
    assert!(matches!(err, LoadError::Decode { .. }));
}

#[test]
fn missing_base_propagates() {
    let dir = TempDir::new().unwrap();
    write_resource(dir.path(), "de", "base = \"en\"\n");
    let err = bundle(&dir).load("de").unwrap_err();
    assert!(matches!(err, LoadError::Io { path, .. } if path.ends_with("en.toml")));
}

#[test]
fn cyclic_base_chain_is_rejected() {
    let dir = TempDir::new().unwrap();
    write_resource(dir.path(), "a", "base = \"b\"\n");
    write_resource(dir.path(), "b", "base = \"a\"\n");
    let err = bundle(&dir).load("a").unwrap_err();
    let LoadError::CyclicBase { chain } = &err else {
        panic!("expected cyclic base error, got {err:?}");
    };
    assert_eq!(chain, &["a", "b", "a"]);
    assert_eq!(err.to_string(), "cyclic base chain: a -> b -> a");
}

#[test]
fn self_referencing_base_is_rejected() {
    let dir = TempDir::new().unwrap();
    write_resource(dir.path(), "a", "base = \"a\"\n");
    let err = bundle(&dir).load("a").unwrap_err();
    assert!(matches!(err, LoadError::CyclicBase { chain } if chain == ["a", "a"]));
}

#[test]
fn tags_cannot_escape_the_directory() {
    let dir = fixture();
    let bundle = bundle(&dir);
    for tag in ["../en", "en/../de", "", "en.toml"] {
        let err = bundle.load(tag).unwrap_err();
        assert!(matches!(err, LoadError::InvalidTag { .. }), "tag {tag:?}");
    }
}

// =============================================================================
// Caching
// =============================================================================

#[test]
fn unchanged_resource_is_served_from_cache() {
    let dir = fixture();
    let bundle = bundle(&dir);
    let first = bundle.load("de").unwrap();
    let second = bundle.load("de").unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(bundle.cached_languages(), vec!["de", "en"]);
}

#[test]
fn reload_happens_only_when_mtime_changes() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("en.toml");
    write_resource(dir.path(), "en", "[translations]\nk = \"v1\"\n");
    set_mtime(&path, 1_000_000);

    let bundle = bundle(&dir);
    let p = params! {};
    assert_eq!(bundle.load("en").unwrap().translate("k", &p), "v1");

    write_resource(dir.path(), "en", "[translations]\nk = \"v2\"\n");
    set_mtime(&path, 1_000_000);
    assert_eq!(bundle.load("en").unwrap().translate("k", &p), "v1");

    set_mtime(&path, 2_000_000);
    assert_eq!(bundle.load("en").unwrap().translate("k", &p), "v2");
}

#[test]
fn base_change_invalidates_dependent_translator() {
    let dir = fixture();
    let en_path = dir.path().join("en.toml");
    set_mtime(&en_path, 1_000_000);

    let bundle = bundle(&dir);
    let p = params! {};
    assert_eq!(bundle.load("de").unwrap().translate("bye", &p), "Goodbye!");

    write_resource(dir.path(), "en", "[translations]\nbye = \"See you!\"\n");
    set_mtime(&en_path, 2_000_000);
    assert_eq!(bundle.load("de").unwrap().translate("bye", &p), "See you!");
}

#[test]
fn clear_cache_forgets_translators() {
    let dir = fixture();
    let bundle = bundle(&dir);
    let first = bundle.load("en").unwrap();
    bundle.clear_cache();
    assert!(bundle.cached_languages().is_empty());
    let second = bundle.load("en").unwrap();
    assert!(!Arc::ptr_eq(&first, &second));
}

// =============================================================================
// Lookup and negotiation
// =============================================================================

#[test]
fn unavailable_language_uses_noop_translator() {
    let dir = fixture();
    let translator = bundle(&dir).translator_for_language("fr");
    assert_eq!(translator.translate("greeting", &params! { "name" => "Ada" }), "greeting");
}

#[test]
fn accept_language_picks_first_loadable_range() {
    let dir = fixture();
    let bundle = bundle(&dir);
    let header = "fr, de-AT;q=0.9, en;q=0.5";
    assert_eq!(bundle.select_language(header).as_deref(), Some("de"));
    let translator = bundle.translator_for_accept_language(header);
    assert_eq!(translator.translate("greeting", &params! { "name" => "Ada" }), "Hallo Ada!");
}

#[test]
fn accept_language_honors_quality_order() {
    let dir = fixture();
    let bundle = bundle(&dir);
    assert_eq!(bundle.select_language("de;q=0.3, en;q=0.8").as_deref(), Some("en"));
}

#[test]
fn zero_quality_and_wildcard_are_skipped() {
    let dir = fixture();
    let bundle = bundle(&dir);
    assert_eq!(bundle.select_language("de;q=0, en;q=0.1").as_deref(), Some("en"));
    assert_eq!(bundle.select_language("*"), None);
}

#[test]
fn no_match_falls_back_to_default_language() {
    let dir = fixture();
    let bundle = Bundle::builder()
        .directory(dir.path())
        .default_language("de")
        .build();
    assert_eq!(bundle.default_language(), "de");
    assert_eq!(bundle.select_language("fr, it;q=0.5"), None);
    let translator = bundle.translator_for_accept_language("fr, it;q=0.5");
    assert_eq!(translator.translate("greeting", &params! { "name" => "Ada" }), "Hallo Ada!");
}

#[test]
fn available_languages_lists_toml_stems() {
    let dir = fixture();
    fs::write(dir.path().join("notes.txt"), "ignore me").unwrap();
    let bundle = bundle(&dir);
    assert_eq!(bundle.available_languages().unwrap(), vec!["de", "en"]);
    assert_eq!(bundle.resource_path("de"), dir.path().join("de.toml"));
    assert_eq!(bundle.directory(), dir.path());
}

#[test]
fn available_languages_of_missing_directory_is_error() {
    let bundle = Bundle::builder().directory("/nonexistent/icumsg/locales").build();
    assert!(matches!(bundle.available_languages(), Err(LoadError::Io { .. })));
}
