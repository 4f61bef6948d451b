//! Tests for `Accept-Language` parsing and negotiation.

use icumsg::translate::{LanguageRange, negotiate, parse_accept_language, preferred_language};

fn tags(header: &str) -> Vec<String> {
    parse_accept_language(header)
        .into_iter()
        .map(|range| range.tag)
        .collect()
}

// =============================================================================
// Parsing
// =============================================================================

#[test]
fn quality_defaults_to_one() {
    assert_eq!(
        parse_accept_language("de"),
        vec![LanguageRange::new("de", 1.0)]
    );
}

#[test]
fn ranges_sorted_by_descending_quality() {
    assert_eq!(
        parse_accept_language("en;q=0.5, de-CH, de;q=0.9"),
        vec![
            LanguageRange::new("de-CH", 1.0),
            LanguageRange::new("de", 0.9),
            LanguageRange::new("en", 0.5),
        ]
    );
}

#[test]
fn equal_quality_keeps_header_order() {
    assert_eq!(tags("fr;q=0.8, de;q=0.8, en;q=0.8, it"), vec!["it", "fr", "de", "en"]);
}

#[test]
fn whitespace_around_parts_is_ignored() {
    assert_eq!(
        parse_accept_language("  fr ; q = 0.4 ,en  "),
        vec![LanguageRange::new("en", 1.0), LanguageRange::new("fr", 0.4)]
    );
}

#[test]
fn invalid_quality_entries_are_dropped() {
    assert_eq!(tags("a;q=oops, b;q=1.5, c;q=-0.1, d;q=NaN, e;q=inf, f;q=0.3"), vec!["f"]);
}

#[test]
fn entries_without_a_tag_are_dropped() {
    assert_eq!(tags(",, ;q=0.5, en"), vec!["en"]);
}

#[test]
fn parameters_without_value_are_ignored() {
    assert_eq!(
        parse_accept_language("en;level, de;garbage;q=0.5"),
        vec![LanguageRange::new("en", 1.0), LanguageRange::new("de", 0.5)]
    );
}

#[test]
fn empty_header_has_no_ranges() {
    assert!(parse_accept_language("").is_empty());
    assert_eq!(preferred_language(""), None);
}

#[test]
fn other_parameters_are_ignored() {
    assert_eq!(
        parse_accept_language("de;level=1;q=0.7"),
        vec![LanguageRange::new("de", 0.7)]
    );
}

#[test]
fn zero_quality_is_kept_in_parse_output() {
    assert_eq!(tags("de;q=0, en"), vec!["en", "de"]);
}

#[test]
fn wildcard_range() {
    let ranges = parse_accept_language("*;q=0.1");
    assert!(ranges[0].is_wildcard());
    assert!(!LanguageRange::new("en", 1.0).is_wildcard());
}

#[test]
fn preferred_language_is_highest_quality() {
    assert_eq!(
        preferred_language("en;q=0.2, pt-BR;q=0.9").as_deref(),
        Some("pt-BR")
    );
}

// =============================================================================
// Negotiation
// =============================================================================

#[test]
fn negotiate_exact_match_first() {
    let available = ["en", "de", "de-CH"];
    assert_eq!(negotiate("de-CH, de;q=0.9", &available).as_deref(), Some("de-CH"));
}

#[test]
fn negotiate_falls_back_to_base_subtag() {
    let available = ["en", "de"];
    assert_eq!(negotiate("de-AT", &available).as_deref(), Some("de"));
}

#[test]
fn negotiate_is_case_insensitive() {
    let available = vec!["pt-BR".to_string()];
    assert_eq!(negotiate("PT-br", &available).as_deref(), Some("pt-BR"));
}

#[test]
fn negotiate_skips_zero_quality_and_wildcard() {
    let available = ["en", "de"];
    assert_eq!(negotiate("de;q=0, *, en;q=0.1", &available).as_deref(), Some("en"));
    assert_eq!(negotiate("*", &available), None);
}

#[test]
fn negotiate_without_match() {
    let available: [&str; 0] = [];
    assert_eq!(negotiate("en", &available), None);
    assert_eq!(negotiate("fr", &["en"]), None);
}
