//! Integration tests for the message lexer.

use icumsg::parser::{Lexer, TokenKind, tokenize};
use insta::assert_snapshot;

fn render(input: &str) -> String {
    tokenize(input)
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

// =============================================================================
// Message text
// =============================================================================

#[test]
fn empty_input_is_a_single_eof() {
    assert_snapshot!(render(""), @"EOF");
}

#[test]
fn plain_text_is_one_token() {
    assert_snapshot!(render("Hello, world!"), @r#"Text("Hello, world!") EOF"#);
}

#[test]
fn placeholder_splits_text() {
    assert_snapshot!(
        render("Hello {name}!"),
        @r#"Text("Hello ") StartAction Identifier(name) EndAction Text("!") EOF"#
    );
}

#[test]
fn whitespace_inside_argument_is_space() {
    assert_snapshot!(
        render("{ name }"),
        @"StartAction Space Identifier(name) Space EndAction EOF"
    );
}

#[test]
fn hash_in_text_is_its_own_token() {
    assert_snapshot!(render("Value # here"), @r#"Text("Value ") Hash Text(" here") EOF"#);
}

#[test]
fn hash_inside_argument_is_identifier_text() {
    assert_snapshot!(render("{a#b}"), @"StartAction Identifier(a#b) EndAction EOF");
}

// =============================================================================
// Brace depth parity
// =============================================================================

#[test]
fn case_bodies_switch_back_to_message_mode() {
    assert_snapshot!(
        render("{n, plural, one {# item} other {# items}}"),
        @r#"StartAction Identifier(n) Delimiter Space Identifier(plural) Delimiter Space Identifier(one) Space StartMessage Hash Text(" item") EndMessage Space Identifier(other) Space StartMessage Hash Text(" items") EndMessage EndAction EOF"#
    );
}

#[test]
fn nested_argument_inside_case_body() {
    assert_snapshot!(
        render("{g, select, male {{name} he}}"),
        @r#"StartAction Identifier(g) Delimiter Space Identifier(select) Delimiter Space Identifier(male) Space StartMessage StartAction Identifier(name) EndAction Text(" he") EndMessage EndAction EOF"#
    );
}

#[test]
fn whitespace_in_case_body_is_preserved_text() {
    let tokens = tokenize("{n, plural, other {  a \n b\t}}");
    let text: Vec<&str> = tokens
        .iter()
        .filter(|t| t.kind == TokenKind::Text)
        .map(|t| t.text.as_str())
        .collect();
    assert_eq!(text, vec!["  a \n b\t"]);
}

#[test]
fn depth_tracks_open_braces() {
    let mut lexer = Lexer::new("{g, select, a {x}}");
    assert_eq!(lexer.depth(), 0);
    let first = lexer.next().unwrap();
    assert_eq!(first.kind, TokenKind::StartAction);
    assert_eq!(lexer.depth(), 1);
    let kinds: Vec<TokenKind> = lexer.by_ref().map(|t| t.kind).collect();
    assert!(kinds.contains(&TokenKind::StartMessage));
    assert_eq!(kinds.last(), Some(&TokenKind::Eof));
    assert_eq!(lexer.depth(), 0);
}

#[test]
fn tokens_record_byte_offsets() {
    let offsets: Vec<usize> = tokenize("ab{c}").iter().map(|t| t.offset).collect();
    assert_eq!(offsets, vec![0, 2, 3, 4, 5]);
}

// =============================================================================
// Quoting
// =============================================================================

#[test]
fn quoted_braces_are_one_quoted_token() {
    assert_snapshot!(
        render("Use '{foo}' literally."),
        @r#"Text("Use ") QuotedText("{foo}") Text(" literally.") EOF"#
    );
}

#[test]
fn apostrophe_before_letter_is_plain_text() {
    assert_snapshot!(render("It's here"), @r#"Text("It's here") EOF"#);
}

#[test]
fn doubled_apostrophe_is_one_literal_quote() {
    assert_snapshot!(render("a''b"), @r#"Text("a") QuotedText("'") Text("b") EOF"#);
}

#[test]
fn tripled_apostrophe_is_one_literal_quote() {
    assert_snapshot!(render("'''"), @r#"QuotedText("'") EOF"#);
}

#[test]
fn doubled_apostrophe_inside_quoted_span() {
    assert_snapshot!(render("'{isn''t}'"), @r#"QuotedText("{isn't}") EOF"#);
}

#[test]
fn quoted_closing_brace() {
    assert_snapshot!(render("a '}' b"), @r#"Text("a ") QuotedText("}") Text(" b") EOF"#);
}

// =============================================================================
// Errors
// =============================================================================

#[test]
fn unmatched_closing_brace() {
    assert_snapshot!(render("Hello }"), @r#"Text("Hello ") Error(unmatched '}')"#);
}

#[test]
fn unterminated_argument() {
    assert_snapshot!(
        render("{name"),
        @"StartAction Identifier(name) Error(unterminated argument: missing '}')"
    );
}

#[test]
fn unterminated_case_body() {
    let tokens = tokenize("{n, select, a {x");
    let last = tokens.last().unwrap();
    assert_eq!(last.kind, TokenKind::Error);
    assert_eq!(last.text, "unterminated message: missing '}'");
}

#[test]
fn unterminated_quoted_span() {
    assert_snapshot!(render("'{oops"), @"Error(unterminated quoted text)");
}

#[test]
fn lexer_is_fused_after_terminal_token() {
    let mut lexer = Lexer::new("}");
    assert_eq!(lexer.next().map(|t| t.kind), Some(TokenKind::Error));
    assert!(lexer.next().is_none());
    assert!(lexer.next().is_none());
}

#[test]
fn exactly_one_terminal_token() {
    for input in ["", "abc", "{a}", "{", "}", "'{", "{a, plural, one {x}}"] {
        let tokens = tokenize(input);
        let terminals = tokens.iter().filter(|t| t.is_terminal()).count();
        assert_eq!(terminals, 1, "input {input:?}");
        assert!(tokens.last().unwrap().is_terminal(), "input {input:?}");
    }
}
