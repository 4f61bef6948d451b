//! Static lint rules for parsed messages.
//!
//! Analyzes the AST without evaluating it to find cases that can never be
//! selected and formatters that will only render their placeholder form.

use crate::interpreter::error::{LintWarning, compute_suggestions};
use crate::interpreter::evaluator::OTHER;
use crate::interpreter::formatters::FormatterRegistry;
use crate::interpreter::plural::PluralCategory;
use crate::parser::ast::{Cases, FormatKind, Message, Node};

/// Runs all lint rules over a message and its nested case bodies.
///
/// Custom formatter names are checked against `formatters` for `language`.
///
/// ```
/// use icumsg::interpreter::{FormatterRegistry, LintWarning, lint_message};
/// use icumsg::parser::parse_message;
///
/// let message = parse_message("{n, plural, one {# item} ohter {# items}}").unwrap();
/// let warnings = lint_message(&message, &FormatterRegistry::new(), "en");
/// assert!(matches!(&warnings[0], LintWarning::MissingOther { .. }));
/// assert!(matches!(
///     &warnings[1],
///     LintWarning::UnknownSelector { selector, suggestions, .. }
///         if selector == "ohter" && suggestions == &["other"]
/// ));
/// ```
pub fn lint_message(
    message: &Message,
    formatters: &FormatterRegistry,
    language: &str,
) -> Vec<LintWarning> {
    let mut warnings = Vec::new();
    lint_nodes(message, formatters, language, &mut warnings);
    warnings
}

fn lint_nodes(
    message: &Message,
    formatters: &FormatterRegistry,
    language: &str,
    warnings: &mut Vec<LintWarning>,
) {
    for node in &message.nodes {
        match node {
            Node::Plural { key, cases, .. } => {
                lint_missing_other(key, "plural", cases, warnings);
                lint_plural_selectors(key, cases, warnings);
            }
            Node::SelectOrdinal { key, cases, .. } => {
                lint_missing_other(key, "selectordinal", cases, warnings);
                lint_plural_selectors(key, cases, warnings);
            }
            Node::Select { key, cases } => {
                lint_missing_other(key, "select", cases, warnings);
            }
            Node::Custom { key, formatter, .. } => {
                lint_unknown_formatter(key, formatter, formatters, language, warnings);
            }
            Node::Text(_)
            | Node::QuotedText(_)
            | Node::Hash
            | Node::Placeholder { .. }
            | Node::Format { .. } => {}
        }

        if let Node::Plural { cases, .. }
        | Node::SelectOrdinal { cases, .. }
        | Node::Select { cases, .. } = node
        {
            for (_, body) in cases.iter() {
                lint_nodes(body, formatters, language, warnings);
            }
        }
    }
}

fn lint_missing_other(
    key: &str,
    kind: &'static str,
    cases: &Cases,
    warnings: &mut Vec<LintWarning>,
) {
    if !cases.contains(OTHER) {
        warnings.push(LintWarning::MissingOther {
            key: key.to_string(),
            kind,
        });
    }
}

/// Selectors of plural arguments are `=N` or category names; any other word
/// is unreachable.
fn lint_plural_selectors(key: &str, cases: &Cases, warnings: &mut Vec<LintWarning>) {
    let categories: Vec<&str> = PluralCategory::ALL.into_iter().map(PluralCategory::as_str).collect();
    for selector in cases.selectors() {
        if selector.starts_with('=') || PluralCategory::from_name(selector).is_some() {
            continue;
        }
        warnings.push(LintWarning::UnknownSelector {
            key: key.to_string(),
            selector: selector.to_string(),
            suggestions: compute_suggestions(selector, &categories),
        });
    }
}

/// Detects custom formatters with no registration, which render as
/// `name(value,[args])`. Typos of built-in kinds are suggested too.
fn lint_unknown_formatter(
    key: &str,
    formatter: &str,
    formatters: &FormatterRegistry,
    language: &str,
    warnings: &mut Vec<LintWarning>,
) {
    if formatters.has_formatter(formatter, language) {
        return;
    }
    let builtin = BUILTIN_KINDS.map(FormatKind::name);
    let mut known = formatters.names();
    known.extend_from_slice(&builtin);
    known.extend_from_slice(&["plural", "selectordinal", "select"]);
    warnings.push(LintWarning::UnknownFormatter {
        key: key.to_string(),
        formatter: formatter.to_string(),
        suggestions: compute_suggestions(formatter, &known),
    });
}

const BUILTIN_KINDS: [FormatKind; 6] = [
    FormatKind::Number,
    FormatKind::Date,
    FormatKind::Time,
    FormatKind::Ordinal,
    FormatKind::Duration,
    FormatKind::Spellout,
];
