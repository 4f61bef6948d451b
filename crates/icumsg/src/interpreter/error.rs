//! Lint warning types and suggestion helpers.

use strsim::levenshtein;
use thiserror::Error;

/// A problem found by statically checking a parsed message.
///
/// Warnings never stop a message from rendering; they point at cases and
/// formatters that can never take effect.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LintWarning {
    /// A plural, selectordinal or select argument without an `other` case.
    #[error("'{key}' ({kind}) has no 'other' case; unmatched values render as empty text")]
    MissingOther { key: String, kind: &'static str },

    /// A plural or selectordinal selector that is neither `=N` nor a CLDR
    /// category name.
    #[error("'{key}' uses unknown plural selector '{selector}'{}", did_you_mean(suggestions))]
    UnknownSelector {
        key: String,
        selector: String,
        suggestions: Vec<String>,
    },

    /// A custom formatter that is not registered.
    #[error("'{key}' uses unregistered formatter '{formatter}'{}", did_you_mean(suggestions))]
    UnknownFormatter {
        key: String,
        formatter: String,
        suggestions: Vec<String>,
    },
}

impl LintWarning {
    /// The argument key the warning refers to.
    pub fn key(&self) -> &str {
        match self {
            LintWarning::MissingOther { key, .. }
            | LintWarning::UnknownSelector { key, .. }
            | LintWarning::UnknownFormatter { key, .. } => key,
        }
    }
}

fn did_you_mean(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        format!(", did you mean: {}?", suggestions.join(", "))
    }
}

/// Compute "did you mean" suggestions for a misspelled name.
///
/// Allows an edit distance of 1 for names of up to three characters and 2
/// otherwise. Returns at most three suggestions, closest first.
pub fn compute_suggestions<S: AsRef<str>>(key: &str, available: &[S]) -> Vec<String> {
    let max_distance = if key.chars().count() <= 3 { 1 } else { 2 };
    let mut candidates: Vec<(usize, &str)> = available
        .iter()
        .map(AsRef::as_ref)
        .map(|candidate| (levenshtein(key, candidate), candidate))
        .filter(|&(distance, _)| distance <= max_distance)
        .collect();
    candidates.sort_unstable();
    candidates.dedup();
    candidates
        .into_iter()
        .take(3)
        .map(|(_, candidate)| candidate.to_string())
        .collect()
}
