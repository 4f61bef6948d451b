//! Formatter registry for format arguments.
//!
//! Custom formatters (`{key, currency, EUR}`) are looked up here by name.
//! The registry is also consulted before the built-in kinds (`number`,
//! `date`, `time`, `ordinal`, `duration`, `spellout`), so real formatting can
//! replace the default rendering of any kind.

use std::collections::HashMap;
use std::fmt::Write;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, SecondsFormat};

use crate::types::Value;

/// Arguments passed to a formatter alongside the value.
#[derive(Debug, Clone, Copy)]
pub struct FormatCall<'a> {
    /// Base language subtag of the render call.
    pub language: &'a str,
    /// Formatter name as written in the template.
    pub formatter: &'a str,
    /// Style text of a built-in kind; empty for custom formatters.
    pub style: &'a str,
    /// Comma-separated arguments of a custom formatter.
    pub args: &'a [String],
}

/// Formatter function signature.
///
/// Formatters never fail: a value they cannot handle renders as whatever
/// fallback text the formatter chooses, usually the empty string.
pub type FormatterFn = fn(&Value, &FormatCall<'_>) -> String;

/// Registry for formatter functions.
///
/// Formatters are registered either for all languages or for one language;
/// language-specific formatters take precedence.
///
/// # Example
///
/// ```
/// use icumsg::interpreter::{FormatCall, FormatterRegistry};
/// use icumsg::Value;
///
/// fn shout(value: &Value, _call: &FormatCall<'_>) -> String {
///     value.to_string().to_uppercase()
/// }
///
/// let mut registry = FormatterRegistry::new();
/// registry.register("shout", shout);
/// assert!(registry.has_formatter("shout", "en"));
/// assert!(!registry.has_formatter("whisper", "en"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct FormatterRegistry {
    universal: HashMap<String, FormatterFn>,
    language_specific: HashMap<String, HashMap<String, FormatterFn>>,
}

impl FormatterRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a formatter for all languages, returning the one it replaces.
    pub fn register(&mut self, name: impl Into<String>, formatter: FormatterFn) -> Option<FormatterFn> {
        self.universal.insert(name.into(), formatter)
    }

    /// Register a formatter for a single base language.
    pub fn register_for_language(
        &mut self,
        language: impl Into<String>,
        name: impl Into<String>,
        formatter: FormatterFn,
    ) -> Option<FormatterFn> {
        self.language_specific
            .entry(language.into())
            .or_default()
            .insert(name.into(), formatter)
    }

    /// Get a formatter by name for a language.
    ///
    /// Checks language-specific formatters first, then falls back to
    /// universal ones.
    pub fn get(&self, name: &str, language: &str) -> Option<FormatterFn> {
        if let Some(f) = self
            .language_specific
            .get(language)
            .and_then(|formatters| formatters.get(name))
        {
            return Some(*f);
        }
        self.universal.get(name).copied()
    }

    pub fn has_formatter(&self, name: &str, language: &str) -> bool {
        self.get(name, language).is_some()
    }

    /// All registered formatter names, sorted and deduplicated.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .universal
            .keys()
            .chain(self.language_specific.values().flat_map(HashMap::keys))
            .map(String::as_str)
            .collect();
        names.sort_unstable();
        names.dedup();
        names
    }

    pub fn is_empty(&self) -> bool {
        self.universal.is_empty() && self.language_specific.is_empty()
    }
}

/// Render an unregistered custom formatter as `name(value,[arg1 arg2])`.
pub fn unregistered_custom(value: &Value, call: &FormatCall<'_>) -> String {
    format!("{}({value},[{}])", call.formatter, call.args.join(" "))
}

/// Format a timestamp with a `strftime` pattern.
///
/// Accepts [`Value::Timestamp`] and RFC 3339 strings; anything else renders
/// as the empty string. Without a pattern, or with an invalid one, the
/// timestamp renders as RFC 3339.
///
/// ```
/// use chrono::DateTime;
/// use icumsg::interpreter::format_date;
///
/// let t = DateTime::parse_from_rfc3339("2024-03-01T09:30:00Z").unwrap();
/// assert_eq!(format_date(&t.into(), Some("%d.%m.%Y")), "01.03.2024");
/// assert_eq!(format_date(&t.into(), None), "2024-03-01T09:30:00Z");
/// assert_eq!(format_date(&42.into(), None), "");
/// ```
pub fn format_date(value: &Value, pattern: Option<&str>) -> String {
    let timestamp = match value {
        Value::Timestamp(t) => *t,
        Value::String(s) => match DateTime::parse_from_rfc3339(s.trim()) {
            Ok(t) => t,
            Err(_) => return String::new(),
        },
        _ => return String::new(),
    };
    let rfc3339 = || timestamp.to_rfc3339_opts(SecondsFormat::AutoSi, true);

    let Some(pattern) = pattern else {
        return rfc3339();
    };
    let items: Vec<Item<'_>> = StrftimeItems::new(pattern).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return rfc3339();
    }
    let mut out = String::new();
    match write!(out, "{}", timestamp.format_with_items(items.iter())) {
        Ok(()) => out,
        Err(_) => rfc3339(),
    }
}
