//! Evaluation context for a single render call.

use std::borrow::Cow;
use std::collections::HashMap;

use crate::types::Value;

/// Parameter names starting with this prefix configure the engine and are
/// not counted as message values.
pub const META_PREFIX: &str = "$";

/// Meta-parameter holding the `strftime` pattern used by `date` arguments.
pub const DATE_FORMAT_PARAM: &str = "$date-format";

/// Evaluation context carrying the language and parameter bindings of one
/// render call.
///
/// The caller's parameter map is borrowed and only copied the first time a
/// plural offset rebinds a value, so a context never mutates shared state.
/// Contexts are not meant to be shared between concurrent renders.
#[derive(Debug, Clone)]
pub struct EvalContext<'a> {
    language: String,
    params: Cow<'a, HashMap<String, Value>>,
}

impl<'a> EvalContext<'a> {
    /// Create a context for `language`, reduced to its base subtag.
    pub fn new(language: &str, params: &'a HashMap<String, Value>) -> Self {
        Self {
            language: base_language(language),
            params: Cow::Borrowed(params),
        }
    }

    /// The base language subtag, e.g. `en` for `en-US`.
    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn get_param(&self, name: &str) -> Option<&Value> {
        self.params.get(name)
    }

    pub fn params(&self) -> &HashMap<String, Value> {
        &self.params
    }

    /// The only non-meta value bound, if there is exactly one.
    pub fn single_value(&self) -> Option<&Value> {
        let mut values = self
            .params
            .iter()
            .filter(|(name, _)| !name.starts_with(META_PREFIX))
            .map(|(_, value)| value);
        let first = values.next()?;
        values.next().is_none().then_some(first)
    }

    /// The `strftime` pattern set through [`DATE_FORMAT_PARAM`], if any.
    pub fn date_format(&self) -> Option<&str> {
        self.params
            .get(DATE_FORMAT_PARAM)
            .and_then(Value::as_str)
            .filter(|pattern| !pattern.is_empty())
    }

    /// Bind `name` to `value`, returning the previous binding.
    ///
    /// Pair with [`EvalContext::restore`] to scope the binding.
    pub fn bind(&mut self, name: &str, value: Value) -> Option<Value> {
        self.params.to_mut().insert(name.to_string(), value)
    }

    /// Undo a [`EvalContext::bind`].
    pub fn restore(&mut self, name: &str, previous: Option<Value>) {
        let params = self.params.to_mut();
        match previous {
            Some(value) => {
                params.insert(name.to_string(), value);
            }
            None => {
                params.remove(name);
            }
        }
    }
}

/// Reduce a language tag to its lowercase base subtag (`pt-BR` -> `pt`).
pub fn base_language(tag: &str) -> String {
    tag.trim()
        .split(['-', '_'])
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase()
}
