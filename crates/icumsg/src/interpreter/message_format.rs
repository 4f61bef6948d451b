//! Builder-configured facade over parsing, caching and rendering.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use bon::Builder;
use tracing::debug;

use crate::interpreter::context::{EvalContext, base_language};
use crate::interpreter::error::LintWarning;
use crate::interpreter::evaluator::eval_message;
use crate::interpreter::formatters::FormatterRegistry;
use crate::interpreter::lint::lint_message;
use crate::interpreter::plural::{CategoryResolver, PluralRuleTable};
use crate::parser::{Message, ParseError, parse_message};
use crate::types::Value;

/// Parses, caches and renders message templates.
///
/// A `MessageFormatter` owns the plural category resolver, the formatter
/// registry and a cache of parsed templates keyed by template text. Cached
/// messages are immutable and shared, so a formatter can be used from many
/// threads at once.
///
/// # Example
///
/// ```
/// use icumsg::{MessageFormatter, params};
///
/// let formatter = MessageFormatter::builder().build();
/// let text = formatter
///     .format("en", "{n, plural, one {# file} other {# files}}", &params! { "n" => 3 })
///     .unwrap();
/// assert_eq!(text, "3 files");
/// assert_eq!(formatter.cache_len(), 1);
/// ```
#[derive(Builder)]
pub struct MessageFormatter {
    /// Plural and ordinal category resolver.
    #[builder(default = default_rules())]
    rules: Arc<dyn CategoryResolver>,

    /// Formatters for custom arguments and overrides of built-in kinds.
    #[builder(default)]
    formatters: FormatterRegistry,

    /// Whether parsed templates are kept for reuse.
    #[builder(default = true)]
    cache_templates: bool,

    /// Parsed templates keyed by template text.
    #[builder(skip)]
    cache: RwLock<HashMap<String, Arc<Message>>>,
}

fn default_rules() -> Arc<dyn CategoryResolver> {
    Arc::new(PluralRuleTable::default())
}

impl Default for MessageFormatter {
    fn default() -> Self {
        MessageFormatter::builder().build()
    }
}

impl MessageFormatter {
    /// Create a formatter with the default rule table and no formatters.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rules(&self) -> &dyn CategoryResolver {
        self.rules.as_ref()
    }

    pub fn formatters(&self) -> &FormatterRegistry {
        &self.formatters
    }

    /// Get the formatter registry (mutable) for registering formatters.
    pub fn formatters_mut(&mut self) -> &mut FormatterRegistry {
        &mut self.formatters
    }

    /// Parse a template, reusing the cached AST when available.
    pub fn parse(&self, template: &str) -> Result<Arc<Message>, ParseError> {
        if !self.cache_templates {
            return parse_message(template).map(Arc::new);
        }

        let cached = self
            .cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(template)
            .cloned();
        if let Some(message) = cached {
            debug!(template, "template cache hit");
            return Ok(message);
        }

        debug!(template, "template cache miss");
        let message = Arc::new(parse_message(template)?);
        self.cache
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(template.to_string())
            .or_insert_with(|| Arc::clone(&message));
        Ok(message)
    }

    /// Render a parsed message for `language` with the given parameters.
    ///
    /// Each call gets its own evaluation context; `params` is never
    /// modified.
    pub fn render(
        &self,
        message: &Message,
        language: &str,
        params: &HashMap<String, Value>,
    ) -> String {
        let mut ctx = EvalContext::new(language, params);
        eval_message(message, &mut ctx, self.rules.as_ref(), &self.formatters)
    }

    /// Parse (or fetch from cache) and render a template.
    pub fn format(
        &self,
        language: &str,
        template: &str,
        params: &HashMap<String, Value>,
    ) -> Result<String, ParseError> {
        let message = self.parse(template)?;
        Ok(self.render(&message, language, params))
    }

    /// Run the static lint rules against this formatter's registry.
    pub fn lint(&self, message: &Message, language: &str) -> Vec<LintWarning> {
        lint_message(message, &self.formatters, &base_language(language))
    }

    /// Number of cached templates.
    pub fn cache_len(&self) -> usize {
        self.cache.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Drop all cached templates.
    pub fn clear_cache(&self) {
        self.cache
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}
