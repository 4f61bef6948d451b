//! Translators: key plus parameters to rendered text.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use bon::Builder;
use tracing::warn;

use crate::interpreter::MessageFormatter;
use crate::types::Value;

/// Looks up a message by key and renders it.
///
/// Translators never fail; a key that cannot be translated renders as the
/// key itself. Closures with the same signature are translators too.
///
/// ```
/// use std::collections::HashMap;
/// use icumsg::translate::Translator;
/// use icumsg::Value;
///
/// let upper = |key: &str, _: &HashMap<String, Value>| key.to_uppercase();
/// assert_eq!(upper.translate("hello", &HashMap::new()), "HELLO");
/// ```
pub trait Translator: Send + Sync {
    fn translate(&self, key: &str, params: &HashMap<String, Value>) -> String;
}

impl<F> Translator for F
where
    F: Fn(&str, &HashMap<String, Value>) -> String + Send + Sync,
{
    fn translate(&self, key: &str, params: &HashMap<String, Value>) -> String {
        self(key, params)
    }
}

/// A translator that returns every key unchanged.
///
/// Used wherever no resource could be loaded.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTranslator;

impl Translator for NoopTranslator {
    fn translate(&self, key: &str, _params: &HashMap<String, Value>) -> String {
        key.to_string()
    }
}

/// A translator with its own templates and an optional base translator.
///
/// A key is rendered from this translator's templates when present and
/// valid; otherwise the lookup walks to the base translator, and finally
/// returns the raw key.
///
/// # Example
///
/// ```
/// use std::collections::HashMap;
/// use std::sync::Arc;
/// use icumsg::translate::{HierarchicalTranslator, Translator};
/// use icumsg::params;
///
/// let en = HierarchicalTranslator::builder()
///     .language("en")
///     .translations(HashMap::from([
///         ("hello".to_string(), "Hello {name}!".to_string()),
///         ("bye".to_string(), "Goodbye!".to_string()),
///     ]))
///     .build();
/// let de = HierarchicalTranslator::builder()
///     .language("de")
///     .translations(HashMap::from([("hello".to_string(), "Hallo {name}!".to_string())]))
///     .base(Arc::new(en))
///     .build();
///
/// let p = params! { "name" => "Ada" };
/// assert_eq!(de.translate("hello", &p), "Hallo Ada!");
/// assert_eq!(de.translate("bye", &p), "Goodbye!");
/// assert_eq!(de.translate("missing", &p), "missing");
/// ```
#[derive(Builder)]
#[builder(on(String, into))]
pub struct HierarchicalTranslator {
    /// Language tag the templates are rendered for.
    #[builder(default = "en".to_string())]
    language: String,

    /// Templates keyed by message key.
    #[builder(default)]
    translations: HashMap<String, String>,

    /// Translator consulted when a key is missing or invalid here.
    base: Option<Arc<dyn Translator>>,

    /// Formatter used to parse and render templates.
    #[builder(default)]
    formatter: Arc<MessageFormatter>,
}

impl HierarchicalTranslator {
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Returns true if there is no base translator.
    pub fn is_root(&self) -> bool {
        self.base.is_none()
    }

    pub fn base(&self) -> Option<&Arc<dyn Translator>> {
        self.base.as_ref()
    }

    /// The raw template for a key, without consulting the base.
    pub fn template(&self, key: &str) -> Option<&str> {
        self.translations.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.translations.contains_key(key)
    }

    /// Keys with a template in this translator, sorted.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.translations.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    pub fn len(&self) -> usize {
        self.translations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.translations.is_empty()
    }
}

impl fmt::Debug for HierarchicalTranslator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HierarchicalTranslator")
            .field("language", &self.language)
            .field("translations", &self.translations)
            .field("has_base", &self.base.is_some())
            .finish_non_exhaustive()
    }
}

impl Translator for HierarchicalTranslator {
    fn translate(&self, key: &str, params: &HashMap<String, Value>) -> String {
        if let Some(template) = self.translations.get(key) {
            match self.formatter.format(&self.language, template, params) {
                Ok(text) => return text,
                Err(error) => {
                    warn!(
                        language = %self.language,
                        key,
                        %error,
                        "template failed to parse, falling back to base translator"
                    );
                }
            }
        }
        match &self.base {
            Some(base) => base.translate(key, params),
            None => key.to_string(),
        }
    }
}
