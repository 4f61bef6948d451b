pub mod interpreter;
pub mod parser;
pub mod translate;
pub mod types;

use std::collections::HashMap;

pub use interpreter::{
    CategoryResolver, EvalContext, FormatterRegistry, LintWarning, MessageFormatter,
    PluralCategory, PluralKind, PluralRuleTable, compute_suggestions, eval_message,
};
pub use parser::{Message, ParseError, parse_message};
pub use translate::{Bundle, HierarchicalTranslator, LoadError, NoopTranslator, Translator};
pub use types::Value;

/// Parse and render a template in one step.
///
/// Uses the default plural rule table and no custom formatters. Nothing is
/// cached; use a [`MessageFormatter`] to render the same template repeatedly.
///
/// # Example
///
/// ```
/// use icumsg::{format_message, params};
///
/// let text = format_message(
///     "en",
///     "{n, selectordinal, one {#st} two {#nd} few {#rd} other {#th}} place",
///     &params! { "n" => 22 },
/// )
/// .unwrap();
/// assert_eq!(text, "22nd place");
/// ```
pub fn format_message(
    language: &str,
    template: &str,
    params: &HashMap<String, Value>,
) -> Result<String, ParseError> {
    let message = parse_message(template)?;
    let rules = PluralRuleTable::default();
    let mut ctx = EvalContext::new(language, params);
    Ok(eval_message(&message, &mut ctx, &rules, &FormatterRegistry::new()))
}

/// Creates a `HashMap<String, Value>` from key-value pairs.
///
/// Values are automatically converted via `Into<Value>`, so you can pass
/// integers, floats, strings, booleans or timestamps directly.
///
/// # Example
///
/// ```
/// use icumsg::{params, Value};
///
/// let p = params! { "count" => 3, "name" => "Alice" };
/// assert_eq!(p.len(), 2);
/// assert_eq!(p["count"].as_integer(), Some(3));
/// assert_eq!(p["name"].as_str(), Some("Alice"));
/// ```
#[macro_export]
macro_rules! params {
    {} => {
        ::std::collections::HashMap::<String, $crate::Value>::new()
    };
    { $($key:expr => $value:expr),+ $(,)? } => {
        {
            let mut map = ::std::collections::HashMap::<String, $crate::Value>::new();
            $(
                map.insert($key.to_string(), ::std::convert::Into::<$crate::Value>::into($value));
            )+
            map
        }
    };
}
