//! Message evaluation engine.
//!
//! This module takes parsed messages and produces formatted strings. It
//! resolves plural categories, applies number and date patterns, dispatches
//! custom formatters, and lints messages for unreachable cases.

mod context;
mod error;
mod evaluator;
mod formatters;
mod lint;
mod message_format;
mod number;
mod plural;

pub use context::{DATE_FORMAT_PARAM, EvalContext, META_PREFIX, base_language};
pub use error::{LintWarning, compute_suggestions};
pub use evaluator::{OTHER, eval_message};
pub use formatters::{FormatCall, FormatterFn, FormatterRegistry, format_date, unregistered_custom};
pub use lint::lint_message;
pub use message_format::MessageFormatter;
pub use number::format_number;
pub use plural::{
    CategoryResolver, CldrRules, PluralCategory, PluralKind, PluralRuleFn, PluralRuleTable,
};
