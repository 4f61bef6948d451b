//! Tree-walking evaluation of parsed messages.
//!
//! Evaluation never fails. Missing parameters, missing cases and values of
//! the wrong type render as empty output; only parsing reports errors.

use crate::interpreter::context::EvalContext;
use crate::interpreter::formatters::{
    FormatCall, FormatterRegistry, format_date, unregistered_custom,
};
use crate::interpreter::number::format_number;
use crate::interpreter::plural::{CategoryResolver, PluralKind};
use crate::parser::ast::{Cases, FormatKind, Message, Node};
use crate::types::Value;

/// Case selected when neither an exact nor a category selector matches.
pub const OTHER: &str = "other";

/// Evaluate a parsed message, producing the rendered string.
///
/// - Text and quoted text are copied to the output.
/// - Arguments read their value from `ctx` and render it through the
///   formatter registry, the built-in formatters, or case selection.
/// - Plural and ordinal cases rebind their key to the offset-adjusted count
///   while the chosen case renders; the binding is restored afterwards.
pub fn eval_message(
    message: &Message,
    ctx: &mut EvalContext<'_>,
    resolver: &dyn CategoryResolver,
    formatters: &FormatterRegistry,
) -> String {
    let mut output = String::new();
    render_into(message, ctx, resolver, formatters, &mut output);
    output
}

fn render_into(
    message: &Message,
    ctx: &mut EvalContext<'_>,
    resolver: &dyn CategoryResolver,
    formatters: &FormatterRegistry,
    output: &mut String,
) {
    for node in &message.nodes {
        match node {
            Node::Text(text) | Node::QuotedText(text) => output.push_str(text),
            Node::Hash => match ctx.single_value() {
                Some(value) => output.push_str(&value.to_string()),
                None => output.push('#'),
            },
            Node::Placeholder { key } => {
                if let Some(value) = ctx.get_param(key) {
                    output.push_str(&value.to_string());
                }
            }
            Node::Format { key, kind, style } => {
                output.push_str(&render_format(key, *kind, style, ctx, formatters));
            }
            Node::Custom {
                key,
                formatter,
                args,
            } => {
                output.push_str(&render_custom(key, formatter, args, ctx, formatters));
            }
            Node::Plural { key, offset, cases } => {
                let selected = select_plural(key, *offset, cases, PluralKind::Cardinal, ctx, resolver);
                render_plural_case(key, selected, ctx, resolver, formatters, output);
            }
            Node::SelectOrdinal { key, offset, cases } => {
                let selected = select_plural(key, *offset, cases, PluralKind::Ordinal, ctx, resolver);
                render_plural_case(key, selected, ctx, resolver, formatters, output);
            }
            Node::Select { key, cases } => {
                let Some(value) = ctx.get_param(key) else {
                    continue;
                };
                let selector = value.to_string();
                if let Some(body) = cases.get(&selector).or_else(|| cases.get(OTHER)) {
                    render_into(body, ctx, resolver, formatters, output);
                }
            }
        }
    }
}

fn render_format(
    key: &str,
    kind: FormatKind,
    style: &str,
    ctx: &EvalContext<'_>,
    formatters: &FormatterRegistry,
) -> String {
    let Some(value) = ctx.get_param(key) else {
        return String::new();
    };
    if let Some(formatter) = formatters.get(kind.name(), ctx.language()) {
        let call = FormatCall {
            language: ctx.language(),
            formatter: kind.name(),
            style,
            args: &[],
        };
        return formatter(value, &call);
    }
    match kind {
        FormatKind::Number => format_number(value, style),
        FormatKind::Date => format_date(value, ctx.date_format()),
        FormatKind::Time | FormatKind::Ordinal | FormatKind::Duration | FormatKind::Spellout => {
            value.to_string()
        }
    }
}

fn render_custom(
    key: &str,
    formatter: &str,
    args: &[String],
    ctx: &EvalContext<'_>,
    formatters: &FormatterRegistry,
) -> String {
    let Some(value) = ctx.get_param(key) else {
        return String::new();
    };
    let call = FormatCall {
        language: ctx.language(),
        formatter,
        style: "",
        args,
    };
    match formatters.get(formatter, ctx.language()) {
        Some(f) => f(value, &call),
        None => unregistered_custom(value, &call),
    }
}

/// A chosen plural case together with the offset-adjusted count.
struct SelectedCase<'m> {
    body: &'m Message,
    adjusted: i64,
    offset: i64,
}

/// Pick a case: exact `=n` first, then the category of `n - offset`, then
/// `other`.
fn select_plural<'m>(
    key: &str,
    offset: i64,
    cases: &'m Cases,
    kind: PluralKind,
    ctx: &EvalContext<'_>,
    resolver: &dyn CategoryResolver,
) -> Option<SelectedCase<'m>> {
    let n = ctx.get_param(key).and_then(Value::as_integer)?;
    let adjusted = n.saturating_sub(offset);
    let body = cases
        .get(&format!("={n}"))
        .or_else(|| {
            resolver
                .category(ctx.language(), kind, adjusted)
                .and_then(|category| cases.get(category.as_str()))
        })
        .or_else(|| cases.get(OTHER))?;
    Some(SelectedCase {
        body,
        adjusted,
        offset,
    })
}

fn render_plural_case(
    key: &str,
    selected: Option<SelectedCase<'_>>,
    ctx: &mut EvalContext<'_>,
    resolver: &dyn CategoryResolver,
    formatters: &FormatterRegistry,
    output: &mut String,
) {
    let Some(selected) = selected else {
        return;
    };
    if selected.offset == 0 {
        render_into(selected.body, ctx, resolver, formatters, output);
        return;
    }
    let previous = ctx.bind(key, Value::Integer(selected.adjusted));
    render_into(selected.body, ctx, resolver, formatters, output);
    ctx.restore(key, previous);
}
