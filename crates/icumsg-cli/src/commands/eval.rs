//! Implementation of the `icumsg eval` command.

use std::collections::HashMap;

use chrono::DateTime;
use icumsg::{MessageFormatter, Value};
use miette::{IntoDiagnostic, Report};
use serde::Serialize;

use crate::output::TemplateDiagnostic;

/// Arguments for the eval command.
#[derive(Debug, clap::Args)]
pub struct EvalArgs {
    /// Language tag for plural rules (e.g., en, de, pt-BR)
    #[arg(long, default_value = "en")]
    pub lang: String,

    /// Template string to render
    #[arg(long, required = true)]
    pub template: String,

    /// Parameters in name=value format (repeatable)
    #[arg(short = 'p', long = "param", value_parser = parse_key_val)]
    pub params: Vec<(String, String)>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output for eval results.
#[derive(Serialize)]
pub struct EvalResult {
    pub result: String,
}

/// JSON output for eval failures.
#[derive(Serialize)]
pub struct EvalFailure {
    pub error: String,
    pub line: usize,
    pub column: usize,
}

/// Parse a key=value parameter string.
fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid parameter format '{s}': expected name=value"))?;
    if key.is_empty() {
        return Err(format!("invalid parameter format '{s}': empty name"));
    }
    Ok((key.to_string(), value.to_string()))
}

/// Type a command-line parameter value.
///
/// Tries integer, float, boolean and RFC 3339 timestamp in that order and
/// falls back to a string.
pub fn infer_value(raw: &str) -> Value {
    if let Ok(n) = raw.parse::<i64>() {
        return Value::Integer(n);
    }
    if raw.chars().any(|c| c.is_ascii_digit())
        && let Ok(f) = raw.parse::<f64>()
        && f.is_finite()
    {
        return Value::Float(f);
    }
    match raw {
        "true" => return Value::Boolean(true),
        "false" => return Value::Boolean(false),
        _ => {}
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Value::Timestamp(timestamp);
    }
    Value::from(raw)
}

/// Run the eval command.
pub fn run_eval(args: EvalArgs) -> miette::Result<i32> {
    let params: HashMap<String, Value> = args
        .params
        .iter()
        .map(|(k, v)| (k.clone(), infer_value(v)))
        .collect();

    let formatter = MessageFormatter::builder().cache_templates(false).build();
    match formatter.format(&args.lang, &args.template, &params) {
        Ok(result) => {
            if args.json {
                let output = serde_json::to_string_pretty(&EvalResult { result }).into_diagnostic()?;
                println!("{output}");
            } else {
                println!("{result}");
            }
            Ok(exitcode::OK)
        }
        Err(e) => {
            if args.json {
                let (line, column) = e.position();
                let failure = EvalFailure {
                    error: e.to_string(),
                    line,
                    column,
                };
                eprintln!("{}", serde_json::to_string_pretty(&failure).into_diagnostic()?);
            } else {
                let diagnostic = TemplateDiagnostic::from_parse_error("template", &args.template, &e);
                eprintln!("{:?}", Report::new(diagnostic));
            }
            Ok(exitcode::DATAERR)
        }
    }
}
