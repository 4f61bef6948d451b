//! Numeric style patterns for `number` arguments.
//!
//! Three pattern families are accepted in the style slot of
//! `{key, number, style}`:
//!
//! - printf-style directives: `%d`, `%.2f`, `%5.1f`, `%e`, `%v`, with `%%`
//!   for a literal percent sign and free text around the directives
//!   (`%.1f km`);
//! - ICU decimal patterns: `#,##0.00`, `0.###`, `#,##0%`;
//! - the keywords `integer` and `percent`.
//!
//! A style that matches none of these renders the value's default form, as
//! does a directive whose width or precision exceeds 64.

use winnow::ascii::digit1;
use winnow::combinator::{alt, opt, preceded, repeat};
use winnow::prelude::*;
use winnow::token::take_while;

use crate::types::Value;

/// Format a numeric value with a style pattern.
///
/// Returns an empty string for non-numeric values, and the default form for
/// an empty or unrecognized style.
///
/// ```
/// use icumsg::interpreter::format_number;
///
/// assert_eq!(format_number(&5.5.into(), "%.0f"), "6");
/// assert_eq!(format_number(&1234567.into(), "#,##0.00"), "1,234,567.00");
/// assert_eq!(format_number(&"five".into(), "%d"), "");
/// ```
pub fn format_number(value: &Value, style: &str) -> String {
    let Some(number) = Number::from_value(value) else {
        return String::new();
    };
    match NumberStyle::parse(style) {
        Some(style) => style.apply(number, value),
        None => value.to_string(),
    }
}

/// A numeric reading of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq)]
enum Number {
    Integer(i64),
    Float(f64),
}

impl Number {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Integer(n) => Some(Number::Integer(*n)),
            Value::Float(f) => Some(Number::Float(*f)),
            _ => None,
        }
    }

    fn as_f64(self) -> f64 {
        match self {
            Number::Integer(n) => n as f64,
            Number::Float(f) => f,
        }
    }

    fn rounded(self) -> i64 {
        match self {
            Number::Integer(n) => n,
            Number::Float(f) => f.round() as i64,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum NumberStyle {
    Default,
    Printf(Vec<PrintfPiece>),
    Decimal(DecimalPattern),
}

impl NumberStyle {
    fn parse(style: &str) -> Option<Self> {
        match style.trim() {
            "" => Some(NumberStyle::Default),
            "integer" => decimal_pattern.parse("#,##0").ok().map(NumberStyle::Decimal),
            "percent" => decimal_pattern.parse("#,##0%").ok().map(NumberStyle::Decimal),
            style => {
                if let Ok(pattern) = decimal_pattern.parse(style) {
                    return Some(NumberStyle::Decimal(pattern));
                }
                let pieces = printf_pieces.parse(style).ok()?;
                pieces
                    .iter()
                    .any(|piece| matches!(piece, PrintfPiece::Directive(_)))
                    .then_some(NumberStyle::Printf(pieces))
            }
        }
    }

    fn apply(&self, number: Number, value: &Value) -> String {
        match self {
            NumberStyle::Default => value.to_string(),
            NumberStyle::Decimal(pattern) => pattern.apply(number.as_f64()),
            NumberStyle::Printf(pieces) => pieces
                .iter()
                .map(|piece| match piece {
                    PrintfPiece::Literal(text) => text.clone(),
                    PrintfPiece::Directive(directive) => directive.apply(number, value),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum PrintfPiece {
    Literal(String),
    Directive(Directive),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Verb {
    Integer,
    Fixed,
    Exponent,
    Default,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Directive {
    left_align: bool,
    zero_pad: bool,
    plus_sign: bool,
    width: usize,
    precision: Option<usize>,
    verb: Verb,
}

impl Directive {
    fn apply(&self, number: Number, value: &Value) -> String {
        let (negative, body) = match self.verb {
            Verb::Integer => {
                let n = number.rounded();
                (n < 0, n.unsigned_abs().to_string())
            }
            Verb::Fixed => {
                let x = number.as_f64();
                (x < 0.0, format!("{:.*}", self.precision.unwrap_or(6), x.abs()))
            }
            Verb::Exponent => {
                let x = number.as_f64();
                (x < 0.0, exponent(x.abs(), self.precision.unwrap_or(6)))
            }
            Verb::Default => return self.pad(String::new(), value.to_string()),
        };
        let sign = if negative {
            "-"
        } else if self.plus_sign {
            "+"
        } else {
            ""
        };
        self.pad(sign.to_string(), body)
    }

    fn pad(&self, sign: String, body: String) -> String {
        let len = sign.chars().count() + body.chars().count();
        let fill = self.width.saturating_sub(len);
        if fill == 0 {
            return sign + &body;
        }
        if self.left_align {
            format!("{sign}{body}{}", " ".repeat(fill))
        } else if self.zero_pad && self.verb != Verb::Default {
            format!("{sign}{}{body}", "0".repeat(fill))
        } else {
            format!("{}{sign}{body}", " ".repeat(fill))
        }
    }
}

/// Render `x` as `d.ddde+XX`.
fn exponent(x: f64, precision: usize) -> String {
    let rendered = format!("{x:.precision$e}");
    let Some((mantissa, exp)) = rendered.split_once('e') else {
        return rendered;
    };
    let Ok(exp) = exp.parse::<i32>() else {
        return rendered;
    };
    let sign = if exp < 0 { '-' } else { '+' };
    format!("{mantissa}e{sign}{:02}", exp.unsigned_abs())
}

/// An ICU decimal pattern such as `#,##0.00`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DecimalPattern {
    grouping: usize,
    min_integer: usize,
    min_fraction: usize,
    max_fraction: usize,
    percent: bool,
}

impl DecimalPattern {
    fn apply(&self, x: f64) -> String {
        if !x.is_finite() {
            return x.to_string();
        }
        let x = if self.percent { x * 100.0 } else { x };
        let fixed = format!("{:.*}", self.max_fraction, x.abs());
        let (integer, fraction) = fixed.split_once('.').unwrap_or((&fixed, ""));

        let keep = fraction.trim_end_matches('0').len().max(self.min_fraction);
        let fraction = fraction.get(..keep).unwrap_or(fraction);

        let mut digits = integer.trim_start_matches('0').to_string();
        if digits.len() < self.min_integer {
            digits.insert_str(0, &"0".repeat(self.min_integer - digits.len()));
        }
        if digits.is_empty() && fraction.is_empty() {
            digits.push('0');
        }

        let is_zero = digits.chars().chain(fraction.chars()).all(|c| c == '0');
        let mut out = String::new();
        if x < 0.0 && !is_zero {
            out.push('-');
        }
        out.push_str(&group_digits(&digits, self.grouping));
        if !fraction.is_empty() {
            out.push('.');
            out.push_str(fraction);
        }
        if self.percent {
            out.push('%');
        }
        out
    }
}

fn group_digits(digits: &str, size: usize) -> String {
    if size == 0 || digits.len() <= size {
        return digits.to_string();
    }
    let len = digits.len();
    let mut out = String::with_capacity(len * 2);
    for (i, c) in digits.char_indices() {
        if i > 0 && (len - i) % size == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

// =============================================================================
// Pattern grammar
// =============================================================================

fn decimal_pattern(input: &mut &str) -> ModalResult<DecimalPattern> {
    let integer: &str = take_while(1.., ['#', ',', '0']).parse_next(input)?;
    let fraction: Option<&str> =
        opt(preceded('.', take_while(1.., ['0', '#']))).parse_next(input)?;
    let percent = opt('%').parse_next(input)?.is_some();

    let grouping = integer
        .rfind(',')
        .map_or(0, |pos| integer.len() - pos - 1);
    let fraction = fraction.unwrap_or_default();
    Ok(DecimalPattern {
        grouping,
        min_integer: integer.chars().filter(|&c| c == '0').count(),
        min_fraction: fraction.chars().filter(|&c| c == '0').count(),
        max_fraction: fraction.len(),
        percent,
    })
}

fn printf_pieces(input: &mut &str) -> ModalResult<Vec<PrintfPiece>> {
    repeat(
        1..,
        alt((
            "%%".map(|_| PrintfPiece::Literal("%".to_string())),
            directive.map(PrintfPiece::Directive),
            take_while(1.., |c| c != '%').map(|s: &str| PrintfPiece::Literal(s.to_string())),
        )),
    )
    .parse_next(input)
}

fn directive(input: &mut &str) -> ModalResult<Directive> {
    '%'.parse_next(input)?;
    let flags: &str = take_while(0.., ['-', '0', '+']).parse_next(input)?;
    let width = opt(count).parse_next(input)?;
    let precision = opt(preceded('.', count)).parse_next(input)?;
    let verb = alt((
        'd'.value(Verb::Integer),
        'f'.value(Verb::Fixed),
        'e'.value(Verb::Exponent),
        alt(('v', 's', 'g')).value(Verb::Default),
    ))
    .parse_next(input)?;
    Ok(Directive {
        left_align: flags.contains('-'),
        zero_pad: flags.contains('0'),
        plus_sign: flags.contains('+'),
        width: width.unwrap_or(0),
        precision,
        verb,
    })
}

/// Largest width or precision a directive may request.
const MAX_FIELD: usize = 64;

fn count(input: &mut &str) -> ModalResult<usize> {
    digit1
        .try_map(str::parse::<usize>)
        .verify(|n: &usize| *n <= MAX_FIELD)
        .parse_next(input)
}
