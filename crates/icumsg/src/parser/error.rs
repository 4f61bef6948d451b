//! Parse error types for message templates.

use thiserror::Error;

/// An error that occurred while lexing or parsing a template.
///
/// Positions are 1-based; columns count characters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Malformed quoting or unbalanced braces found by the lexer.
    #[error("lex error at {line}:{column}: {message}")]
    Lex {
        line: usize,
        column: usize,
        message: String,
    },

    /// A grammar violation.
    #[error("syntax error at {line}:{column}: {message}")]
    Syntax {
        line: usize,
        column: usize,
        message: String,
    },

    /// Input ended inside a construct.
    #[error("unexpected end of input at {line}:{column}")]
    UnexpectedEof { line: usize, column: usize },
}

impl ParseError {
    /// The `(line, column)` the error points at.
    pub fn position(&self) -> (usize, usize) {
        match self {
            ParseError::Lex { line, column, .. }
            | ParseError::Syntax { line, column, .. }
            | ParseError::UnexpectedEof { line, column } => (*line, *column),
        }
    }

    /// The error description without position information.
    pub fn message(&self) -> &str {
        match self {
            ParseError::Lex { message, .. } | ParseError::Syntax { message, .. } => message,
            ParseError::UnexpectedEof { .. } => "unexpected end of input",
        }
    }
}

/// Calculate line and column of a byte offset within `input`.
pub(crate) fn calculate_position(input: &str, offset: usize) -> (usize, usize) {
    let offset = offset.min(input.len());
    let consumed = input.get(..offset).unwrap_or(input);
    let line = consumed.chars().filter(|&c| c == '\n').count() + 1;
    let line_start = consumed.rfind('\n').map_or(0, |pos| pos + 1);
    let column = consumed[line_start..].chars().count() + 1;
    (line, column)
}
