//! Miette diagnostic wrappers for template and resource errors.
//!
//! Note: This module has an exception for `unused_assignments` because miette
//! derive macros read struct fields in generated code that rustc cannot track.
#![allow(unused_assignments)]

use std::path::Path;

use icumsg::parser::ParseError;
use icumsg::translate::LoadError;
use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// A miette-compatible diagnostic for template parse errors.
///
/// Note: Fields are read by miette derive macros, not directly by code.
#[derive(Debug, Error, Diagnostic)]
#[error("{kind} error: {message}")]
#[diagnostic(code(icumsg::template))]
pub struct TemplateDiagnostic {
    #[source_code]
    src: NamedSource<String>,

    #[label("error here")]
    span: SourceSpan,

    kind: &'static str,

    message: String,

    #[help]
    help: Option<String>,
}

impl TemplateDiagnostic {
    /// Create a diagnostic from a ParseError with the template as source.
    pub fn from_parse_error(name: &str, template: &str, err: &ParseError) -> Self {
        let (line, column) = err.position();
        let kind = match err {
            ParseError::Lex { .. } => "lex",
            ParseError::Syntax { .. } => "syntax",
            ParseError::UnexpectedEof { .. } => "parse",
        };
        let message = err.message().to_string();
        let help = help_for(&message);

        let offset = byte_offset(template, line, column);
        let len = template[offset..].chars().next().map_or(0, char::len_utf8);

        TemplateDiagnostic {
            src: NamedSource::new(name, template.to_string()),
            span: (offset, len).into(),
            kind,
            message,
            help,
        }
    }
}

fn help_for(message: &str) -> Option<String> {
    if message.contains("quoted") {
        Some("close the quoted span with a single ', or write '' for a literal apostrophe".into())
    } else if message.contains("unmatched '}'") || message.contains("missing '}'") {
        Some("write literal braces as '{' and '}'".into())
    } else if message.contains("offset") {
        Some("write the offset as offset:N before the first case".into())
    } else {
        None
    }
}

/// A miette-compatible diagnostic for resource files that fail to decode.
#[derive(Debug, Error, Diagnostic)]
#[error("invalid resource file: {message}")]
#[diagnostic(code(icumsg::resource))]
pub struct ResourceDiagnostic {
    #[source_code]
    src: NamedSource<String>,

    #[label("here")]
    span: Option<SourceSpan>,

    message: String,
}

impl ResourceDiagnostic {
    /// Create a diagnostic from a LoadError, pointing into `content` when
    /// the error carries a location.
    pub fn from_load_error(path: &Path, content: &str, err: &LoadError) -> Self {
        let (span, message) = match err {
            LoadError::Decode { source, .. } => (
                source.span().map(|range| SourceSpan::from(range.start..range.end)),
                source.message().to_string(),
            ),
            other => (None, other.to_string()),
        };
        ResourceDiagnostic {
            src: NamedSource::new(path.display().to_string(), content.to_string()),
            span,
            message,
        }
    }
}

/// Convert a 1-based line and character column to a byte offset.
pub fn byte_offset(content: &str, line: usize, column: usize) -> usize {
    let line_start: usize = content
        .split_inclusive('\n')
        .take(line.saturating_sub(1))
        .map(str::len)
        .sum();
    let line_start = line_start.min(content.len());
    let rest = &content[line_start..];
    let column_offset = rest
        .char_indices()
        .nth(column.saturating_sub(1))
        .map_or(rest.len(), |(i, _)| i);
    line_start + column_offset
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_offset_counts_characters_within_the_line() {
        let content = "héllo\n{n, plüral}";
        assert_eq!(byte_offset(content, 1, 1), 0);
        assert_eq!(byte_offset(content, 1, 3), 3);
        assert_eq!(byte_offset(content, 2, 1), 7);
        assert_eq!(byte_offset(content, 2, 11), content.len() - 1);
    }

    #[test]
    fn byte_offset_clamps_past_the_end() {
        assert_eq!(byte_offset("abc", 1, 10), 3);
        assert_eq!(byte_offset("abc", 5, 1), 3);
    }
}
