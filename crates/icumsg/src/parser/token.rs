//! Token types produced by the message lexer.

use std::fmt::{Display, Formatter, Result as FmtResult};

/// The category of a lexed token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Literal message text.
    Text,
    /// Text from a quoted span, with quoting removed.
    QuotedText,
    /// A word inside an argument: name, format type, style, selector.
    Identifier,
    /// Whitespace inside an argument.
    Space,
    /// The `,` separating argument parts.
    Delimiter,
    /// A `{` opening an argument (odd nesting depth).
    StartAction,
    /// A `}` closing an argument.
    EndAction,
    /// A `{` opening a case body (even nesting depth).
    StartMessage,
    /// A `}` closing a case body.
    EndMessage,
    /// A `#` in message text.
    Hash,
    /// End of input with balanced braces.
    Eof,
    /// Malformed input. Always the last token.
    Error,
}

/// A single token with its literal text and byte offset into the source.
///
/// For [`TokenKind::Error`] the text holds the error message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub offset: usize,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, offset: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            offset,
        }
    }

    /// Returns true for the two terminal kinds, `Eof` and `Error`.
    pub fn is_terminal(&self) -> bool {
        matches!(self.kind, TokenKind::Eof | TokenKind::Error)
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self.kind {
            TokenKind::Eof => write!(f, "EOF"),
            TokenKind::Hash => write!(f, "Hash"),
            TokenKind::Error => write!(f, "Error({})", self.text),
            TokenKind::Text => write!(f, "Text({:?})", self.text),
            TokenKind::QuotedText => write!(f, "QuotedText({:?})", self.text),
            TokenKind::Identifier => write!(f, "Identifier({})", self.text),
            TokenKind::Space => write!(f, "Space"),
            TokenKind::Delimiter => write!(f, "Delimiter"),
            TokenKind::StartAction => write!(f, "StartAction"),
            TokenKind::EndAction => write!(f, "EndAction"),
            TokenKind::StartMessage => write!(f, "StartMessage"),
            TokenKind::EndMessage => write!(f, "EndMessage"),
        }
    }
}
