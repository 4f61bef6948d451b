//! Message lexer.
//!
//! Splits a template into tokens while tracking brace nesting depth. The
//! parity of the depth after a brace decides the lexical mode: odd depth is
//! an action region (argument name, format type, style, case selectors) and
//! even depth is message text.
//!
//! Quoting rules:
//! - `'` starts a quoted span only when followed by `{` or `}`; the span runs
//!   to the next lone `'`, and `''` inside it is a literal apostrophe.
//! - `''` and `'''` outside a span both produce one literal apostrophe.
//! - Any other `'` is ordinary text.

use std::iter::FusedIterator;

use winnow::prelude::*;
use winnow::token::take_while;

use super::token::{Token, TokenKind};

const LEFT_DELIM: char = '{';
const RIGHT_DELIM: char = '}';
const DELIM: char = ',';
const QUOTE: char = '\'';
const HASH: char = '#';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Message,
    Action,
}

/// Pull-based lexer over a template string.
///
/// Yields tokens until exactly one terminal token (`Eof` or `Error`) has been
/// produced, then returns `None` forever. Every non-terminal token consumes
/// input, so iteration always finishes.
pub struct Lexer<'a> {
    input: &'a str,
    rest: &'a str,
    depth: usize,
    mode: Mode,
    done: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            rest: input,
            depth: 0,
            mode: Mode::Message,
            done: false,
        }
    }

    /// Current brace nesting depth.
    pub fn depth(&self) -> usize {
        self.depth
    }

    fn offset(&self) -> usize {
        self.input.len() - self.rest.len()
    }

    fn advance(&mut self, len: usize) -> &'a str {
        let (head, tail) = self.rest.split_at(len);
        self.rest = tail;
        head
    }

    fn lex_message(&mut self) -> Token {
        let offset = self.offset();
        if self.rest.is_empty() {
            return if self.depth == 0 {
                Token::new(TokenKind::Eof, "", offset)
            } else {
                error(offset, "unterminated message: missing '}'")
            };
        }

        let text_len = message_text_len(self.rest);
        if text_len > 0 {
            return Token::new(TokenKind::Text, self.advance(text_len), offset);
        }

        match self.rest.chars().next() {
            Some(HASH) => {
                self.advance(HASH.len_utf8());
                Token::new(TokenKind::Hash, "#", offset)
            }
            Some(LEFT_DELIM) => self.open_brace(offset),
            Some(RIGHT_DELIM) => self.close_brace(offset),
            _ => self.lex_quote(offset),
        }
    }

    /// Lex a quote sequence. `self.rest` starts with a `'` followed by one of
    /// `{`, `}` or `'`.
    fn lex_quote(&mut self, offset: usize) -> Token {
        let body = &self.rest[QUOTE.len_utf8()..];
        if body.starts_with("''") {
            self.advance(3);
            return Token::new(TokenKind::QuotedText, "'", offset);
        }
        if body.starts_with(QUOTE) {
            self.advance(2);
            return Token::new(TokenKind::QuotedText, "'", offset);
        }

        let mut text = String::new();
        let mut chars = body.char_indices().peekable();
        while let Some((idx, c)) = chars.next() {
            if c != QUOTE {
                text.push(c);
                continue;
            }
            if chars.next_if(|&(_, next)| next == QUOTE).is_some() {
                text.push(QUOTE);
                continue;
            }
            self.advance(QUOTE.len_utf8() + idx + QUOTE.len_utf8());
            return Token::new(TokenKind::QuotedText, text, offset);
        }
        error(offset, "unterminated quoted text")
    }

    fn lex_action(&mut self) -> Token {
        let offset = self.offset();
        let Some(c) = self.rest.chars().next() else {
            return error(offset, "unterminated argument: missing '}'");
        };
        match c {
            LEFT_DELIM => self.open_brace(offset),
            RIGHT_DELIM => self.close_brace(offset),
            DELIM => {
                self.advance(DELIM.len_utf8());
                Token::new(TokenKind::Delimiter, ",", offset)
            }
            c if c.is_whitespace() => self.scan(TokenKind::Space, char::is_whitespace, offset),
            _ => self.scan(TokenKind::Identifier, is_identifier_char, offset),
        }
    }

    fn scan(&mut self, kind: TokenKind, accept: fn(char) -> bool, offset: usize) -> Token {
        let run: ModalResult<&'a str> = take_while(1.., accept).parse_next(&mut self.rest);
        match run {
            Ok(text) => Token::new(kind, text, offset),
            Err(_) => error(offset, "unexpected character in argument"),
        }
    }

    fn open_brace(&mut self, offset: usize) -> Token {
        self.advance(LEFT_DELIM.len_utf8());
        self.depth += 1;
        if self.depth % 2 == 1 {
            self.mode = Mode::Action;
            Token::new(TokenKind::StartAction, "{", offset)
        } else {
            self.mode = Mode::Message;
            Token::new(TokenKind::StartMessage, "{", offset)
        }
    }

    fn close_brace(&mut self, offset: usize) -> Token {
        if self.depth == 0 {
            return error(offset, "unmatched '}'");
        }
        self.advance(RIGHT_DELIM.len_utf8());
        self.depth -= 1;
        if self.depth % 2 == 1 {
            self.mode = Mode::Action;
            Token::new(TokenKind::EndMessage, "}", offset)
        } else {
            self.mode = Mode::Message;
            Token::new(TokenKind::EndAction, "}", offset)
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.done {
            return None;
        }
        let token = match self.mode {
            Mode::Message => self.lex_message(),
            Mode::Action => self.lex_action(),
        };
        if token.is_terminal() {
            self.done = true;
        }
        Some(token)
    }
}

impl FusedIterator for Lexer<'_> {}

/// Tokenize a template into a fully materialized token list.
///
/// The list is never empty and ends with exactly one `Eof` or `Error` token.
pub fn tokenize(input: &str) -> Vec<Token> {
    Lexer::new(input).collect()
}

fn error(offset: usize, message: &str) -> Token {
    Token::new(TokenKind::Error, message, offset)
}

/// Length in bytes of the plain text run at the start of `rest`.
fn message_text_len(rest: &str) -> usize {
    let mut chars = rest.char_indices().peekable();
    while let Some((idx, c)) = chars.next() {
        match c {
            HASH | LEFT_DELIM | RIGHT_DELIM => return idx,
            QUOTE if chars.peek().is_some_and(|&(_, next)| opens_quote(next)) => return idx,
            _ => {}
        }
    }
    rest.len()
}

fn opens_quote(c: char) -> bool {
    matches!(c, LEFT_DELIM | RIGHT_DELIM | QUOTE)
}

fn is_identifier_char(c: char) -> bool {
    !c.is_whitespace() && !matches!(c, LEFT_DELIM | RIGHT_DELIM | DELIM)
}
