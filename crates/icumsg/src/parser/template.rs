//! Template parser.
//!
//! Recursive descent over the token list produced by [`tokenize`]:
//!
//! ```text
//! Message    := (Text | QuotedText | Hash | Argument)*
//! Argument   := '{' Identifier [',' Identifier [',' FormatTail]] '}'
//! FormatTail := Style | CaseList
//! CaseList   := ['offset:' Integer] (Selector '{' Message '}')+
//! Selector   := '=' Integer | CategoryName | Literal
//! ```
//!
//! Tokens are materialized before parsing starts, so returning early on an
//! error leaves nothing running behind.

use super::ast::{Cases, FormatKind, Message, Node};
use super::error::{ParseError, calculate_position};
use super::lexer::tokenize;
use super::token::{Token, TokenKind};

const OFFSET_PREFIX: &str = "offset:";

static END: Token = Token {
    kind: TokenKind::Eof,
    text: String::new(),
    offset: 0,
};

/// Parse a template string into a [`Message`].
///
/// # Errors
///
/// Returns [`ParseError::Lex`] for unbalanced braces or unterminated quotes,
/// and [`ParseError::Syntax`] for grammar violations such as a missing case
/// selector, a non-numeric offset, or a duplicate selector.
pub fn parse_message(input: &str) -> Result<Message, ParseError> {
    let tokens = tokenize(input);
    let mut parser = Parser {
        input,
        tokens: &tokens,
        pos: 0,
    };
    parser.message(false)
}

/// `{key` or `{key, format`.
struct ArgumentHeader {
    key: String,
    format: Option<String>,
}

/// Everything after the format type, up to the closing `}`.
enum FormatClause {
    Style {
        kind: FormatKind,
        style: String,
    },
    Custom {
        formatter: String,
        args: Vec<String>,
    },
    Cases {
        kind: CaseKind,
        offset: i64,
        cases: Cases,
    },
}

impl FormatClause {
    fn into_node(self, key: String) -> Node {
        match self {
            FormatClause::Style { kind, style } => Node::Format { key, kind, style },
            FormatClause::Custom { formatter, args } => Node::Custom {
                key,
                formatter,
                args,
            },
            FormatClause::Cases {
                kind: CaseKind::Plural,
                offset,
                cases,
            } => Node::Plural { key, offset, cases },
            FormatClause::Cases {
                kind: CaseKind::SelectOrdinal,
                offset,
                cases,
            } => Node::SelectOrdinal { key, offset, cases },
            FormatClause::Cases {
                kind: CaseKind::Select,
                cases,
                ..
            } => Node::Select { key, cases },
        }
    }
}

/// One `selector {message}` group.
struct CaseClause {
    selector: String,
    message: Message,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CaseKind {
    Plural,
    SelectOrdinal,
    Select,
}

impl CaseKind {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "plural" => Some(CaseKind::Plural),
            "selectordinal" => Some(CaseKind::SelectOrdinal),
            "select" => Some(CaseKind::Select),
            _ => None,
        }
    }

    fn is_numeric(self) -> bool {
        matches!(self, CaseKind::Plural | CaseKind::SelectOrdinal)
    }
}

struct Parser<'a> {
    input: &'a str,
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> &'a Token {
        self.tokens
            .get(self.pos)
            .or_else(|| self.tokens.last())
            .unwrap_or(&END)
    }

    /// Consume the current token. Terminal tokens are never consumed, so
    /// repeated calls at the end keep returning them.
    fn bump(&mut self) -> &'a Token {
        let token = self.peek();
        if !token.is_terminal() {
            self.pos += 1;
        }
        token
    }

    fn skip_spaces(&mut self) {
        while self.peek().kind == TokenKind::Space {
            self.pos += 1;
        }
    }

    /// Parse message content up to end of input (top level) or up to the
    /// `EndMessage` closing a case body (nested).
    fn message(&mut self, nested: bool) -> Result<Message, ParseError> {
        let mut nodes = Vec::new();
        loop {
            let token = self.bump();
            match token.kind {
                TokenKind::Text => nodes.push(Node::Text(token.text.clone())),
                TokenKind::QuotedText => nodes.push(Node::QuotedText(token.text.clone())),
                TokenKind::Hash => nodes.push(Node::Hash),
                TokenKind::StartAction => nodes.push(self.argument()?),
                TokenKind::EndMessage if nested => return Ok(Message::new(nodes)),
                TokenKind::Eof if !nested => return Ok(Message::new(nodes)),
                TokenKind::StartMessage => {
                    return Err(self.syntax(token, "message block '{' without a case selector"));
                }
                _ => return Err(self.unexpected(token, "expected message text or '{'")),
            }
        }
    }

    fn argument(&mut self) -> Result<Node, ParseError> {
        let header = self.argument_header()?;
        let Some(format) = header.format else {
            return Ok(Node::Placeholder { key: header.key });
        };
        let clause = self.format_clause(&format)?;
        Ok(clause.into_node(header.key))
    }

    fn argument_header(&mut self) -> Result<ArgumentHeader, ParseError> {
        self.skip_spaces();
        let token = self.bump();
        if token.kind != TokenKind::Identifier {
            return Err(self.unexpected(token, "expected argument name"));
        }
        let key = token.text.clone();

        self.skip_spaces();
        let token = self.bump();
        match token.kind {
            TokenKind::EndAction => return Ok(ArgumentHeader { key, format: None }),
            TokenKind::Delimiter => {}
            _ => return Err(self.unexpected(token, "expected ',' or '}' after argument name")),
        }

        self.skip_spaces();
        let token = self.bump();
        if token.kind != TokenKind::Identifier {
            return Err(self.unexpected(token, "expected format type"));
        }
        Ok(ArgumentHeader {
            key,
            format: Some(token.text.clone()),
        })
    }

    fn format_clause(&mut self, format: &str) -> Result<FormatClause, ParseError> {
        let case_kind = CaseKind::from_name(format);
        let format_kind = FormatKind::from_name(format);

        self.skip_spaces();
        let token = self.bump();
        match token.kind {
            TokenKind::Delimiter => {}
            TokenKind::EndAction => {
                return match (case_kind, format_kind) {
                    (Some(_), _) => Err(self.syntax(
                        token,
                        format!("'{format}' requires at least one case"),
                    )),
                    (None, Some(kind)) => Ok(FormatClause::Style {
                        kind,
                        style: String::new(),
                    }),
                    (None, None) => Ok(FormatClause::Custom {
                        formatter: format.to_string(),
                        args: Vec::new(),
                    }),
                };
            }
            _ => return Err(self.unexpected(token, "expected ',' or '}' after format type")),
        }

        match (case_kind, format_kind) {
            (Some(kind), _) => self.case_list(kind),
            (None, Some(kind)) => Ok(FormatClause::Style {
                kind,
                style: self.style()?,
            }),
            (None, None) => Ok(FormatClause::Custom {
                formatter: format.to_string(),
                args: self.custom_args()?,
            }),
        }
    }

    /// Free-form style text up to the closing `}`.
    fn style(&mut self) -> Result<String, ParseError> {
        let mut style = String::new();
        loop {
            let token = self.bump();
            match token.kind {
                TokenKind::Identifier | TokenKind::Space | TokenKind::Delimiter => {
                    style.push_str(&token.text);
                }
                TokenKind::EndAction => return Ok(style.trim().to_string()),
                _ => return Err(self.unexpected(token, "expected '}' to close format style")),
            }
        }
    }

    /// Comma-separated arguments of a custom formatter.
    fn custom_args(&mut self) -> Result<Vec<String>, ParseError> {
        let mut args = Vec::new();
        let mut current = String::new();
        loop {
            let token = self.bump();
            match token.kind {
                TokenKind::Identifier | TokenKind::Space => current.push_str(&token.text),
                TokenKind::Delimiter => push_arg(&mut args, &mut current),
                TokenKind::EndAction => {
                    push_arg(&mut args, &mut current);
                    return Ok(args);
                }
                _ => return Err(self.unexpected(token, "expected '}' to close formatter arguments")),
            }
        }
    }

    fn case_list(&mut self, kind: CaseKind) -> Result<FormatClause, ParseError> {
        let mut offset = None;
        let mut cases = Cases::new();
        loop {
            self.skip_spaces();
            let token = self.bump();
            match token.kind {
                TokenKind::Identifier
                    if kind.is_numeric() && token.text.starts_with(OFFSET_PREFIX) =>
                {
                    if offset.is_some() || !cases.is_empty() {
                        return Err(
                            self.syntax(token, "'offset:' must appear once, before the first case")
                        );
                    }
                    offset = Some(self.offset_value(token)?);
                }
                TokenKind::Identifier => {
                    let clause = self.case_clause(token, kind)?;
                    if cases.contains(&clause.selector) {
                        return Err(
                            self.syntax(token, format!("duplicate selector '{}'", clause.selector))
                        );
                    }
                    cases.insert(clause.selector, clause.message);
                }
                TokenKind::EndAction if !cases.is_empty() => {
                    return Ok(FormatClause::Cases {
                        kind,
                        offset: offset.unwrap_or(0),
                        cases,
                    });
                }
                TokenKind::EndAction => {
                    return Err(self.syntax(token, "expected at least one case"));
                }
                TokenKind::StartMessage => {
                    return Err(self.syntax(token, "missing case selector before '{'"));
                }
                _ => return Err(self.unexpected(token, "expected case selector")),
            }
        }
    }

    /// Parse the integer of `offset:N`, also accepting `offset: N`.
    fn offset_value(&mut self, token: &'a Token) -> Result<i64, ParseError> {
        let mut at = token;
        let mut digits = &token.text[OFFSET_PREFIX.len()..];
        if digits.is_empty() {
            self.skip_spaces();
            at = self.bump();
            if at.kind != TokenKind::Identifier {
                return Err(self.unexpected(at, "expected integer after 'offset:'"));
            }
            digits = &at.text;
        }
        digits.parse::<i64>().map_err(|_| {
            self.syntax(
                at,
                format!("invalid offset '{digits}': expected an integer"),
            )
        })
    }

    fn case_clause(&mut self, token: &'a Token, kind: CaseKind) -> Result<CaseClause, ParseError> {
        let selector = if kind.is_numeric() {
            self.numeric_selector(token)?
        } else {
            token.text.clone()
        };

        self.skip_spaces();
        let open = self.bump();
        if open.kind != TokenKind::StartMessage {
            return Err(self.unexpected(
                open,
                &format!("expected '{{' after selector '{}'", token.text),
            ));
        }
        let message = self.message(true)?;
        Ok(CaseClause { selector, message })
    }

    /// Validate and normalize an `=N` selector; other selectors pass through.
    fn numeric_selector(&self, token: &Token) -> Result<String, ParseError> {
        let Some(literal) = token.text.strip_prefix('=') else {
            return Ok(token.text.clone());
        };
        literal
            .parse::<i64>()
            .map(|n| format!("={n}"))
            .map_err(|_| {
                self.syntax(
                    token,
                    format!("invalid exact selector '{}': expected an integer", token.text),
                )
            })
    }

    fn syntax(&self, token: &Token, message: impl Into<String>) -> ParseError {
        let (line, column) = calculate_position(self.input, token.offset);
        ParseError::Syntax {
            line,
            column,
            message: message.into(),
        }
    }

    /// Error for a token that does not fit the current production.
    fn unexpected(&self, token: &Token, expected: &str) -> ParseError {
        let (line, column) = calculate_position(self.input, token.offset);
        match token.kind {
            TokenKind::Error => ParseError::Lex {
                line,
                column,
                message: token.text.clone(),
            },
            TokenKind::Eof => ParseError::UnexpectedEof { line, column },
            _ => ParseError::Syntax {
                line,
                column,
                message: format!("{expected}, found {}", describe(token)),
            },
        }
    }
}

fn push_arg(args: &mut Vec<String>, current: &mut String) {
    let arg = current.trim();
    if !arg.is_empty() {
        args.push(arg.to_string());
    }
    current.clear();
}

fn describe(token: &Token) -> String {
    match token.kind {
        TokenKind::StartAction | TokenKind::StartMessage => "'{'".to_string(),
        TokenKind::EndAction | TokenKind::EndMessage => "'}'".to_string(),
        TokenKind::Delimiter => "','".to_string(),
        TokenKind::Hash => "'#'".to_string(),
        TokenKind::Space => "whitespace".to_string(),
        TokenKind::Identifier => format!("'{}'", token.text),
        TokenKind::Text | TokenKind::QuotedText => "text".to_string(),
        TokenKind::Eof => "end of input".to_string(),
        TokenKind::Error => token.text.clone(),
    }
}
