//! Message template lexer and parser.
//!
//! Templates are lexed into a token stream, then parsed into an immutable
//! AST that the interpreter renders. The AST types are public so tools can
//! inspect templates without rendering them.

pub mod ast;
pub mod error;
mod lexer;
mod template;
mod token;

pub use ast::*;
pub use error::ParseError;
pub use lexer::{Lexer, tokenize};
pub use template::parse_message;
pub use token::{Token, TokenKind};
