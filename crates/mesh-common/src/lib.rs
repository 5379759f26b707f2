//! Shared primitives for the language frontend: byte-offset spans and line
//! indexing, the token/trivia vocabulary, and the diagnostic record shared by
//! the scanner, parser, and AST builder.

pub mod diagnostic;
pub mod span;
pub mod token;

pub use diagnostic::{Diagnostic, Severity};
pub use span::{LineIndex, Span};
pub use token::{keyword_from_str, Token, TokenKind};
