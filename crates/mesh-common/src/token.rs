use serde::Serialize;

use crate::span::Span;

/// A token produced by the scanner.
///
/// Trivia tokens (`Whitespace`/`Newline`/`CommentLine`/`CommentBlock`) are
/// ordinary `Token`s drawn from the same `TokenKind` enum as significant
/// tokens — this mirrors `original_source`'s `Token`/`TokenType`, where
/// trivia is just another token category rather than a separate type.
/// `leading_trivia`/`trailing_trivia` are populated only when the scanner
/// runs with `CSTConfig.attach_trivia = true`; otherwise both are empty and
/// trivia tokens are emitted in-band, interleaved with significant tokens,
/// by the caller (see `mesh-lexer`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    pub leading_trivia: Vec<Token>,
    pub trailing_trivia: Vec<Token>,
}

impl TokenKind {
    /// Whether this kind represents trivia (whitespace/newline/comment)
    /// rather than a significant token.
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            TokenKind::Whitespace
                | TokenKind::Newline
                | TokenKind::CommentLine
                | TokenKind::CommentBlock
        )
    }
}

impl Token {
    /// Create a new token from a kind and byte offsets, with no trivia attached.
    pub fn new(kind: TokenKind, start: u32, end: u32) -> Self {
        Self {
            kind,
            span: Span::new(start, end),
            leading_trivia: Vec::new(),
            trailing_trivia: Vec::new(),
        }
    }

    /// Reconstruct the exact source slice this token (plus its attached
    /// trivia) was scanned from: `leading_trivia ++ lexeme ++ trailing_trivia`.
    ///
    /// This is Invariant T1 made concrete as an API, grounded in
    /// `original_source`'s `Token::reconstructSource()`.
    pub fn reconstruct_source<'a>(&self, source: &'a str) -> String {
        let mut out = String::new();
        for t in &self.leading_trivia {
            out.push_str(&source[t.span.start as usize..t.span.end as usize]);
        }
        out.push_str(&source[self.span.start as usize..self.span.end as usize]);
        for t in &self.trailing_trivia {
            out.push_str(&source[t.span.start as usize..t.span.end as usize]);
        }
        out
    }
}

/// Every kind of token the scanner can produce.
///
/// This is the complete vocabulary: delimiters, operators, literals, type
/// keywords, reserved keywords, trivia, and the special `Error`/`Eof`
/// markers. Trivia kinds share this enum rather than living in a type of
/// their own, matching `original_source`'s single `TokenType`; a scanner
/// running with `attach_trivia = false` emits `Whitespace`/`Newline`/
/// `CommentLine`/`CommentBlock` as ordinary members interleaved in the
/// stream, while `attach_trivia = true` moves them into a token's
/// `leading_trivia`/`trailing_trivia` (see `mesh-lexer`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TokenKind {
    // ── Delimiters ─────────────────────────────────────────────────────
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `{`
    LBrace,
    /// `}`
    RBrace,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `,`
    Comma,
    /// `.`
    Dot,
    /// `:`
    Colon,
    /// `;`
    Semicolon,
    /// `?`
    Question,
    /// `?:` (Elvis operator)
    Elvis,
    /// `?.` (safe navigation)
    Safe,
    /// `->`
    Arrow,
    /// `..`
    Range,
    /// `...`
    Ellipsis,
    /// `@`
    At,
    /// `_` (standalone, not part of a longer identifier)
    Underscore,

    // ── Operators ──────────────────────────────────────────────────────
    /// `+`
    Plus,
    /// `+=`
    PlusEq,
    /// `-`
    Minus,
    /// `-=`
    MinusEq,
    /// `*`
    Star,
    /// `*=`
    StarEq,
    /// `/`
    Slash,
    /// `/=`
    SlashEq,
    /// `%`
    Percent,
    /// `%=`
    PercentEq,
    /// `!`
    Bang,
    /// `!=`
    BangEq,
    /// `=`
    Eq,
    /// `==`
    EqEq,
    /// `>`
    Gt,
    /// `>=`
    GtEq,
    /// `<`
    Lt,
    /// `<=`
    LtEq,
    /// `&`
    Amp,
    /// `|`
    Pipe,
    /// `^`
    Caret,
    /// `~`
    Tilde,
    /// `**`
    Power,

    // ── Literals ───────────────────────────────────────────────────────
    Ident,
    /// Integer literal: `42`, `0xFF`, `0b1010`, `0o17`.
    Int,
    /// Floating-point literal: `3.14`, `1.0e10`.
    Float,
    /// Opening `"` of a string.
    StringStart,
    /// Closing `"` of a string.
    StringEnd,
    /// Literal text content inside a string (between delimiters/interpolations).
    StringContent,
    /// `{` that opens a string-interpolation segment.
    InterpolationStart,
    /// `}` that closes a string-interpolation segment.
    InterpolationEnd,

    // ── Type keywords ──────────────────────────────────────────────────
    IntType,
    Int8Type,
    Int16Type,
    Int32Type,
    Int64Type,
    UintType,
    Uint8Type,
    Uint16Type,
    Uint32Type,
    Uint64Type,
    FloatType,
    Float32Type,
    Float64Type,
    StrType,
    BoolType,
    ListType,
    DictType,
    ArrayType,
    EnumType,
    SumType,
    UnionType,
    OptionType,
    ResultType,
    AnyType,
    ChannelType,
    AtomicType,

    // ── Reserved keywords ──────────────────────────────────────────────
    And,
    As,
    Attempt,
    Break,
    Class,
    Comptime,
    Concurrent,
    Contract,
    Continue,
    Default,
    Elif,
    Else,
    Enum,
    False,
    Fn,
    For,
    Handle,
    If,
    Import,
    In,
    Interface,
    Iter,
    Match,
    Module,
    Nil,
    Or,
    Parallel,
    Print,
    Pub,
    Return,
    Super,
    This,
    Throws,
    Trait,
    True,
    Type,
    Unsafe,
    Var,
    Where,
    While,

    // ── Trivia ─────────────────────────────────────────────────────────
    /// A run of spaces/tabs.
    Whitespace,
    /// A single line terminator (`\n`, or `\r\n` normalized to one token).
    Newline,
    /// `// ...` through end of line.
    CommentLine,
    /// `/* ... */`, possibly nested.
    CommentBlock,

    // ── Special ────────────────────────────────────────────────────────
    /// End of file.
    Eof,
    /// Invalid/unexpected input. Used for error recovery.
    Error,
}

/// Look up a keyword (including type keywords) from its string representation.
///
/// Returns `Some(TokenKind)` if the string is a reserved word, `None` if it
/// should be classified as a plain `IDENT`. The lexer calls this after
/// scanning an identifier-shaped token.
pub fn keyword_from_str(s: &str) -> Option<TokenKind> {
    use TokenKind::*;
    Some(match s {
        "int" => IntType,
        "i8" => Int8Type,
        "i16" => Int16Type,
        "i32" => Int32Type,
        "i64" => Int64Type,
        "uint" => UintType,
        "u8" => Uint8Type,
        "u16" => Uint16Type,
        "u32" => Uint32Type,
        "u64" => Uint64Type,
        "float" => FloatType,
        "f32" => Float32Type,
        "f64" => Float64Type,
        "str" => StrType,
        "bool" => BoolType,
        "list" => ListType,
        "dict" => DictType,
        "array" => ArrayType,
        "enum" => Enum,
        "sum" => SumType,
        "union" => UnionType,
        "option" => OptionType,
        "result" => ResultType,
        "any" => AnyType,
        "channel" => ChannelType,
        "atomic" => AtomicType,

        "and" => And,
        "as" => As,
        "attempt" => Attempt,
        "break" => Break,
        "class" => Class,
        "comptime" => Comptime,
        "concurrent" => Concurrent,
        "contract" => Contract,
        "continue" => Continue,
        "default" => Default,
        "elif" => Elif,
        "else" => Else,
        "false" => False,
        "fn" => Fn,
        "for" => For,
        "handle" => Handle,
        "if" => If,
        "import" => Import,
        "in" => In,
        "interface" => Interface,
        "iter" => Iter,
        "match" => Match,
        "module" => Module,
        "nil" => Nil,
        "or" => Or,
        "parallel" => Parallel,
        "print" => Print,
        "pub" => Pub,
        "return" => Return,
        "super" => Super,
        "this" => This,
        "throws" => Throws,
        "trait" => Trait,
        "true" => True,
        "type" => Type,
        "unsafe" => Unsafe,
        "var" => Var,
        "where" => Where,
        "while" => While,
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_from_str_recognizes_declarations_and_control() {
        for (s, expected) in [
            ("var", TokenKind::Var),
            ("fn", TokenKind::Fn),
            ("class", TokenKind::Class),
            ("trait", TokenKind::Trait),
            ("interface", TokenKind::Interface),
            ("module", TokenKind::Module),
            ("type", TokenKind::Type),
            ("enum", TokenKind::Enum),
            ("import", TokenKind::Import),
            ("if", TokenKind::If),
            ("elif", TokenKind::Elif),
            ("else", TokenKind::Else),
            ("while", TokenKind::While),
            ("for", TokenKind::For),
            ("iter", TokenKind::Iter),
            ("match", TokenKind::Match),
            ("attempt", TokenKind::Attempt),
            ("handle", TokenKind::Handle),
            ("parallel", TokenKind::Parallel),
            ("concurrent", TokenKind::Concurrent),
            ("unsafe", TokenKind::Unsafe),
            ("contract", TokenKind::Contract),
            ("comptime", TokenKind::Comptime),
        ] {
            assert_eq!(keyword_from_str(s), Some(expected));
        }
    }

    #[test]
    fn keyword_from_str_recognizes_type_keywords() {
        for (s, expected) in [
            ("int", TokenKind::IntType),
            ("i8", TokenKind::Int8Type),
            ("i64", TokenKind::Int64Type),
            ("uint", TokenKind::UintType),
            ("u64", TokenKind::Uint64Type),
            ("float", TokenKind::FloatType),
            ("f64", TokenKind::Float64Type),
            ("str", TokenKind::StrType),
            ("bool", TokenKind::BoolType),
            ("list", TokenKind::ListType),
            ("dict", TokenKind::DictType),
            ("array", TokenKind::ArrayType),
            ("option", TokenKind::OptionType),
            ("result", TokenKind::ResultType),
            ("any", TokenKind::AnyType),
            ("channel", TokenKind::ChannelType),
            ("atomic", TokenKind::AtomicType),
        ] {
            assert_eq!(keyword_from_str(s), Some(expected));
        }
    }

    #[test]
    fn keyword_from_str_rejects_non_keywords() {
        assert_eq!(keyword_from_str("foo"), None);
        assert_eq!(keyword_from_str("myVar"), None);
        assert_eq!(keyword_from_str(""), None);
        assert_eq!(keyword_from_str("IF"), None); // case-sensitive
    }

    #[test]
    fn token_new_constructor_has_no_trivia() {
        let tok = Token::new(TokenKind::Fn, 10, 12);
        assert_eq!(tok.kind, TokenKind::Fn);
        assert_eq!(tok.span, Span::new(10, 12));
        assert!(tok.leading_trivia.is_empty());
        assert!(tok.trailing_trivia.is_empty());
    }

    #[test]
    fn reconstruct_source_includes_trivia() {
        let source = "  var x;";
        let mut tok = Token::new(TokenKind::Var, 2, 5);
        tok.leading_trivia
            .push(Token::new(TokenKind::Whitespace, 0, 2));
        assert_eq!(tok.reconstruct_source(source), "  var");
    }

    #[test]
    fn is_trivia_classifies_trivia_kinds_only() {
        assert!(TokenKind::Whitespace.is_trivia());
        assert!(TokenKind::Newline.is_trivia());
        assert!(TokenKind::CommentLine.is_trivia());
        assert!(TokenKind::CommentBlock.is_trivia());
        assert!(!TokenKind::Var.is_trivia());
        assert!(!TokenKind::Eof.is_trivia());
    }
}
