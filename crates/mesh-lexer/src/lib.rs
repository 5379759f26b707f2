//! Trivia-preserving scanner for the language frontend.
//!
//! [`Lexer`] produces a raw, interleaved token stream (significant tokens and
//! trivia tokens side by side, in source order). [`scan_all`] wraps it with
//! the scanner's full contract: trivia filtering/attachment per [`CSTConfig`]
//! and lexical-error diagnostics. [`TokenCursor`] gives downstream consumers
//! (the parser) the `advance`/`peek`/`previous`/`current_line_col` cursor API
//! over an already-scanned token slice.

mod cursor;

use cursor::Cursor;
use mesh_common::diagnostic::Diagnostic;
use mesh_common::span::LineIndex;
use mesh_common::token::{keyword_from_str, Token, TokenKind};

/// Scanner configuration: which trivia to keep, whether to surface invalid
/// input as tokens, and whether to fold trivia into significant tokens.
///
/// Field names and defaults mirror the reference scanner's `CSTConfig`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CSTConfig {
    pub preserve_whitespace: bool,
    pub preserve_comments: bool,
    pub emit_error_tokens: bool,
    pub attach_trivia: bool,
    pub detailed_expression_nodes: bool,
}

impl Default for CSTConfig {
    fn default() -> Self {
        Self {
            preserve_whitespace: true,
            preserve_comments: true,
            emit_error_tokens: true,
            attach_trivia: false,
            detailed_expression_nodes: false,
        }
    }
}

/// Tracks what the lexer is currently doing.
#[derive(Debug, Clone, PartialEq)]
enum LexerState {
    /// Normal top-level tokenization.
    Normal,
    /// Inside a string literal (after `StringStart` emitted).
    InString,
    /// Inside `{...}` string interpolation.
    InInterpolation { brace_depth: u32 },
}

/// The scanner. Converts source text into a flat, interleaved stream of
/// significant and trivia tokens.
///
/// Wraps a [`Cursor`] for byte-level iteration and implements
/// `Iterator<Item = Token>` so callers can consume tokens lazily or collect
/// them into a `Vec`. Uses a state stack to handle nested string
/// interpolation contexts.
pub struct Lexer<'src> {
    cursor: Cursor<'src>,
    /// Whether we have already emitted the `Eof` token.
    emitted_eof: bool,
    /// Pending tokens to emit before resuming normal lexing.
    pending: Vec<Token>,
    /// State stack for tracking nested lexing contexts.
    state_stack: Vec<LexerState>,
}

impl<'src> Lexer<'src> {
    /// Create a new lexer for the given source text.
    pub fn new(source: &'src str) -> Self {
        Self {
            cursor: Cursor::new(source),
            emitted_eof: false,
            pending: Vec::new(),
            state_stack: vec![LexerState::Normal],
        }
    }

    /// Tokenize the entire source into a raw, interleaved `Vec<Token>`
    /// (trivia and significant tokens side by side, no attachment applied).
    /// The returned vector includes the final `Eof` token.
    pub fn tokenize(source: &str) -> Vec<Token> {
        Lexer::new(source).collect()
    }

    fn current_state(&self) -> &LexerState {
        self.state_stack
            .last()
            .expect("state stack must never be empty")
    }

    fn produce_token(&mut self) -> Token {
        match self.current_state().clone() {
            LexerState::Normal => self.lex_normal(),
            LexerState::InString => self.lex_string_content(),
            LexerState::InInterpolation { .. } => self.lex_interpolation(),
        }
    }

    // ── Normal mode ────────────────────────────────────────────────────

    fn lex_normal(&mut self) -> Token {
        let start = self.cursor.pos();

        let Some(c) = self.cursor.peek() else {
            return Token::new(TokenKind::Eof, start, start);
        };

        match c {
            ' ' | '\t' => {
                self.cursor.eat_while(|c| c == ' ' || c == '\t');
                Token::new(TokenKind::Whitespace, start, self.cursor.pos())
            }
            '\n' => {
                self.cursor.advance();
                Token::new(TokenKind::Newline, start, self.cursor.pos())
            }
            '\r' => {
                self.cursor.advance();
                if self.cursor.peek() == Some('\n') {
                    self.cursor.advance();
                }
                Token::new(TokenKind::Newline, start, self.cursor.pos())
            }

            '(' => self.single_char_token(TokenKind::LParen, start),
            ')' => self.single_char_token(TokenKind::RParen, start),
            '[' => self.single_char_token(TokenKind::LBracket, start),
            ']' => self.single_char_token(TokenKind::RBracket, start),
            '{' => self.single_char_token(TokenKind::LBrace, start),
            '}' => self.single_char_token(TokenKind::RBrace, start),
            ',' => self.single_char_token(TokenKind::Comma, start),
            ';' => self.single_char_token(TokenKind::Semicolon, start),
            '@' => self.single_char_token(TokenKind::At, start),
            '^' => self.single_char_token(TokenKind::Caret, start),
            '~' => self.single_char_token(TokenKind::Tilde, start),
            '&' => self.single_char_token(TokenKind::Amp, start),
            '|' => self.single_char_token(TokenKind::Pipe, start),

            '=' => self.lex_eq(start),
            '!' => self.lex_bang(start),
            '<' => self.lex_lt(start),
            '>' => self.lex_gt(start),
            '+' => self.lex_plus(start),
            '-' => self.lex_minus(start),
            ':' => self.single_char_token(TokenKind::Colon, start),
            '.' => self.lex_dot(start),
            '*' => self.lex_star(start),
            '/' => self.lex_slash(start),
            '%' => self.lex_percent(start),
            '?' => self.lex_question(start),

            '0'..='9' => self.lex_number(start),
            '"' => self.lex_string_start(start),
            c if is_ident_start(c) => self.lex_ident(start),

            _ => {
                self.cursor.advance();
                Token::new(TokenKind::Error, start, self.cursor.pos())
            }
        }
    }

    fn single_char_token(&mut self, kind: TokenKind, start: u32) -> Token {
        self.cursor.advance();
        Token::new(kind, start, self.cursor.pos())
    }

    // ── Operator lexing ────────────────────────────────────────────────

    /// `=` -> `Eq`, `==` -> `EqEq`
    fn lex_eq(&mut self, start: u32) -> Token {
        self.cursor.advance();
        if self.cursor.peek() == Some('=') {
            self.cursor.advance();
            Token::new(TokenKind::EqEq, start, self.cursor.pos())
        } else {
            Token::new(TokenKind::Eq, start, self.cursor.pos())
        }
    }

    /// `!` -> `Bang`, `!=` -> `BangEq`
    fn lex_bang(&mut self, start: u32) -> Token {
        self.cursor.advance();
        if self.cursor.peek() == Some('=') {
            self.cursor.advance();
            Token::new(TokenKind::BangEq, start, self.cursor.pos())
        } else {
            Token::new(TokenKind::Bang, start, self.cursor.pos())
        }
    }

    /// `<` -> `Lt`, `<=` -> `LtEq`
    fn lex_lt(&mut self, start: u32) -> Token {
        self.cursor.advance();
        if self.cursor.peek() == Some('=') {
            self.cursor.advance();
            Token::new(TokenKind::LtEq, start, self.cursor.pos())
        } else {
            Token::new(TokenKind::Lt, start, self.cursor.pos())
        }
    }

    /// `>` -> `Gt`, `>=` -> `GtEq`
    fn lex_gt(&mut self, start: u32) -> Token {
        self.cursor.advance();
        if self.cursor.peek() == Some('=') {
            self.cursor.advance();
            Token::new(TokenKind::GtEq, start, self.cursor.pos())
        } else {
            Token::new(TokenKind::Gt, start, self.cursor.pos())
        }
    }

    /// `+` -> `Plus`, `+=` -> `PlusEq`
    fn lex_plus(&mut self, start: u32) -> Token {
        self.cursor.advance();
        if self.cursor.peek() == Some('=') {
            self.cursor.advance();
            Token::new(TokenKind::PlusEq, start, self.cursor.pos())
        } else {
            Token::new(TokenKind::Plus, start, self.cursor.pos())
        }
    }

    /// `-` -> `Minus`, `-=` -> `MinusEq`, `->` -> `Arrow`
    fn lex_minus(&mut self, start: u32) -> Token {
        self.cursor.advance();
        match self.cursor.peek() {
            Some('=') => {
                self.cursor.advance();
                Token::new(TokenKind::MinusEq, start, self.cursor.pos())
            }
            Some('>') => {
                self.cursor.advance();
                Token::new(TokenKind::Arrow, start, self.cursor.pos())
            }
            _ => Token::new(TokenKind::Minus, start, self.cursor.pos()),
        }
    }

    /// `*` -> `Star`, `*=` -> `StarEq`, `**` -> `Power`
    fn lex_star(&mut self, start: u32) -> Token {
        self.cursor.advance();
        match self.cursor.peek() {
            Some('=') => {
                self.cursor.advance();
                Token::new(TokenKind::StarEq, start, self.cursor.pos())
            }
            Some('*') => {
                self.cursor.advance();
                Token::new(TokenKind::Power, start, self.cursor.pos())
            }
            _ => Token::new(TokenKind::Star, start, self.cursor.pos()),
        }
    }

    /// `/` -> `Slash`, `/=` -> `SlashEq`, `//...` -> `CommentLine`,
    /// `/* ... */` -> `CommentBlock`.
    fn lex_slash(&mut self, start: u32) -> Token {
        self.cursor.advance();
        match self.cursor.peek() {
            Some('=') => {
                self.cursor.advance();
                Token::new(TokenKind::SlashEq, start, self.cursor.pos())
            }
            Some('/') => {
                self.cursor.advance();
                self.cursor.eat_while(|c| c != '\n' && c != '\r');
                Token::new(TokenKind::CommentLine, start, self.cursor.pos())
            }
            Some('*') => {
                self.cursor.advance();
                self.lex_block_comment(start)
            }
            _ => Token::new(TokenKind::Slash, start, self.cursor.pos()),
        }
    }

    /// `%` -> `Percent`, `%=` -> `PercentEq`
    fn lex_percent(&mut self, start: u32) -> Token {
        self.cursor.advance();
        if self.cursor.peek() == Some('=') {
            self.cursor.advance();
            Token::new(TokenKind::PercentEq, start, self.cursor.pos())
        } else {
            Token::new(TokenKind::Percent, start, self.cursor.pos())
        }
    }

    /// `:` -> `Colon` (handled inline), `.` -> `Dot`, `..` -> `Range`,
    /// `...` -> `Ellipsis`
    fn lex_dot(&mut self, start: u32) -> Token {
        self.cursor.advance();
        if self.cursor.peek() == Some('.') {
            self.cursor.advance();
            if self.cursor.peek() == Some('.') {
                self.cursor.advance();
                Token::new(TokenKind::Ellipsis, start, self.cursor.pos())
            } else {
                Token::new(TokenKind::Range, start, self.cursor.pos())
            }
        } else {
            Token::new(TokenKind::Dot, start, self.cursor.pos())
        }
    }

    /// `?` -> `Question`, `?:` -> `Elvis`, `?.` -> `Safe`
    fn lex_question(&mut self, start: u32) -> Token {
        self.cursor.advance();
        match self.cursor.peek() {
            Some(':') => {
                self.cursor.advance();
                Token::new(TokenKind::Elvis, start, self.cursor.pos())
            }
            Some('.') => {
                self.cursor.advance();
                Token::new(TokenKind::Safe, start, self.cursor.pos())
            }
            _ => Token::new(TokenKind::Question, start, self.cursor.pos()),
        }
    }

    // ── Comments ──────────────────────────────────────────────────────

    /// Lex a nestable block comment `/* ... */`. The opening `/*` has
    /// already been consumed. Depth starts at 1.
    fn lex_block_comment(&mut self, start: u32) -> Token {
        let mut depth: u32 = 1;
        loop {
            match self.cursor.peek() {
                None => return Token::new(TokenKind::Error, start, self.cursor.pos()),
                Some('/') if self.cursor.peek_next() == Some('*') => {
                    self.cursor.advance();
                    self.cursor.advance();
                    depth += 1;
                }
                Some('*') if self.cursor.peek_next() == Some('/') => {
                    self.cursor.advance();
                    self.cursor.advance();
                    depth -= 1;
                    if depth == 0 {
                        return Token::new(TokenKind::CommentBlock, start, self.cursor.pos());
                    }
                }
                Some(_) => {
                    self.cursor.advance();
                }
            }
        }
    }

    // ── Number literals ───────────────────────────────────────────────

    /// Decimal, hex (`0x`), binary (`0b`), octal (`0o`), float (`.` followed
    /// by a digit, not a `..` range), and scientific notation. Underscore
    /// separators are allowed.
    fn lex_number(&mut self, start: u32) -> Token {
        let first = self.cursor.advance().unwrap();

        if first == '0' {
            match self.cursor.peek() {
                Some('x' | 'X') => return self.lex_radix(start, char::is_ascii_hexdigit),
                Some('b' | 'B') => return self.lex_radix(start, |c| *c == '0' || *c == '1'),
                Some('o' | 'O') => return self.lex_radix(start, |c| matches!(c, '0'..='7')),
                _ => {}
            }
        }

        self.cursor.eat_while(|c| c.is_ascii_digit() || c == '_');

        if self.cursor.peek() == Some('.')
            && self.cursor.peek_next().is_some_and(|c| c.is_ascii_digit())
        {
            self.cursor.advance();
            self.cursor.eat_while(|c| c.is_ascii_digit() || c == '_');
            if matches!(self.cursor.peek(), Some('e' | 'E')) {
                self.lex_exponent();
            }
            return Token::new(TokenKind::Float, start, self.cursor.pos());
        }

        if matches!(self.cursor.peek(), Some('e' | 'E')) {
            self.lex_exponent();
            return Token::new(TokenKind::Float, start, self.cursor.pos());
        }

        Token::new(TokenKind::Int, start, self.cursor.pos())
    }

    /// Consume the digits of a prefixed radix literal (`0x`/`0b`/`0o`); the
    /// prefix letter is consumed here, digits matched by `is_digit`.
    fn lex_radix(&mut self, start: u32, is_digit: fn(&char) -> bool) -> Token {
        self.cursor.advance();
        self.cursor.eat_while(|c| is_digit(&c) || c == '_');
        Token::new(TokenKind::Int, start, self.cursor.pos())
    }

    fn lex_exponent(&mut self) {
        self.cursor.advance();
        if matches!(self.cursor.peek(), Some('+' | '-')) {
            self.cursor.advance();
        }
        self.cursor.eat_while(|c| c.is_ascii_digit() || c == '_');
    }

    // ── String literals ───────────────────────────────────────────────

    /// Lex the opening `"` of a string literal. Emits `StringStart` and
    /// pushes `InString` onto the state stack.
    fn lex_string_start(&mut self, start: u32) -> Token {
        self.cursor.advance();
        self.state_stack.push(LexerState::InString);
        Token::new(TokenKind::StringStart, start, self.cursor.pos())
    }

    /// Lex string content while in `InString` state. Scans characters until
    /// finding a bare `{` (interpolation start), the closing `"`, an escape
    /// sequence (kept as part of the content span), or `EOF`.
    fn lex_string_content(&mut self) -> Token {
        let start = self.cursor.pos();

        loop {
            match self.cursor.peek() {
                None => {
                    self.state_stack.pop();
                    let end = self.cursor.pos();
                    if end > start {
                        self.pending.push(Token::new(TokenKind::Error, end, end));
                        return Token::new(TokenKind::StringContent, start, end);
                    }
                    return Token::new(TokenKind::Error, start, end);
                }
                Some('{') => {
                    let content_end = self.cursor.pos();
                    self.cursor.advance();
                    let interp_end = self.cursor.pos();

                    self.state_stack
                        .push(LexerState::InInterpolation { brace_depth: 0 });
                    self.pending.push(Token::new(
                        TokenKind::InterpolationStart,
                        content_end,
                        interp_end,
                    ));

                    if content_end > start {
                        return Token::new(TokenKind::StringContent, start, content_end);
                    }
                    return self.pending.remove(0);
                }
                Some('"') => {
                    let content_end = self.cursor.pos();
                    self.cursor.advance();
                    let str_end = self.cursor.pos();

                    self.state_stack.pop();
                    self.pending
                        .push(Token::new(TokenKind::StringEnd, content_end, str_end));

                    if content_end > start {
                        return Token::new(TokenKind::StringContent, start, content_end);
                    }
                    return self.pending.remove(0);
                }
                Some('\\') => {
                    self.cursor.advance();
                    self.cursor.advance();
                }
                Some(_) => {
                    self.cursor.advance();
                }
            }
        }
    }

    // ── Interpolation ─────────────────────────────────────────────────

    /// Lex tokens inside `{...}` interpolation. Tokenizes normally but
    /// tracks brace depth so nested `{`/`}` (e.g. a dict literal) don't
    /// close the interpolation early. The closing `}` at depth 0 emits
    /// `InterpolationEnd` and returns to `InString`.
    fn lex_interpolation(&mut self) -> Token {
        self.cursor.eat_while(|c| c == ' ' || c == '\t');

        let start = self.cursor.pos();
        let Some(c) = self.cursor.peek() else {
            self.state_stack.pop();
            return Token::new(TokenKind::Error, start, start);
        };

        match c {
            '{' => {
                if let Some(LexerState::InInterpolation { brace_depth }) =
                    self.state_stack.last_mut()
                {
                    *brace_depth += 1;
                }
                self.single_char_token(TokenKind::LBrace, start)
            }
            '}' => {
                let brace_depth = match self.state_stack.last() {
                    Some(LexerState::InInterpolation { brace_depth }) => *brace_depth,
                    _ => 0,
                };
                if brace_depth == 0 {
                    self.cursor.advance();
                    let end = self.cursor.pos();
                    self.state_stack.pop();
                    Token::new(TokenKind::InterpolationEnd, start, end)
                } else {
                    if let Some(LexerState::InInterpolation { brace_depth }) =
                        self.state_stack.last_mut()
                    {
                        *brace_depth -= 1;
                    }
                    self.single_char_token(TokenKind::RBrace, start)
                }
            }
            _ => self.lex_normal(),
        }
    }

    // ── Identifiers and keywords ──────────────────────────────────────

    fn lex_ident(&mut self, start: u32) -> Token {
        self.cursor.advance();
        self.cursor.eat_while(is_ident_continue);
        let text = self.cursor.slice(start, self.cursor.pos());
        let kind = keyword_from_str(text).unwrap_or(TokenKind::Ident);
        Token::new(kind, start, self.cursor.pos())
    }
}

impl<'src> Iterator for Lexer<'src> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.emitted_eof {
            return None;
        }
        if !self.pending.is_empty() {
            let token = self.pending.remove(0);
            if token.kind == TokenKind::Eof {
                self.emitted_eof = true;
            }
            return Some(token);
        }
        let token = self.produce_token();
        if token.kind == TokenKind::Eof {
            self.emitted_eof = true;
        }
        Some(token)
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Fold a flat, interleaved token stream's trivia into the
/// `leading_trivia`/`trailing_trivia` of the significant tokens around it,
/// per the scanner's trivia attachment rule: trivia up to a token is its
/// leading trivia; trivia after a token up to (not including) the next
/// newline is its trailing trivia; a newline leads the next token instead.
fn attach_trivia(raw: Vec<Token>) -> Vec<Token> {
    let mut out = Vec::with_capacity(raw.len());
    let mut pending_leading = Vec::new();
    let mut i = 0;
    while i < raw.len() {
        if raw[i].kind.is_trivia() {
            pending_leading.push(raw[i].clone());
            i += 1;
            continue;
        }

        let mut tok = raw[i].clone();
        tok.leading_trivia = std::mem::take(&mut pending_leading);

        while i + 1 < raw.len() && raw[i + 1].kind.is_trivia() {
            if raw[i + 1].kind == TokenKind::Newline {
                break;
            }
            tok.trailing_trivia.push(raw[i + 1].clone());
            i += 1;
        }

        out.push(tok);
        i += 1;
    }
    out
}

/// Run the scanner's full contract: tokenize `source`, then filter and/or
/// attach trivia per `config`, returning the token stream plus any lexical
/// diagnostics raised along the way.
pub fn scan_all(source: &str, config: CSTConfig) -> (Vec<Token>, Vec<Diagnostic>) {
    let raw: Vec<Token> = Lexer::tokenize(source);
    let line_index = LineIndex::new(source);

    let mut diagnostics = Vec::new();
    let mut filtered = Vec::with_capacity(raw.len());
    for tok in raw {
        if tok.kind == TokenKind::Error {
            let (line, column) = line_index.line_col(tok.span.start);
            let lexeme = source
                .get(tok.span.start as usize..tok.span.end as usize)
                .unwrap_or("");
            diagnostics.push(Diagnostic::error(
                "E0001",
                line,
                column,
                format!("unexpected input: {lexeme:?}"),
            ));
            if !config.emit_error_tokens {
                continue;
            }
        }
        if tok.kind == TokenKind::Whitespace && !config.preserve_whitespace {
            continue;
        }
        if matches!(tok.kind, TokenKind::CommentLine | TokenKind::CommentBlock)
            && !config.preserve_comments
        {
            continue;
        }
        filtered.push(tok);
    }

    let tokens = if config.attach_trivia {
        attach_trivia(filtered)
    } else {
        filtered
    };

    (tokens, diagnostics)
}

/// A read-only cursor over an already-scanned token slice, giving the parser
/// `advance`/`peek(k)`/`previous`/`current_line_col` access without owning
/// the tokens itself.
pub struct TokenCursor<'t> {
    tokens: &'t [Token],
    source: &'t str,
    line_index: LineIndex,
    pos: usize,
}

impl<'t> TokenCursor<'t> {
    pub fn new(tokens: &'t [Token], source: &'t str) -> Self {
        Self {
            tokens,
            source,
            line_index: LineIndex::new(source),
            pos: 0,
        }
    }

    /// The token at the cursor. Returns the final `Eof` token forever past
    /// the end of the stream rather than panicking.
    pub fn current(&self) -> &Token {
        self.tokens
            .get(self.pos)
            .or_else(|| self.tokens.last())
            .expect("token stream must contain at least an Eof token")
    }

    /// Look `k` tokens ahead of the cursor (`k = 0` is `current()`).
    pub fn peek(&self, k: usize) -> &Token {
        self.tokens
            .get(self.pos + k)
            .or_else(|| self.tokens.last())
            .expect("token stream must contain at least an Eof token")
    }

    /// The token immediately behind the cursor, if any.
    pub fn previous(&self) -> Option<&Token> {
        self.pos.checked_sub(1).and_then(|i| self.tokens.get(i))
    }

    /// Advance past the current token and return it.
    pub fn advance(&mut self) -> &Token {
        let idx = self.pos.min(self.tokens.len().saturating_sub(1));
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        &self.tokens[idx]
    }

    pub fn is_at_end(&self) -> bool {
        self.current().kind == TokenKind::Eof
    }

    /// `(line, column)` of the current token's start, 1-indexed.
    pub fn current_line_col(&self) -> (u32, u32) {
        self.line_index.line_col(self.current().span.start)
    }

    pub fn source(&self) -> &'t str {
        self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lex_simple_expression() {
        let tokens = Lexer::tokenize("var x = 42;");
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Var,
                TokenKind::Whitespace,
                TokenKind::Ident,
                TokenKind::Whitespace,
                TokenKind::Eq,
                TokenKind::Whitespace,
                TokenKind::Int,
                TokenKind::Semicolon,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn lex_simple_string() {
        let tokens = Lexer::tokenize(r#""hello""#);
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::StringStart,
                TokenKind::StringContent,
                TokenKind::StringEnd,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn lex_string_interpolation_basic() {
        let tokens = Lexer::tokenize(r#""hello {name} world""#);
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::StringStart,
                TokenKind::StringContent,
                TokenKind::InterpolationStart,
                TokenKind::Ident,
                TokenKind::InterpolationEnd,
                TokenKind::StringContent,
                TokenKind::StringEnd,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn lex_interpolation_with_nested_dict_braces() {
        let tokens = Lexer::tokenize(r#""{ {"a": 1}["a"] }""#);
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(kinds.first(), Some(&TokenKind::StringStart));
        assert_eq!(kinds.last(), Some(&TokenKind::Eof));
        assert!(kinds.contains(&TokenKind::InterpolationStart));
        assert!(kinds.contains(&TokenKind::InterpolationEnd));
    }

    #[test]
    fn lex_line_comment() {
        let tokens = Lexer::tokenize("// a comment\nvar x;");
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(kinds[0], TokenKind::CommentLine);
        assert_eq!(kinds[1], TokenKind::Newline);
    }

    #[test]
    fn lex_nested_block_comment() {
        let tokens = Lexer::tokenize("/* outer /* inner */ still */");
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(kinds, vec![TokenKind::CommentBlock, TokenKind::Eof]);
    }

    #[test]
    fn lex_unterminated_block_comment_is_error() {
        let tokens = Lexer::tokenize("/* never closed");
        assert_eq!(tokens[0].kind, TokenKind::Error);
    }

    #[test]
    fn lex_power_and_range_operators() {
        let tokens = Lexer::tokenize("a**b..c...d");
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Ident,
                TokenKind::Power,
                TokenKind::Ident,
                TokenKind::Range,
                TokenKind::Ident,
                TokenKind::Ellipsis,
                TokenKind::Ident,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn lex_elvis_and_safe_navigation() {
        let tokens = Lexer::tokenize("a?.b ?: c");
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
        assert!(kinds.contains(&TokenKind::Safe));
        assert!(kinds.contains(&TokenKind::Elvis));
    }

    #[test]
    fn lex_float_requires_digit_after_dot() {
        let tokens = Lexer::tokenize("1..2");
        assert_eq!(tokens[0].kind, TokenKind::Int);
        assert_eq!(tokens[1].kind, TokenKind::Range);
        assert_eq!(tokens[2].kind, TokenKind::Int);
    }

    #[test]
    fn lex_float_and_scientific_notation() {
        let tokens = Lexer::tokenize("3.14 1.0e10 2e-3");
        let kinds: Vec<_> = tokens
            .iter()
            .filter(|t| t.kind != TokenKind::Whitespace)
            .map(|t| t.kind)
            .collect();
        assert_eq!(
            kinds,
            vec![TokenKind::Float, TokenKind::Float, TokenKind::Float, TokenKind::Eof]
        );
    }

    #[test]
    fn lex_radix_literals() {
        let tokens = Lexer::tokenize("0xFF 0b1010 0o17");
        let kinds: Vec<_> = tokens
            .iter()
            .filter(|t| t.kind != TokenKind::Whitespace)
            .map(|t| t.kind)
            .collect();
        assert_eq!(
            kinds,
            vec![TokenKind::Int, TokenKind::Int, TokenKind::Int, TokenKind::Eof]
        );
    }

    #[test]
    fn scan_all_attaches_trivia_per_same_line_rule() {
        let (tokens, diags) = scan_all(
            "// leading\nvar x; // trailing\nvar y;",
            CSTConfig {
                attach_trivia: true,
                ..Default::default()
            },
        );
        assert!(diags.is_empty());
        let significant: Vec<_> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            significant,
            vec![
                TokenKind::Var,
                TokenKind::Ident,
                TokenKind::Semicolon,
                TokenKind::Var,
                TokenKind::Ident,
                TokenKind::Semicolon,
                TokenKind::Eof,
            ]
        );
        // `var` (first) carries the leading comment + newline.
        assert_eq!(tokens[0].leading_trivia.len(), 2);
        assert_eq!(tokens[0].leading_trivia[0].kind, TokenKind::CommentLine);
        assert_eq!(tokens[0].leading_trivia[1].kind, TokenKind::Newline);
        // the `;` after `x` carries the same-line trailing comment, not the newline.
        let semi = &tokens[2];
        assert_eq!(semi.kind, TokenKind::Semicolon);
        assert_eq!(semi.trailing_trivia.len(), 2);
        assert_eq!(semi.trailing_trivia[1].kind, TokenKind::CommentLine);
        // the trailing newline instead leads the next `var`.
        assert_eq!(tokens[3].leading_trivia.len(), 1);
        assert_eq!(tokens[3].leading_trivia[0].kind, TokenKind::Newline);
    }

    #[test]
    fn scan_all_round_trips_source_with_trivia_attached() {
        let source = "  var x = 1 ; // c\nprint(x);";
        let (tokens, _) = scan_all(
            source,
            CSTConfig {
                attach_trivia: true,
                ..Default::default()
            },
        );
        let reconstructed: String = tokens
            .iter()
            .filter(|t| t.kind != TokenKind::Eof)
            .map(|t| t.reconstruct_source(source))
            .collect();
        assert_eq!(reconstructed, source);
    }

    #[test]
    fn scan_all_without_attach_trivia_keeps_interleaved_stream() {
        let (tokens, _) = scan_all("var x;", CSTConfig::default());
        assert!(tokens
            .iter()
            .all(|t| t.leading_trivia.is_empty() && t.trailing_trivia.is_empty()));
        assert!(tokens.iter().any(|t| t.kind == TokenKind::Whitespace));
    }

    #[test]
    fn scan_all_can_drop_whitespace_and_comments() {
        let (tokens, _) = scan_all(
            "var  x; // note",
            CSTConfig {
                preserve_whitespace: false,
                preserve_comments: false,
                ..Default::default()
            },
        );
        assert!(!tokens.iter().any(|t| t.kind == TokenKind::Whitespace));
        assert!(!tokens.iter().any(|t| t.kind == TokenKind::CommentLine));
    }

    #[test]
    fn scan_all_reports_diagnostic_for_invalid_character() {
        let (_, diags) = scan_all("var x = `;", CSTConfig::default());
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code, "E0001");
    }

    #[test]
    fn scan_all_can_suppress_error_tokens_while_still_diagnosing() {
        let (tokens, diags) = scan_all(
            "`",
            CSTConfig {
                emit_error_tokens: false,
                ..Default::default()
            },
        );
        assert_eq!(diags.len(), 1);
        assert!(!tokens.iter().any(|t| t.kind == TokenKind::Error));
    }

    #[test]
    fn token_cursor_peek_and_advance() {
        let tokens = Lexer::tokenize("var x;");
        let source = "var x;";
        let mut cursor = TokenCursor::new(&tokens, source);
        assert_eq!(cursor.current().kind, TokenKind::Var);
        assert_eq!(cursor.peek(2).kind, TokenKind::Ident);
        assert_eq!(cursor.advance().kind, TokenKind::Var);
        assert_eq!(cursor.previous().unwrap().kind, TokenKind::Var);
    }
}
