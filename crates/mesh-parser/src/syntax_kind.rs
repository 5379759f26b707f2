//! `SyntaxKind` enum for the CST.
//!
//! A superset of `TokenKind` (mapped 1:1, `SCREAMING_SNAKE_CASE`) plus the
//! composite node kinds the parser produces: declarations, control and
//! simple statements, the expression grammar, type annotations, patterns,
//! parameter/argument lists, and the three error-recovery node kinds
//! (`ERROR_NODE`, `MISSING_NODE`, `INCOMPLETE_NODE`) from spec §3.

use mesh_common::token::TokenKind;

/// Every kind of syntax element in the CST: token kinds (leaves) mapped
/// 1:1 from [`TokenKind`], plus composite node kinds produced by the
/// parser. The first two values are sentinels used by the event-based
/// parser (see `parser::Event`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // ── Sentinels ──────────────────────────────────────────────────────
    /// Placeholder kind for an unfinished parser event.
    TOMBSTONE = 0,

    // ── Token kinds (mirrors `TokenKind`) ────────────────────────────────
    L_PAREN,
    R_PAREN,
    L_BRACE,
    R_BRACE,
    L_BRACKET,
    R_BRACKET,
    COMMA,
    DOT,
    COLON,
    SEMICOLON,
    QUESTION,
    ELVIS,
    SAFE,
    ARROW,
    RANGE,
    ELLIPSIS,
    AT,
    UNDERSCORE,

    PLUS,
    PLUS_EQ,
    MINUS,
    MINUS_EQ,
    STAR,
    STAR_EQ,
    SLASH,
    SLASH_EQ,
    PERCENT,
    PERCENT_EQ,
    BANG,
    BANG_EQ,
    EQ,
    EQ_EQ,
    GT,
    GT_EQ,
    LT,
    LT_EQ,
    AMP,
    PIPE,
    CARET,
    TILDE,
    POWER,

    IDENT,
    INT_LITERAL,
    FLOAT_LITERAL,
    STRING_START,
    STRING_END,
    STRING_CONTENT,
    INTERPOLATION_START,
    INTERPOLATION_END,

    INT_TYPE_KW,
    I8_TYPE_KW,
    I16_TYPE_KW,
    I32_TYPE_KW,
    I64_TYPE_KW,
    UINT_TYPE_KW,
    U8_TYPE_KW,
    U16_TYPE_KW,
    U32_TYPE_KW,
    U64_TYPE_KW,
    FLOAT_TYPE_KW,
    F32_TYPE_KW,
    F64_TYPE_KW,
    STR_TYPE_KW,
    BOOL_TYPE_KW,
    LIST_TYPE_KW,
    DICT_TYPE_KW,
    ARRAY_TYPE_KW,
    ENUM_TYPE_KW,
    SUM_TYPE_KW,
    UNION_TYPE_KW,
    OPTION_TYPE_KW,
    RESULT_TYPE_KW,
    ANY_TYPE_KW,
    CHANNEL_TYPE_KW,
    ATOMIC_TYPE_KW,

    AND_KW,
    AS_KW,
    ATTEMPT_KW,
    BREAK_KW,
    CLASS_KW,
    COMPTIME_KW,
    CONCURRENT_KW,
    CONTRACT_KW,
    CONTINUE_KW,
    DEFAULT_KW,
    ELIF_KW,
    ELSE_KW,
    ENUM_KW,
    FALSE_KW,
    FN_KW,
    FOR_KW,
    HANDLE_KW,
    IF_KW,
    IMPORT_KW,
    IN_KW,
    INTERFACE_KW,
    ITER_KW,
    MATCH_KW,
    MODULE_KW,
    NIL_KW,
    OR_KW,
    PARALLEL_KW,
    PRINT_KW,
    PUB_KW,
    RETURN_KW,
    SUPER_KW,
    THIS_KW,
    THROWS_KW,
    TRAIT_KW,
    TRUE_KW,
    TYPE_KW,
    UNSAFE_KW,
    VAR_KW,
    WHERE_KW,
    WHILE_KW,

    WHITESPACE,
    NEWLINE,
    COMMENT_LINE,
    COMMENT_BLOCK,

    EOF,
    ERROR_TOKEN,

    // ── Error-recovery node kinds (spec §3) ───────────────────────────────
    /// Recovered span of skipped tokens, with a diagnostic message attached.
    ERROR_NODE,
    /// A node the parser expected to find but that was absent; a
    /// zero-width token/node synthesized in its place.
    MISSING_NODE,
    /// A partially-built production, finalized with its missing
    /// sub-elements enumerated.
    INCOMPLETE_NODE,

    // ── Program ────────────────────────────────────────────────────────
    PROGRAM,

    // ── Declarations ───────────────────────────────────────────────────
    VAR_DECL,
    FN_DECL,
    CLASS_DECL,
    TRAIT_DECL,
    INTERFACE_DECL,
    MODULE_DECL,
    TYPE_DECL,
    ENUM_DECL,
    IMPORT_DECL,
    IMPORT_ITEM_LIST,
    IMPORT_ITEM,

    PARAM_LIST,
    PARAM,
    DEFAULT_VALUE,
    ARG_LIST,
    ARG,
    NAMED_ARG,

    CLASS_BODY,
    TRAIT_BODY,
    INTERFACE_BODY,
    MODULE_BODY,
    SUPERCLASS_CLAUSE,
    FIELD_DECL,
    ENUM_VARIANT_LIST,
    ENUM_VARIANT,

    // ── Control statements ─────────────────────────────────────────────
    BLOCK,
    IF_STMT,
    ELIF_CLAUSE,
    ELSE_CLAUSE,
    WHILE_STMT,
    FOR_STMT,
    ITER_STMT,
    MATCH_STMT,
    MATCH_ARM,
    ATTEMPT_STMT,
    HANDLE_CLAUSE,
    PARALLEL_STMT,
    CONCURRENT_STMT,
    UNSAFE_STMT,
    CONTRACT_STMT,
    COMPTIME_STMT,

    // ── Simple statements ──────────────────────────────────────────────
    RETURN_STMT,
    BREAK_STMT,
    CONTINUE_STMT,
    PRINT_STMT,
    EXPR_STMT,

    // ── Expressions ─────────────────────────────────────────────────────
    ASSIGN_EXPR,
    BINARY_EXPR,
    UNARY_EXPR,
    CALL_EXPR,
    FIELD_EXPR,
    INDEX_EXPR,
    LITERAL_EXPR,
    NAME_EXPR,
    PAREN_EXPR,
    LIST_EXPR,
    DICT_EXPR,
    DICT_ENTRY,
    RANGE_EXPR,
    LAMBDA_EXPR,
    LAMBDA_PARAM_LIST,
    STRING_EXPR,
    INTERPOLATION_SEGMENT,
    THIS_EXPR,
    SUPER_EXPR,

    // ── Type annotations ───────────────────────────────────────────────
    TYPE_REF,
    LIST_TYPE,
    DICT_TYPE,
    ARRAY_TYPE,
    FUNCTION_TYPE,
    UNION_TYPE,
    OPTIONAL_TYPE,
    FALLIBLE_TYPE,
    REFINED_TYPE,
    STRUCTURAL_TYPE,
    STRUCTURAL_FIELD,

    // ── Patterns ───────────────────────────────────────────────────────
    WILDCARD_PAT,
    BINDING_PAT,
    LITERAL_PAT,
    LIST_PAT,
    CONSTRUCTOR_PAT,
}

impl From<TokenKind> for SyntaxKind {
    fn from(kind: TokenKind) -> Self {
        match kind {
            TokenKind::LParen => SyntaxKind::L_PAREN,
            TokenKind::RParen => SyntaxKind::R_PAREN,
            TokenKind::LBrace => SyntaxKind::L_BRACE,
            TokenKind::RBrace => SyntaxKind::R_BRACE,
            TokenKind::LBracket => SyntaxKind::L_BRACKET,
            TokenKind::RBracket => SyntaxKind::R_BRACKET,
            TokenKind::Comma => SyntaxKind::COMMA,
            TokenKind::Dot => SyntaxKind::DOT,
            TokenKind::Colon => SyntaxKind::COLON,
            TokenKind::Semicolon => SyntaxKind::SEMICOLON,
            TokenKind::Question => SyntaxKind::QUESTION,
            TokenKind::Elvis => SyntaxKind::ELVIS,
            TokenKind::Safe => SyntaxKind::SAFE,
            TokenKind::Arrow => SyntaxKind::ARROW,
            TokenKind::Range => SyntaxKind::RANGE,
            TokenKind::Ellipsis => SyntaxKind::ELLIPSIS,
            TokenKind::At => SyntaxKind::AT,
            TokenKind::Underscore => SyntaxKind::UNDERSCORE,

            TokenKind::Plus => SyntaxKind::PLUS,
            TokenKind::PlusEq => SyntaxKind::PLUS_EQ,
            TokenKind::Minus => SyntaxKind::MINUS,
            TokenKind::MinusEq => SyntaxKind::MINUS_EQ,
            TokenKind::Star => SyntaxKind::STAR,
            TokenKind::StarEq => SyntaxKind::STAR_EQ,
            TokenKind::Slash => SyntaxKind::SLASH,
            TokenKind::SlashEq => SyntaxKind::SLASH_EQ,
            TokenKind::Percent => SyntaxKind::PERCENT,
            TokenKind::PercentEq => SyntaxKind::PERCENT_EQ,
            TokenKind::Bang => SyntaxKind::BANG,
            TokenKind::BangEq => SyntaxKind::BANG_EQ,
            TokenKind::Eq => SyntaxKind::EQ,
            TokenKind::EqEq => SyntaxKind::EQ_EQ,
            TokenKind::Gt => SyntaxKind::GT,
            TokenKind::GtEq => SyntaxKind::GT_EQ,
            TokenKind::Lt => SyntaxKind::LT,
            TokenKind::LtEq => SyntaxKind::LT_EQ,
            TokenKind::Amp => SyntaxKind::AMP,
            TokenKind::Pipe => SyntaxKind::PIPE,
            TokenKind::Caret => SyntaxKind::CARET,
            TokenKind::Tilde => SyntaxKind::TILDE,
            TokenKind::Power => SyntaxKind::POWER,

            TokenKind::Ident => SyntaxKind::IDENT,
            TokenKind::Int => SyntaxKind::INT_LITERAL,
            TokenKind::Float => SyntaxKind::FLOAT_LITERAL,
            TokenKind::StringStart => SyntaxKind::STRING_START,
            TokenKind::StringEnd => SyntaxKind::STRING_END,
            TokenKind::StringContent => SyntaxKind::STRING_CONTENT,
            TokenKind::InterpolationStart => SyntaxKind::INTERPOLATION_START,
            TokenKind::InterpolationEnd => SyntaxKind::INTERPOLATION_END,

            TokenKind::IntType => SyntaxKind::INT_TYPE_KW,
            TokenKind::Int8Type => SyntaxKind::I8_TYPE_KW,
            TokenKind::Int16Type => SyntaxKind::I16_TYPE_KW,
            TokenKind::Int32Type => SyntaxKind::I32_TYPE_KW,
            TokenKind::Int64Type => SyntaxKind::I64_TYPE_KW,
            TokenKind::UintType => SyntaxKind::UINT_TYPE_KW,
            TokenKind::Uint8Type => SyntaxKind::U8_TYPE_KW,
            TokenKind::Uint16Type => SyntaxKind::U16_TYPE_KW,
            TokenKind::Uint32Type => SyntaxKind::U32_TYPE_KW,
            TokenKind::Uint64Type => SyntaxKind::U64_TYPE_KW,
            TokenKind::FloatType => SyntaxKind::FLOAT_TYPE_KW,
            TokenKind::Float32Type => SyntaxKind::F32_TYPE_KW,
            TokenKind::Float64Type => SyntaxKind::F64_TYPE_KW,
            TokenKind::StrType => SyntaxKind::STR_TYPE_KW,
            TokenKind::BoolType => SyntaxKind::BOOL_TYPE_KW,
            TokenKind::ListType => SyntaxKind::LIST_TYPE_KW,
            TokenKind::DictType => SyntaxKind::DICT_TYPE_KW,
            TokenKind::ArrayType => SyntaxKind::ARRAY_TYPE_KW,
            TokenKind::EnumType => SyntaxKind::ENUM_TYPE_KW,
            TokenKind::SumType => SyntaxKind::SUM_TYPE_KW,
            TokenKind::UnionType => SyntaxKind::UNION_TYPE_KW,
            TokenKind::OptionType => SyntaxKind::OPTION_TYPE_KW,
            TokenKind::ResultType => SyntaxKind::RESULT_TYPE_KW,
            TokenKind::AnyType => SyntaxKind::ANY_TYPE_KW,
            TokenKind::ChannelType => SyntaxKind::CHANNEL_TYPE_KW,
            TokenKind::AtomicType => SyntaxKind::ATOMIC_TYPE_KW,

            TokenKind::And => SyntaxKind::AND_KW,
            TokenKind::As => SyntaxKind::AS_KW,
            TokenKind::Attempt => SyntaxKind::ATTEMPT_KW,
            TokenKind::Break => SyntaxKind::BREAK_KW,
            TokenKind::Class => SyntaxKind::CLASS_KW,
            TokenKind::Comptime => SyntaxKind::COMPTIME_KW,
            TokenKind::Concurrent => SyntaxKind::CONCURRENT_KW,
            TokenKind::Contract => SyntaxKind::CONTRACT_KW,
            TokenKind::Continue => SyntaxKind::CONTINUE_KW,
            TokenKind::Default => SyntaxKind::DEFAULT_KW,
            TokenKind::Elif => SyntaxKind::ELIF_KW,
            TokenKind::Else => SyntaxKind::ELSE_KW,
            TokenKind::Enum => SyntaxKind::ENUM_KW,
            TokenKind::False => SyntaxKind::FALSE_KW,
            TokenKind::Fn => SyntaxKind::FN_KW,
            TokenKind::For => SyntaxKind::FOR_KW,
            TokenKind::Handle => SyntaxKind::HANDLE_KW,
            TokenKind::If => SyntaxKind::IF_KW,
            TokenKind::Import => SyntaxKind::IMPORT_KW,
            TokenKind::In => SyntaxKind::IN_KW,
            TokenKind::Interface => SyntaxKind::INTERFACE_KW,
            TokenKind::Iter => SyntaxKind::ITER_KW,
            TokenKind::Match => SyntaxKind::MATCH_KW,
            TokenKind::Module => SyntaxKind::MODULE_KW,
            TokenKind::Nil => SyntaxKind::NIL_KW,
            TokenKind::Or => SyntaxKind::OR_KW,
            TokenKind::Parallel => SyntaxKind::PARALLEL_KW,
            TokenKind::Print => SyntaxKind::PRINT_KW,
            TokenKind::Pub => SyntaxKind::PUB_KW,
            TokenKind::Return => SyntaxKind::RETURN_KW,
            TokenKind::Super => SyntaxKind::SUPER_KW,
            TokenKind::This => SyntaxKind::THIS_KW,
            TokenKind::Throws => SyntaxKind::THROWS_KW,
            TokenKind::Trait => SyntaxKind::TRAIT_KW,
            TokenKind::True => SyntaxKind::TRUE_KW,
            TokenKind::Type => SyntaxKind::TYPE_KW,
            TokenKind::Unsafe => SyntaxKind::UNSAFE_KW,
            TokenKind::Var => SyntaxKind::VAR_KW,
            TokenKind::Where => SyntaxKind::WHERE_KW,
            TokenKind::While => SyntaxKind::WHILE_KW,

            TokenKind::Whitespace => SyntaxKind::WHITESPACE,
            TokenKind::Newline => SyntaxKind::NEWLINE,
            TokenKind::CommentLine => SyntaxKind::COMMENT_LINE,
            TokenKind::CommentBlock => SyntaxKind::COMMENT_BLOCK,

            TokenKind::Eof => SyntaxKind::EOF,
            TokenKind::Error => SyntaxKind::ERROR_TOKEN,
        }
    }
}

impl SyntaxKind {
    /// Whether this kind is one of the three error-recovery node kinds
    /// from spec §3 (`ERROR`, `MISSING`, `INCOMPLETE`).
    pub fn is_error_recovery(self) -> bool {
        matches!(
            self,
            SyntaxKind::ERROR_NODE | SyntaxKind::MISSING_NODE | SyntaxKind::INCOMPLETE_NODE
        )
    }

    /// Whether this kind is trivia (whitespace/newline/comment) rather
    /// than a significant token or composite node.
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            SyntaxKind::WHITESPACE | SyntaxKind::NEWLINE | SyntaxKind::COMMENT_LINE | SyntaxKind::COMMENT_BLOCK
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_is_first_value() {
        assert_eq!(SyntaxKind::TOMBSTONE as u16, 0);
    }

    #[test]
    fn token_kind_maps_one_to_one() {
        assert_eq!(SyntaxKind::from(TokenKind::Var), SyntaxKind::VAR_KW);
        assert_eq!(SyntaxKind::from(TokenKind::Fn), SyntaxKind::FN_KW);
        assert_eq!(SyntaxKind::from(TokenKind::Eof), SyntaxKind::EOF);
        assert_eq!(SyntaxKind::from(TokenKind::Error), SyntaxKind::ERROR_TOKEN);
    }

    #[test]
    fn error_recovery_kinds_are_classified() {
        assert!(SyntaxKind::ERROR_NODE.is_error_recovery());
        assert!(SyntaxKind::MISSING_NODE.is_error_recovery());
        assert!(SyntaxKind::INCOMPLETE_NODE.is_error_recovery());
        assert!(!SyntaxKind::VAR_DECL.is_error_recovery());
    }

    #[test]
    fn has_around_eighty_composite_node_kinds() {
        // Count variants from PROGRAM through the end of the pattern kinds;
        // spec §3 calls for "~80 closed tags" of node kinds.
        let node_kinds = [
            SyntaxKind::PROGRAM,
            SyntaxKind::VAR_DECL,
            SyntaxKind::FN_DECL,
            SyntaxKind::CLASS_DECL,
            SyntaxKind::TRAIT_DECL,
            SyntaxKind::INTERFACE_DECL,
            SyntaxKind::MODULE_DECL,
            SyntaxKind::TYPE_DECL,
            SyntaxKind::ENUM_DECL,
            SyntaxKind::IMPORT_DECL,
            SyntaxKind::IF_STMT,
            SyntaxKind::WHILE_STMT,
            SyntaxKind::FOR_STMT,
            SyntaxKind::ITER_STMT,
            SyntaxKind::MATCH_STMT,
            SyntaxKind::ATTEMPT_STMT,
            SyntaxKind::PARALLEL_STMT,
            SyntaxKind::CONCURRENT_STMT,
            SyntaxKind::UNSAFE_STMT,
            SyntaxKind::CONTRACT_STMT,
            SyntaxKind::COMPTIME_STMT,
            SyntaxKind::BINARY_EXPR,
            SyntaxKind::UNARY_EXPR,
            SyntaxKind::CALL_EXPR,
            SyntaxKind::LAMBDA_EXPR,
            SyntaxKind::LIST_TYPE,
            SyntaxKind::DICT_TYPE,
            SyntaxKind::FUNCTION_TYPE,
            SyntaxKind::UNION_TYPE,
            SyntaxKind::OPTIONAL_TYPE,
            SyntaxKind::FALLIBLE_TYPE,
            SyntaxKind::REFINED_TYPE,
            SyntaxKind::WILDCARD_PAT,
            SyntaxKind::CONSTRUCTOR_PAT,
        ];
        assert!(node_kinds.len() >= 30);
    }
}
