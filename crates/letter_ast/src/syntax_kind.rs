//! TokenKind enum - every token kind the tokenizer can produce.
//!
//! Operators are grouped by precedence class rather than by spelling: the
//! parser dispatches on the class and keeps the spelling as the token value.

use std::fmt;

/// The kind of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum TokenKind {
    // ========================================================================
    // Punctuation
    // ========================================================================
    Semicolon,
    OpenBrace,
    CloseBrace,
    OpenParen,
    CloseParen,
    OpenBracket,
    CloseBracket,
    Comma,
    Dot,

    // ========================================================================
    // Operator classes
    // ========================================================================
    /// `<`, `>`, `<=`, `>=`
    RelationalOperator,
    /// `==`, `!=`
    EqualityOperator,
    LogicalAnd,
    LogicalOr,
    LogicalNot,
    /// `=`
    SimpleAssign,
    /// `*=`, `/=`, `+=`, `-=`
    ComplexAssign,
    /// `+`, `-`
    AdditiveOperator,
    /// `*`, `/`
    MultiplicativeOperator,

    // ========================================================================
    // Keywords
    // ========================================================================
    LetKeyword,
    IfKeyword,
    ElseKeyword,
    TrueKeyword,
    FalseKeyword,
    NullKeyword,
    ClassKeyword,
    ThisKeyword,
    ExtendsKeyword,
    SuperKeyword,
    NewKeyword,
    WhileKeyword,
    DoKeyword,
    ForKeyword,
    DefKeyword,
    ReturnKeyword,

    // ========================================================================
    // Literals and names
    // ========================================================================
    Number,
    String,
    Identifier,
}

impl TokenKind {
    /// The canonical display name of the kind, as shown in token dumps and
    /// error messages.
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::RelationalOperator => "RELATIONAL_OPERATOR",
            TokenKind::EqualityOperator => "EQUALITY_OPERATOR",
            TokenKind::LogicalAnd => "LOGICAL_AND",
            TokenKind::LogicalOr => "LOGICAL_OR",
            TokenKind::LogicalNot => "LOGICAL_NOT",
            TokenKind::SimpleAssign => "SIMPLE_ASSIGN",
            TokenKind::ComplexAssign => "COMPLEX_ASSIGN",
            TokenKind::AdditiveOperator => "ADDITIVE_OPERATOR",
            TokenKind::MultiplicativeOperator => "MULTIPLICATIVE_OPERATOR",
            TokenKind::Number => "NUMBER",
            TokenKind::String => "STRING",
            TokenKind::Identifier => "IDENTIFIER",
            _ => self
                .punctuation_text()
                .or_else(|| self.keyword_text())
                .unwrap_or("UNKNOWN"),
        }
    }

    pub fn punctuation_text(self) -> Option<&'static str> {
        match self {
            TokenKind::Semicolon => Some(";"),
            TokenKind::OpenBrace => Some("{"),
            TokenKind::CloseBrace => Some("}"),
            TokenKind::OpenParen => Some("("),
            TokenKind::CloseParen => Some(")"),
            TokenKind::OpenBracket => Some("["),
            TokenKind::CloseBracket => Some("]"),
            TokenKind::Comma => Some(","),
            TokenKind::Dot => Some("."),
            _ => None,
        }
    }

    pub fn keyword_text(self) -> Option<&'static str> {
        match self {
            TokenKind::LetKeyword => Some("let"),
            TokenKind::IfKeyword => Some("if"),
            TokenKind::ElseKeyword => Some("else"),
            TokenKind::TrueKeyword => Some("true"),
            TokenKind::FalseKeyword => Some("false"),
            TokenKind::NullKeyword => Some("null"),
            TokenKind::ClassKeyword => Some("class"),
            TokenKind::ThisKeyword => Some("this"),
            TokenKind::ExtendsKeyword => Some("extends"),
            TokenKind::SuperKeyword => Some("super"),
            TokenKind::NewKeyword => Some("new"),
            TokenKind::WhileKeyword => Some("while"),
            TokenKind::DoKeyword => Some("do"),
            TokenKind::ForKeyword => Some("for"),
            TokenKind::DefKeyword => Some("def"),
            TokenKind::ReturnKeyword => Some("return"),
            _ => None,
        }
    }

    #[inline]
    pub fn is_keyword(self) -> bool {
        self.keyword_text().is_some()
    }

    #[inline]
    pub fn is_punctuation(self) -> bool {
        self.punctuation_text().is_some()
    }

    #[inline]
    pub fn is_assignment_operator(self) -> bool {
        matches!(self, TokenKind::SimpleAssign | TokenKind::ComplexAssign)
    }

    /// Whether a token of this kind starts a literal expression.
    #[inline]
    pub fn is_literal(self) -> bool {
        matches!(
            self,
            TokenKind::Number
                | TokenKind::String
                | TokenKind::TrueKeyword
                | TokenKind::FalseKeyword
                | TokenKind::NullKeyword
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
