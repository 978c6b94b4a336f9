//! Token information produced by the tokenizer.

use std::fmt;

use letter_ast::syntax_kind::TokenKind;
use letter_core::text::TextSpan;

/// A scanned token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The kind of token.
    pub kind: TokenKind,
    /// The exact source text the token was scanned from.
    pub value: String,
    /// Start position in the source text.
    pub pos: u32,
    /// End position in the source text (exclusive).
    pub end: u32,
}

impl Token {
    pub fn new(kind: TokenKind, value: impl Into<String>, pos: u32, end: u32) -> Self {
        Self {
            kind,
            value: value.into(),
            pos,
            end,
        }
    }

    /// The length of this token in bytes.
    pub fn len(&self) -> u32 {
        self.end - self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.pos == self.end
    }

    pub fn span(&self) -> TextSpan {
        TextSpan::from_bounds(self.pos, self.end)
    }
}

impl fmt::Display for Token {
    /// `KIND value`, as printed by token dumps.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.value)
    }
}
