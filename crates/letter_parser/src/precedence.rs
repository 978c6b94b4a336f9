//! Binary operator precedence.

use letter_ast::syntax_kind::TokenKind;

/// Binary precedence levels, from loosest to tightest binding.
///
/// Each level owns exactly one operator token kind and left-folds operands
/// parsed at the next tighter level. Below [`BinaryPrecedence::Multiplicative`]
/// come the unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum BinaryPrecedence {
    LogicalOr,
    LogicalAnd,
    Equality,
    Relational,
    Additive,
    Multiplicative,
}

impl BinaryPrecedence {
    /// The loosest binary level; the operand of an assignment.
    pub const LOWEST: BinaryPrecedence = BinaryPrecedence::LogicalOr;

    /// The token kind whose operators belong to this level.
    pub fn operator_kind(self) -> TokenKind {
        match self {
            BinaryPrecedence::LogicalOr => TokenKind::LogicalOr,
            BinaryPrecedence::LogicalAnd => TokenKind::LogicalAnd,
            BinaryPrecedence::Equality => TokenKind::EqualityOperator,
            BinaryPrecedence::Relational => TokenKind::RelationalOperator,
            BinaryPrecedence::Additive => TokenKind::AdditiveOperator,
            BinaryPrecedence::Multiplicative => TokenKind::MultiplicativeOperator,
        }
    }

    /// The next tighter binary level, or `None` when operands are unary expressions.
    pub fn tighter(self) -> Option<BinaryPrecedence> {
        match self {
            BinaryPrecedence::LogicalOr => Some(BinaryPrecedence::LogicalAnd),
            BinaryPrecedence::LogicalAnd => Some(BinaryPrecedence::Equality),
            BinaryPrecedence::Equality => Some(BinaryPrecedence::Relational),
            BinaryPrecedence::Relational => Some(BinaryPrecedence::Additive),
            BinaryPrecedence::Additive => Some(BinaryPrecedence::Multiplicative),
            BinaryPrecedence::Multiplicative => None,
        }
    }

    /// `&&` and `||` build logical nodes; every other level builds binary nodes.
    pub fn is_logical(self) -> bool {
        matches!(self, BinaryPrecedence::LogicalOr | BinaryPrecedence::LogicalAnd)
    }
}
