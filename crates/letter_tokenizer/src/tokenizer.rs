//! The Letter tokenizer.
//!
//! Tokens are produced on demand from an ordered rule table. Each rule is a
//! regular expression anchored at the cursor; the first rule that matches a
//! non-empty prefix of the remaining text wins, so the order of the table
//! is the precedence between overlapping patterns:
//!
//! - trivia (whitespace and comments) comes first and is skipped;
//! - `==`/`!=` are tried before `!` and `=`;
//! - keywords carry `\b` on both sides and are tried before identifiers, so
//!   `let` is a keyword while `letter` is one identifier;
//! - compound assignments are tried before the arithmetic operators they
//!   start with.

use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, trace};

use crate::token::Token;
use letter_ast::syntax_kind::TokenKind;
use letter_diagnostics::ParseError;

/// A tokenizer rule: a pattern anchored at the cursor and the kind it
/// produces, or `None` for trivia that is skipped.
struct Rule {
    pattern: Regex,
    kind: Option<TokenKind>,
}

const RULE_TABLE: &[(&str, Option<TokenKind>)] = &[
    // --------------------------------------------------------------------
    // Trivia
    // --------------------------------------------------------------------
    (r"^\s+", None),
    (r"^//.*", None),
    (r"^/\*[\s\S]*?\*/", None),
    // --------------------------------------------------------------------
    // Punctuation
    // --------------------------------------------------------------------
    (r"^;", Some(TokenKind::Semicolon)),
    (r"^\{", Some(TokenKind::OpenBrace)),
    (r"^\}", Some(TokenKind::CloseBrace)),
    (r"^\(", Some(TokenKind::OpenParen)),
    (r"^\)", Some(TokenKind::CloseParen)),
    (r"^\[", Some(TokenKind::OpenBracket)),
    (r"^\]", Some(TokenKind::CloseBracket)),
    (r"^,", Some(TokenKind::Comma)),
    (r"^\.", Some(TokenKind::Dot)),
    // --------------------------------------------------------------------
    // Relational, equality and logical operators
    // --------------------------------------------------------------------
    (r"^[<>]=?", Some(TokenKind::RelationalOperator)),
    (r"^[=!]=", Some(TokenKind::EqualityOperator)),
    (r"^&&", Some(TokenKind::LogicalAnd)),
    (r"^\|\|", Some(TokenKind::LogicalOr)),
    (r"^!", Some(TokenKind::LogicalNot)),
    // --------------------------------------------------------------------
    // Keywords
    // --------------------------------------------------------------------
    (r"^\blet\b", Some(TokenKind::LetKeyword)),
    (r"^\bif\b", Some(TokenKind::IfKeyword)),
    (r"^\belse\b", Some(TokenKind::ElseKeyword)),
    (r"^\btrue\b", Some(TokenKind::TrueKeyword)),
    (r"^\bfalse\b", Some(TokenKind::FalseKeyword)),
    (r"^\bnull\b", Some(TokenKind::NullKeyword)),
    (r"^\bclass\b", Some(TokenKind::ClassKeyword)),
    (r"^\bthis\b", Some(TokenKind::ThisKeyword)),
    (r"^\bextends\b", Some(TokenKind::ExtendsKeyword)),
    (r"^\bsuper\b", Some(TokenKind::SuperKeyword)),
    (r"^\bnew\b", Some(TokenKind::NewKeyword)),
    (r"^\bwhile\b", Some(TokenKind::WhileKeyword)),
    (r"^\bdo\b", Some(TokenKind::DoKeyword)),
    (r"^\bfor\b", Some(TokenKind::ForKeyword)),
    (r"^\bdef\b", Some(TokenKind::DefKeyword)),
    (r"^\breturn\b", Some(TokenKind::ReturnKeyword)),
    // --------------------------------------------------------------------
    // Assignment and arithmetic operators
    // --------------------------------------------------------------------
    (r"^[*/+\-]=", Some(TokenKind::ComplexAssign)),
    (r"^=", Some(TokenKind::SimpleAssign)),
    (r"^[+\-]", Some(TokenKind::AdditiveOperator)),
    (r"^[*/]", Some(TokenKind::MultiplicativeOperator)),
    // --------------------------------------------------------------------
    // Literals and identifiers
    // --------------------------------------------------------------------
    // Digits and word characters are ASCII only; `\d` and `\w` would accept
    // any Unicode digit or letter.
    (r"^[0-9]+", Some(TokenKind::Number)),
    (r#"^"[^"]*""#, Some(TokenKind::String)),
    (r"^'[^']*'", Some(TokenKind::String)),
    (r"^[A-Za-z0-9_]+", Some(TokenKind::Identifier)),
];

lazy_static! {
    static ref RULES: Vec<Rule> = RULE_TABLE
        .iter()
        .map(|&(pattern, kind)| Rule {
            pattern: Regex::new(pattern).expect("tokenizer rule patterns are valid regexes"),
            kind,
        })
        .collect();
}

/// The tokenizer converts Letter source text into tokens, one per call.
#[derive(Debug, Clone, Default)]
pub struct Tokenizer {
    /// The source text being scanned.
    source: String,
    /// Byte offset of the next unscanned character.
    cursor: usize,
}

impl Tokenizer {
    /// Create a tokenizer with no input. Call [`Tokenizer::init`] before scanning.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a tokenizer already initialized with `source`.
    pub fn with_source(source: &str) -> Self {
        let mut tokenizer = Self::new();
        tokenizer.init(source);
        tokenizer
    }

    /// Start scanning `source` from the beginning.
    pub fn init(&mut self, source: &str) {
        self.source.clear();
        self.source.push_str(source);
        self.cursor = 0;
    }

    /// Whether any input (possibly only trivia) is left to scan.
    #[inline]
    pub fn has_more_tokens(&self) -> bool {
        self.cursor < self.source.len()
    }

    /// Whether the cursor has reached the end of the input.
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.cursor == self.source.len()
    }

    /// The byte offset of the next unscanned character.
    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[inline]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Scan the next token.
    ///
    /// Returns `Ok(None)` once the input is exhausted; trailing trivia is
    /// consumed silently. Fails with a lexical error when no rule matches at
    /// the cursor, leaving the cursor on the offending character.
    pub fn get_next_token(&mut self) -> Result<Option<Token>, ParseError> {
        loop {
            if !self.has_more_tokens() {
                return Ok(None);
            }

            let rest = &self.source[self.cursor..];
            let matched = RULES.iter().find_map(|rule| {
                rule.pattern
                    .find(rest)
                    .filter(|m| !m.is_empty())
                    .map(|m| (rule.kind, m.end()))
            });

            match matched {
                Some((None, len)) => {
                    self.cursor += len;
                }
                Some((Some(kind), len)) => {
                    let value = &rest[..len];
                    let pos = self.cursor as u32;
                    let token = Token::new(kind, value, pos, pos + len as u32);
                    self.cursor += len;
                    trace!(kind = %token.kind, value = %token.value, pos, "token");
                    return Ok(Some(token));
                }
                None => {
                    let ch = rest.chars().next().unwrap_or('\0');
                    let err = ParseError::lexical(ch, self.cursor as u32);
                    debug!(error = %err, "no tokenizer rule matched");
                    return Err(err);
                }
            }
        }
    }
}

/// Scan all of `source` with a fresh tokenizer.
///
/// This is the diagnostic token dump; the parser pulls tokens one at a time
/// instead.
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn tokenize(source: &str) -> Result<Vec<Token>, ParseError> {
    let mut tokenizer = Tokenizer::with_source(source);
    let mut tokens = Vec::new();
    while let Some(token) = tokenizer.get_next_token()? {
        tokens.push(token);
    }
    Ok(tokens)
}
