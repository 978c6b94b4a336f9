//! letter_tokenizer: Lexer for Letter source code.
//!
//! Scans source text on demand, one token per call, using an ordered table
//! of anchored regular expressions. Whitespace, `//` line comments and
//! `/* */` block comments are skipped.

mod token;
mod tokenizer;

pub use token::Token;
pub use tokenizer::{tokenize, Tokenizer};
