//! letter_parser: Recursive descent parser for Letter.
//!
//! Pulls tokens from the tokenizer with one token of lookahead and builds an
//! owned AST. The first lexical or syntax error aborts the parse.

mod options;
mod parser;
mod precedence;
mod utilities;

pub use options::{ParserOptions, DEFAULT_MAX_DEPTH};
pub use parser::{parse, Parser};
