//! letter_ast: Abstract Syntax Tree definitions for the Letter language.
//!
//! This crate defines the token kinds produced by the tokenizer, every AST
//! node type the parser builds, and a visitor for walking finished trees.
//! Nodes implement `serde::Serialize` in the JSON shape external tooling
//! consumes.

pub mod node;
pub mod syntax_kind;
pub mod visitor;

// Re-export key types
pub use node::*;
pub use syntax_kind::TokenKind;
pub use visitor::{AstVisitor, NodeCounter};
