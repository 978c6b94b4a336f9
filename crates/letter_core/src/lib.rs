//! letter_core: Shared source-text utilities for the Letter front end.
//!
//! Provides byte spans over source text and the line map used to turn a
//! byte offset into a human-readable line/column for error messages.

pub mod text;

pub use text::{LineMap, SourceLocation, TextPos, TextSpan};
