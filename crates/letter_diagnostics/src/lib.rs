//! letter_diagnostics: Diagnostic messages and the front-end error type.
//!
//! Every message the tokenizer or parser can emit lives in [`messages`] as a
//! template with a stable code. A [`ParseError`] is a realized message plus
//! the span it refers to. There is no warning tier: the first error aborts
//! the parse and is handed back to the caller.

use letter_core::text::TextSpan;
use miette::SourceSpan;
use std::fmt;

/// Which stage of the front end raised a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticCategory {
    Lexical,
    Syntax,
}

impl fmt::Display for DiagnosticCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticCategory::Lexical => write!(f, "lexical error"),
            DiagnosticCategory::Syntax => write!(f, "syntax error"),
        }
    }
}

/// A diagnostic message template with a code and category.
#[derive(Debug, Clone)]
pub struct DiagnosticMessage {
    /// The diagnostic code (1xxx lexical, 2xxx syntax).
    pub code: u32,
    pub category: DiagnosticCategory,
    /// The message template string. May contain `{0}`, `{1}`, etc. placeholders.
    pub message: &'static str,
}

/// Format a diagnostic message template by replacing `{0}`, `{1}`, etc. with arguments.
///
/// The template is scanned once; argument text is copied verbatim and never
/// searched for placeholders. A placeholder with no matching argument is kept.
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        result.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let placeholder = after.find('}').and_then(|close| {
            let index: usize = after[..close].parse().ok()?;
            Some((*args.get(index)?, close))
        });
        match placeholder {
            Some((arg, close)) => {
                result.push_str(arg);
                rest = &after[close + 1..];
            }
            None => {
                result.push('{');
                rest = after;
            }
        }
    }
    result.push_str(rest);
    result
}

/// The error produced by the tokenizer or the parser.
///
/// Both variants are fatal for the current parse. The span always points
/// into the source text that was handed to the tokenizer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, miette::Diagnostic)]
pub enum ParseError {
    /// No tokenizer rule matched at the cursor.
    #[error("{text}")]
    #[diagnostic(code(letter::lexical))]
    Lexical {
        text: String,
        code: u32,
        /// The offending character.
        ch: char,
        #[label("no token starts here")]
        span: SourceSpan,
    },

    /// The parser met a token (or the end of input) that the current
    /// production does not allow.
    #[error("{text}")]
    #[diagnostic(code(letter::syntax))]
    Syntax {
        text: String,
        code: u32,
        #[label("here")]
        span: SourceSpan,
    },
}

impl ParseError {
    /// Build a lexical error for the character `ch` found at byte offset `pos`.
    pub fn lexical(ch: char, pos: u32) -> Self {
        let ch_text = ch.to_string();
        let pos_text = pos.to_string();
        let message = &messages::UNEXPECTED_CHARACTER_0_AT_1;
        ParseError::Lexical {
            text: format_message(message.message, &[&ch_text, &pos_text]),
            code: message.code,
            ch,
            span: to_source_span(TextSpan::new(pos, ch.len_utf8() as u32)),
        }
    }

    /// Build a syntax error from a message template.
    pub fn syntax(message: &DiagnosticMessage, args: &[&str], span: TextSpan) -> Self {
        debug_assert_eq!(message.category, DiagnosticCategory::Syntax);
        ParseError::Syntax {
            text: format_message(message.message, args),
            code: message.code,
            span: to_source_span(span),
        }
    }

    pub fn category(&self) -> DiagnosticCategory {
        match self {
            ParseError::Lexical { .. } => DiagnosticCategory::Lexical,
            ParseError::Syntax { .. } => DiagnosticCategory::Syntax,
        }
    }

    /// The numeric diagnostic code, e.g. `2003`.
    pub fn code(&self) -> u32 {
        match self {
            ParseError::Lexical { code, .. } | ParseError::Syntax { code, .. } => *code,
        }
    }

    /// The resolved message text.
    pub fn message(&self) -> &str {
        match self {
            ParseError::Lexical { text, .. } | ParseError::Syntax { text, .. } => text,
        }
    }

    /// The byte span of source text this error refers to.
    pub fn span(&self) -> TextSpan {
        let span = match self {
            ParseError::Lexical { span, .. } | ParseError::Syntax { span, .. } => span,
        };
        TextSpan::new(span.offset() as u32, span.len() as u32)
    }

    pub fn is_lexical(&self) -> bool {
        matches!(self, ParseError::Lexical { .. })
    }

    pub fn is_syntax(&self) -> bool {
        matches!(self, ParseError::Syntax { .. })
    }
}

fn to_source_span(span: TextSpan) -> SourceSpan {
    SourceSpan::new((span.start as usize).into(), span.length as usize)
}

// ============================================================================
// Diagnostic Messages
// ============================================================================

pub mod messages {
    use super::*;

    macro_rules! diag {
        ($code:expr, Lexical, $msg:expr) => {
            DiagnosticMessage { code: $code, category: DiagnosticCategory::Lexical, message: $msg }
        };
        ($code:expr, Syntax, $msg:expr) => {
            DiagnosticMessage { code: $code, category: DiagnosticCategory::Syntax, message: $msg }
        };
    }

    // ========================================================================
    // Tokenizer errors (1000-1099)
    // ========================================================================
    pub const UNEXPECTED_CHARACTER_0_AT_1: DiagnosticMessage = diag!(1001, Lexical, "Unexpected token: \"{0}\" at position {1}");

    // ========================================================================
    // Parser errors (2000-2099)
    // ========================================================================
    pub const UNEXPECTED_END_OF_INPUT_EXPECTED_0: DiagnosticMessage = diag!(2001, Syntax, "Unexpected end of input, expected: \"{0}\"");
    pub const UNEXPECTED_TOKEN_0_EXPECTED_1: DiagnosticMessage = diag!(2002, Syntax, "Unexpected token: \"{0}\", expected: \"{1}\"");
    pub const INVALID_LEFT_HAND_SIDE_IN_ASSIGNMENT: DiagnosticMessage = diag!(2003, Syntax, "Invalid left-hand side in assignment expression");
    pub const UNEXPECTED_PRIMARY_EXPRESSION_0: DiagnosticMessage = diag!(2004, Syntax, "Unexpected primary expression: \"{0}\"");
    pub const MAXIMUM_NESTING_DEPTH_OF_0_EXCEEDED: DiagnosticMessage = diag!(2005, Syntax, "Maximum nesting depth of {0} exceeded");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_message() {
        let text = format_message("Unexpected token: \"{0}\", expected: \"{1}\"", &["}", ";"]);
        assert_eq!(text, "Unexpected token: \"}\", expected: \";\"");
    }

    #[test]
    fn test_format_message_does_not_expand_arguments() {
        let text = format_message("Unexpected token: {0}, expected: {1}", &["\"{1}\"", ";"]);
        assert_eq!(text, "Unexpected token: \"{1}\", expected: ;");

        assert_eq!(format_message("{0}{0}", &["{0}"]), "{0}{0}");
        assert_eq!(format_message("{2} and {x} and {", &["a"]), "{2} and {x} and {");
        assert_eq!(format_message("depth {0}", &["100"]), "depth 100");
    }

    #[test]
    fn test_lexical_error() {
        let err = ParseError::lexical('@', 4);
        assert!(err.is_lexical());
        assert_eq!(err.code(), 1001);
        assert_eq!(err.category(), DiagnosticCategory::Lexical);
        assert_eq!(err.span(), TextSpan::new(4, 1));
        assert_eq!(err.to_string(), "Unexpected token: \"@\" at position 4");
    }

    #[test]
    fn test_syntax_error() {
        let err = ParseError::syntax(
            &messages::UNEXPECTED_TOKEN_0_EXPECTED_1,
            &["}", ";"],
            TextSpan::new(10, 1),
        );
        assert!(err.is_syntax());
        assert_eq!(err.code(), 2002);
        assert_eq!(err.message(), "Unexpected token: \"}\", expected: \";\"");
        assert_eq!(err.span().start, 10);
    }

    #[test]
    fn test_miette_code() {
        use miette::Diagnostic;

        let err = ParseError::syntax(&messages::INVALID_LEFT_HAND_SIDE_IN_ASSIGNMENT, &[], TextSpan::new(0, 1));
        let code = Diagnostic::code(&err).map(|c| c.to_string());
        assert_eq!(code.as_deref(), Some("letter::syntax"));
    }
}
