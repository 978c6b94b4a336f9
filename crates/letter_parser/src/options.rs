//! Parser configuration.

use serde::Deserialize;

/// Default limit on the nesting depth of a parse.
///
/// Sized so that an unoptimized build fits within a 2 MiB thread stack.
pub const DEFAULT_MAX_DEPTH: u32 = 100;

/// Options controlling a [`Parser`](crate::Parser).
///
/// Deserializable so that drivers can load it from their own configuration;
/// missing fields take their default values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ParserOptions {
    /// Maximum depth before the parse fails with a syntax error. Nested
    /// statements, assignments, unary operators and `new` each count one level,
    /// as does every link of a binary, member or call chain.
    pub max_depth: u32,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ParserOptions {
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        assert_eq!(ParserOptions::default().max_depth, DEFAULT_MAX_DEPTH);
        assert_eq!(ParserOptions::default().with_max_depth(8).max_depth, 8);
    }

    #[test]
    fn test_deserialize_options() {
        let options: ParserOptions = serde_json::from_str(r#"{ "max_depth": 64 }"#).unwrap();
        assert_eq!(options.max_depth, 64);

        let options: ParserOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, ParserOptions::default());
    }
}
