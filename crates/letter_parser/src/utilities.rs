//! Literal value conversion.

/// The numeric value of a `NUMBER` token, or `None` if `text` is not a run
/// of ASCII digits.
///
/// Runs too long for an `f64` saturate to infinity.
pub fn numeric_literal_value(text: &str) -> Option<f64> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse::<f64>().ok()
}

/// The value of a `STRING` token: the text between the quotes, verbatim.
pub fn string_literal_value(text: &str) -> &str {
    let mut chars = text.chars();
    chars.next();
    chars.next_back();
    chars.as_str()
}
