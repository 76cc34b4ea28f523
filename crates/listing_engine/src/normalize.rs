//! Conversion of raw display text into typed values.
//!
//! All locale-dependent parsing lives here: the rest of the crawler only sees
//! numbers and trimmed strings. Every function returns `None` for input it
//! cannot interpret.

/// Characters used as digit-grouping separators in the integer part of a price.
const GROUPING_SEPARATORS: [char; 6] = [',', '.', ' ', '\u{a0}', '\u{202f}', '\''];

/// Recombines a price split into its integer and fractional text nodes.
pub fn parse_price(whole: &str, fraction: &str) -> Option<f64> {
    let whole: String = whole
        .trim()
        .chars()
        .filter(|c| !GROUPING_SEPARATORS.contains(c))
        .collect();
    let fraction = fraction.trim();
    if !is_digits(&whole) || !is_digits(fraction) {
        return None;
    }
    format!("{whole}.{fraction}")
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Reads the leading score out of text like `4,5 out of 5 stars`.
pub fn parse_rating(raw: &str) -> Option<f64> {
    let token = raw.split_whitespace().next()?;
    token
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Trims a field that may be missing. Present-but-blank stays present.
pub fn trim_or_none(text: Option<&str>) -> Option<String> {
    text.map(|t| t.trim().to_string())
}

fn is_digits(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| c.is_ascii_digit())
}
