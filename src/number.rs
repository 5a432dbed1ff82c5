//! Tolerant numeric parsing for model-produced price strings.
//!
//! Generative output mixes plain numbers with currency symbols, thousands
//! separators and "low - high" ranges. Everything funnels through
//! [`parse_number`], which never fails: unparseable input resolves to 0.0.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

/// Matches a "low - high" price range (dash or en-dash), each bound a digit
/// sequence possibly containing separators.
static RANGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d[\d,\.]*)\s*[-–]\s*(\d[\d,\.]*)").unwrap());

/// Everything that is not a digit, dot or comma.
static NON_NUMERIC_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\d\.,]").unwrap());

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Parses an arbitrary JSON value as a price.
///
/// Numbers pass through as-is; strings go through the tolerant string path;
/// null and anything unparseable resolve to 0.0.
pub fn parse_number(value: &Value) -> f64 {
    match value {
        Value::Null => 0.0,
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::Bool(b) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        Value::String(s) => parse_number_str(s),
        other => parse_number_str(&other.to_string()),
    }
}

/// Parses a free-text price representation.
///
/// A "low - high" range resolves to the arithmetic mean of its bounds.
/// Otherwise the string is reduced to digits, dots and commas, commas are
/// dropped as thousands separators, and the remainder is parsed as a float.
/// The result is rounded to 2 decimals; failures resolve to 0.0.
pub fn parse_number_str(raw: &str) -> f64 {
    let s = raw.trim();
    if s.is_empty() {
        return 0.0;
    }

    if let Some(caps) = RANGE_RE.captures(s) {
        let low = caps[1].replace(',', "").parse::<f64>();
        let high = caps[2].replace(',', "").parse::<f64>();
        return match (low, high) {
            (Ok(a), Ok(b)) => round2((a + b) / 2.0),
            _ => 0.0,
        };
    }

    let cleaned = NON_NUMERIC_RE.replace_all(s, "");
    if cleaned.is_empty() {
        return 0.0;
    }

    // Commas are always thousands separators here; a string left with more
    // than one dot (e.g. "3.5.2") simply fails to parse and resolves to 0.0.
    cleaned
        .replace(',', "")
        .parse::<f64>()
        .map(round2)
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plain_numbers_pass_through() {
        assert_eq!(parse_number(&json!(1200)), 1200.0);
        assert_eq!(parse_number(&json!(99.99)), 99.99);
        assert_eq!(parse_number(&Value::Null), 0.0);
    }

    #[test]
    fn test_currency_contaminated_strings() {
        assert_eq!(parse_number_str("$1,200.50"), 1200.50);
        assert_eq!(parse_number_str("$2,500.75"), 2500.75);
        assert_eq!(parse_number_str("AED 3,000"), 3000.0);
    }

    #[test]
    fn test_ranges_resolve_to_mean() {
        assert_eq!(parse_number_str("15,000 - 18,000"), 16500.0);
        assert_eq!(parse_number_str("15,000-18,000"), 16500.0);
        assert_eq!(parse_number_str("1,000–1,200"), 1100.0);
        assert_eq!(parse_number_str("approx. 500 - 700 per unit"), 600.0);
    }

    #[test]
    fn test_unparseable_input_is_zero() {
        assert_eq!(parse_number_str(""), 0.0);
        assert_eq!(parse_number_str("   "), 0.0);
        assert_eq!(parse_number_str("abc"), 0.0);
        assert_eq!(parse_number_str("3.5.2"), 0.0);
    }

    #[test]
    fn test_rounding() {
        assert_eq!(parse_number_str("10.006"), 10.01);
        assert_eq!(parse_number_str("1,234.567"), 1234.57);
    }
}
