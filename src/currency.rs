//! Free-text place name to ISO currency code resolution.

/// Place-name substrings mapped to 3-letter currency codes.
///
/// Matching is substring containment in table order, so overlapping keys
/// resolve to whichever entry appears first. A place string that merely
/// embeds a shorter key (e.g. a country name inside a longer phrase) can
/// mis-resolve; first-match-wins is the intended tie-break, not a
/// longest-match rule.
pub const CURRENCY_TABLE: &[(&str, &str)] = &[
    ("india", "INR"),
    ("ind", "INR"),
    ("saudi", "SAR"),
    ("saudi arabia", "SAR"),
    ("kingdom", "SAR"),
    ("uae", "AED"),
    ("united arab emirates", "AED"),
    ("united states", "USD"),
    ("usa", "USD"),
    ("us", "USD"),
    ("america", "USD"),
    ("canada", "CAD"),
    ("australia", "AUD"),
    ("uk", "GBP"),
    ("united kingdom", "GBP"),
    ("germany", "EUR"),
    ("france", "EUR"),
    ("europe", "EUR"),
    ("japan", "JPY"),
    ("china", "CNY"),
    ("pakistan", "PKR"),
    ("bahrain", "BHD"),
    ("qatar", "QAR"),
    ("oman", "OMR"),
];

/// Fallback when the place is empty or matches no table entry.
pub const DEFAULT_CURRENCY: &str = "USD";

/// Resolves a free-text place name to a currency code.
pub fn detect_currency_code(place: &str) -> &'static str {
    let p = place.trim().to_lowercase();
    if p.is_empty() {
        return DEFAULT_CURRENCY;
    }
    for (key, code) in CURRENCY_TABLE {
        if p.contains(key) {
            return code;
        }
    }
    DEFAULT_CURRENCY
}
