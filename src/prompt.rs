//! Prompt construction for the cost-breakdown request and its corrective
//! follow-up. Pure string building, no I/O.

use crate::report::CATEGORY_KEYS;

/// Builds the fixed-schema instruction for a product/market cost breakdown.
///
/// The embedded JSON schema names all five category objects explicitly so
/// the model has no room to invent its own grouping.
pub fn build_breakdown_prompt(product_name: &str, place: &str, currency_code: &str) -> String {
    let categories_schema = CATEGORY_KEYS
        .iter()
        .map(|(key, _)| {
            format!(
                "\"{}\": {{ \"items\": [{{\"name\":\"string\",\"specs\":\"string\",\"quantity\":1,\"price\":0}}], \"subtotal\": 0 }}",
                key
            )
        })
        .collect::<Vec<_>>()
        .join(",\n  ");

    format!(
        r#"
You are a helpful assistant. Provide EXACTLY one JSON object (no extra text) that follows this schema:
{{
  "product": "string",
  "currency": "{currency_code}",
  {categories_schema},
  "grand_total": 0
}}

Task: For product "{product_name}" and market "{place}", produce a breakdown for each of the five strategic categories:
- Vision 2030 & Global Event Diplomacy -> key localization, branding, partnerships (vision_2030)
- Financial Modeling -> hardware, software, installation, testing (financial_modeling)
- Government Relations -> legal, licensing, permits, compliance (government_relations)
- Global Case Stories -> research, imports, R&D, consultancy (global_case_stories)
- Hybrid Learning -> cloud, QR, AR/AI, analytics (hybrid_learning)

For each category list items (name, short specs, integer quantity, approximate price in {currency_code}) and provide an approximate numeric subtotal for the category. Finally set "grand_total" equal to the sum of the category subtotals.

Important:
- RETURN ONLY THE JSON OBJECT (no commentary).
- Prices should be realistic approximate numeric values (no currency symbols inside numbers).
"#
    )
}

/// Builds the one corrective re-request issued when the first response did
/// not contain recoverable schema JSON.
pub fn build_followup_prompt(previous_output: &str, currency_code: &str) -> String {
    format!(
        "You returned text that wasn't valid JSON following the schema. \
         Convert your previous content to EXACT JSON matching the schema and nothing else.\n\n\
         Previous output:\n{previous_output}\n\n\
         Schema example snippet:\n\
         {{\"product\":\"string\",\"currency\":\"{currency_code}\", ... \"grand_total\":0}}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_all_category_keys() {
        let prompt = build_breakdown_prompt("Smart Kiosk", "Dubai, UAE", "AED");
        for (key, _) in CATEGORY_KEYS {
            assert!(prompt.contains(key), "missing key {}", key);
        }
        assert!(prompt.contains("\"Smart Kiosk\""));
        assert!(prompt.contains("\"Dubai, UAE\""));
        assert!(prompt.contains("grand_total"));
    }

    #[test]
    fn test_prompt_embeds_currency_in_schema_and_instructions() {
        let prompt = build_breakdown_prompt("Widget", "Tokyo, Japan", "JPY");
        assert!(prompt.contains("\"currency\": \"JPY\""));
        assert!(prompt.contains("approximate price in JPY"));
    }

    #[test]
    fn test_followup_carries_previous_output() {
        let followup = build_followup_prompt("some broken output", "INR");
        assert!(followup.contains("some broken output"));
        assert!(followup.contains("\"currency\":\"INR\""));
        assert!(followup.contains("EXACT JSON"));
    }
}
