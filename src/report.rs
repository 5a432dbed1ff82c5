//! The cost report data model and the normalizer that builds it from raw
//! model output.
//!
//! The normalizer is a stateless single-pass transform: whatever shape the
//! upstream mapping has, the result is always a [`Report`] with exactly the
//! five fixed categories in order. Absent or malformed blocks degrade to
//! empty item lists and zero subtotals rather than failing.

use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::number::{parse_number, round2};

/// The five fixed cost-breakdown categories, as `(key, display title)`
/// pairs. Order is part of the report contract.
pub const CATEGORY_KEYS: &[(&str, &str); 5] = &[
    ("vision_2030", "Vision 2030 & Global Event Diplomacy"),
    ("financial_modeling", "Financial Modeling"),
    ("government_relations", "Government Relations"),
    ("global_case_stories", "Global Case Stories"),
    ("hybrid_learning", "Hybrid Learning"),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceItem {
    pub name: String,
    pub specs: String,
    pub quantity: u32,
    /// Unit price, rounded to 2 decimals.
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub key: String,
    pub title: String,
    pub items: Vec<PriceItem>,
    /// Upstream-provided value when positive, else the sum of
    /// `price * quantity` over items. Rounded to 2 decimals.
    pub subtotal: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub product: String,
    pub place: String,
    pub currency: String,
    pub categories: Vec<Category>,
    pub grand_total: f64,
}

impl Report {
    /// An empty-but-valid skeleton: all five categories present, no items,
    /// zero totals.
    pub fn empty(product: &str, place: &str, currency: &str) -> Self {
        normalize_report(None, product, place, currency)
    }

    /// The degraded report rendered when the upstream call or normalization
    /// fails outright: zero totals, with the error text carried as a
    /// synthetic item in the first category.
    pub fn degraded(product: &str, place: &str, currency: &str, error: &str) -> Self {
        let mut report = Self::empty(product, place, currency);
        report.categories[0].items.push(PriceItem {
            name: "Error".to_string(),
            specs: error.to_string(),
            quantity: 1,
            price: 0.0,
        });
        report
    }
}

/// Builds a [`Report`] from a parsed (possibly partial, possibly malformed)
/// upstream mapping. Never fails.
///
/// Category subtotals prefer a positive upstream value (number or numeric
/// string) over the computed item sum. A positive upstream `grand_total`
/// number likewise takes precedence over the sum of subtotals; when the two
/// differ the upstream value is kept silently, a deliberate choice inherited
/// from the report contract.
pub fn normalize_report(data: Option<&Value>, product: &str, place: &str, currency: &str) -> Report {
    let mut categories = Vec::with_capacity(CATEGORY_KEYS.len());
    let mut grand_total = 0.0;

    for (key, title) in CATEGORY_KEYS {
        let block = data.and_then(|d| d.get(key));
        let category = normalize_category(key, title, block);
        grand_total += category.subtotal;
        categories.push(category);
    }
    grand_total = round2(grand_total);

    // Only a genuine JSON number counts here; numeric strings are accepted
    // for subtotals but not for the grand total.
    if let Some(upstream_total) = data
        .and_then(|d| d.get("grand_total"))
        .and_then(Value::as_f64)
        .filter(|t| *t > 0.0)
    {
        if (upstream_total - grand_total).abs() > f64::EPSILON {
            debug!(
                "upstream grand_total {} differs from computed {}, keeping upstream",
                upstream_total, grand_total
            );
        }
        grand_total = round2(upstream_total);
    }

    Report {
        product: product.to_string(),
        place: place.to_string(),
        currency: currency.to_string(),
        categories,
        grand_total,
    }
}

fn normalize_category(key: &str, title: &str, block: Option<&Value>) -> Category {
    let block = block.filter(|b| b.is_object());
    let raw_items = block
        .and_then(|b| b.get("items"))
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[]);

    let mut items = Vec::new();
    let mut computed = 0.0;
    for raw in raw_items {
        if !raw.is_object() {
            continue;
        }
        let price = parse_number(raw.get("price").unwrap_or(&Value::Null));
        let quantity = coerce_quantity(raw.get("quantity"));
        computed += price * quantity as f64;
        items.push(PriceItem {
            name: string_field(raw, "name"),
            specs: string_field(raw, "specs"),
            quantity,
            price: round2(price),
        });
    }

    let subtotal = block
        .and_then(|b| b.get("subtotal"))
        .and_then(upstream_number)
        .filter(|s| *s > 0.0)
        .unwrap_or(computed);

    Category {
        key: key.to_string(),
        title: title.to_string(),
        items,
        subtotal: round2(subtotal),
    }
}

/// A subtotal provided upstream may arrive as a number or as a plain
/// numeric string. Anything else does not count.
fn upstream_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn coerce_quantity(value: Option<&Value>) -> u32 {
    let qty = match value {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or(1),
        Some(Value::String(s)) => s.trim().parse::<i64>().unwrap_or(1),
        _ => 1,
    };
    if qty <= 0 {
        1
    } else {
        qty as u32
    }
}

fn string_field(item: &Value, field: &str) -> String {
    match item.get(field) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_input_yields_full_skeleton() {
        let report = normalize_report(None, "Widget", "Paris, France", "EUR");
        assert_eq!(report.categories.len(), 5);
        for (category, (key, title)) in report.categories.iter().zip(CATEGORY_KEYS) {
            assert_eq!(category.key, *key);
            assert_eq!(category.title, *title);
            assert!(category.items.is_empty());
            assert_eq!(category.subtotal, 0.0);
        }
        assert_eq!(report.grand_total, 0.0);
        assert_eq!(report.currency, "EUR");
    }

    #[test]
    fn test_category_order_is_fixed_regardless_of_input_keys() {
        let data = json!({
            "hybrid_learning": {"items": [], "subtotal": 50},
            "vision_2030": {"items": [], "subtotal": 10},
        });
        let report = normalize_report(Some(&data), "X", "Y", "USD");
        let keys: Vec<&str> = report.categories.iter().map(|c| c.key.as_str()).collect();
        assert_eq!(
            keys,
            vec![
                "vision_2030",
                "financial_modeling",
                "government_relations",
                "global_case_stories",
                "hybrid_learning"
            ]
        );
        assert_eq!(report.categories[0].subtotal, 10.0);
        assert_eq!(report.categories[4].subtotal, 50.0);
        assert_eq!(report.grand_total, 60.0);
    }

    #[test]
    fn test_computed_subtotal_from_items() {
        let data = json!({
            "financial_modeling": {
                "items": [
                    {"name": "Sensor", "specs": "IP67", "quantity": 3, "price": "1,200.50"},
                    {"name": "Install", "specs": "", "quantity": 1, "price": 400},
                ]
            }
        });
        let report = normalize_report(Some(&data), "X", "Y", "USD");
        let cat = &report.categories[1];
        assert_eq!(cat.items.len(), 2);
        assert_eq!(cat.items[0].price, 1200.50);
        assert_eq!(cat.subtotal, 4001.50);
        assert_eq!(report.grand_total, 4001.50);
    }

    #[test]
    fn test_positive_upstream_subtotal_wins() {
        let data = json!({
            "vision_2030": {
                "items": [{"name": "A", "specs": "", "quantity": 1, "price": 100}],
                "subtotal": 999.994
            }
        });
        let report = normalize_report(Some(&data), "X", "Y", "USD");
        assert_eq!(report.categories[0].subtotal, 999.99);
    }

    #[test]
    fn test_non_positive_or_malformed_subtotal_falls_back_to_computed() {
        for subtotal in [json!(0), json!(-5), json!("n/a"), json!(null), json!([])] {
            let data = json!({
                "vision_2030": {
                    "items": [{"name": "A", "specs": "", "quantity": 2, "price": 100}],
                    "subtotal": subtotal
                }
            });
            let report = normalize_report(Some(&data), "X", "Y", "USD");
            assert_eq!(report.categories[0].subtotal, 200.0, "for {:?}", subtotal);
        }
    }

    #[test]
    fn test_numeric_string_subtotal_is_accepted() {
        let data = json!({
            "vision_2030": {"items": [], "subtotal": "750.5"}
        });
        let report = normalize_report(Some(&data), "X", "Y", "USD");
        assert_eq!(report.categories[0].subtotal, 750.5);
    }

    #[test]
    fn test_quantity_coercion() {
        let data = json!({
            "vision_2030": {
                "items": [
                    {"name": "A", "specs": "", "quantity": 0, "price": 10},
                    {"name": "B", "specs": "", "quantity": -3, "price": 10},
                    {"name": "C", "specs": "", "quantity": "4", "price": 10},
                    {"name": "D", "specs": "", "quantity": "lots", "price": 10},
                    {"name": "E", "specs": "", "price": 10},
                ]
            }
        });
        let report = normalize_report(Some(&data), "X", "Y", "USD");
        let quantities: Vec<u32> = report.categories[0]
            .items
            .iter()
            .map(|i| i.quantity)
            .collect();
        assert_eq!(quantities, vec![1, 1, 4, 1, 1]);
        assert_eq!(report.categories[0].subtotal, 80.0);
    }

    #[test]
    fn test_non_mapping_entries_are_skipped() {
        let data = json!({
            "vision_2030": {
                "items": ["stray string", 42, {"name": "A", "specs": "", "quantity": 1, "price": 5}]
            },
            "financial_modeling": "not a mapping",
            "government_relations": [1, 2, 3],
        });
        let report = normalize_report(Some(&data), "X", "Y", "USD");
        assert_eq!(report.categories[0].items.len(), 1);
        assert!(report.categories[1].items.is_empty());
        assert_eq!(report.categories[1].subtotal, 0.0);
        assert!(report.categories[2].items.is_empty());
    }

    #[test]
    fn test_upstream_grand_total_precedence() {
        let data = json!({
            "vision_2030": {"items": [], "subtotal": 100},
            "grand_total": 5000
        });
        let report = normalize_report(Some(&data), "X", "Y", "USD");
        assert_eq!(report.grand_total, 5000.0);

        // Numeric strings do not count for the grand total.
        let data = json!({
            "vision_2030": {"items": [], "subtotal": 100},
            "grand_total": "5000"
        });
        let report = normalize_report(Some(&data), "X", "Y", "USD");
        assert_eq!(report.grand_total, 100.0);

        // Non-positive upstream totals fall back to the computed sum.
        let data = json!({
            "vision_2030": {"items": [], "subtotal": 100},
            "grand_total": -1
        });
        let report = normalize_report(Some(&data), "X", "Y", "USD");
        assert_eq!(report.grand_total, 100.0);
    }

    #[test]
    fn test_degraded_report_carries_error_item() {
        let report = Report::degraded("Kiosk", "Dubai", "AED", "API key missing");
        assert_eq!(report.categories.len(), 5);
        assert_eq!(report.grand_total, 0.0);
        let first = &report.categories[0];
        assert_eq!(first.items.len(), 1);
        assert_eq!(first.items[0].name, "Error");
        assert_eq!(first.items[0].specs, "API key missing");
        assert_eq!(first.items[0].quantity, 1);
        assert_eq!(first.items[0].price, 0.0);
        for category in &report.categories[1..] {
            assert!(category.items.is_empty());
        }
    }
}
