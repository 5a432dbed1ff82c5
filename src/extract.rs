//! Best-effort recovery of a JSON object embedded in model output.
//!
//! Models asked for "JSON only" still wrap answers in prose or emit
//! almost-JSON (single quotes, trailing commas). [`extract_json`] takes the
//! widest `{...}` span of the text, tries a strict parse, then one repair
//! pass, and gives up with `None` after that. This is intentionally not a
//! general JSON5 parser.
//!
//! Known limitation: the single-quote repair rewrites every `'` in the span,
//! so an escaped apostrophe inside an otherwise valid string can end up
//! corrupted rather than preserved. See the tests for the exact behavior.

use std::sync::LazyLock;

use log::debug;
use regex::Regex;
use serde_json::Value;

static TRAILING_COMMA_OBJ_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r",\s*\}").unwrap());
static TRAILING_COMMA_ARR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r",\s*\]").unwrap());

/// Locates and parses the largest curly-brace region of `text`.
///
/// Returns `Some` only when the recovered value is a JSON object.
pub fn extract_json(text: &str) -> Option<Value> {
    if text.is_empty() {
        return None;
    }

    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    let span = &text[start..=end];

    if let Ok(value) = serde_json::from_str::<Value>(span) {
        return as_object(value);
    }

    debug!("strict JSON parse failed, attempting repair pass");
    let repaired = span.replace('\'', "\"");
    let repaired = TRAILING_COMMA_OBJ_RE.replace_all(&repaired, "}");
    let repaired = TRAILING_COMMA_ARR_RE.replace_all(&repaired, "]");

    match serde_json::from_str::<Value>(&repaired) {
        Ok(value) => as_object(value),
        Err(e) => {
            debug!("repair pass failed to recover JSON: {}", e);
            None
        }
    }
}

fn as_object(value: Value) -> Option<Value> {
    if value.is_object() {
        Some(value)
    } else {
        None
    }
}
