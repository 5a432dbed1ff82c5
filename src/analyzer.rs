//! Request-scoped orchestration: currency detection, prompt construction,
//! the model round trip (with one corrective follow-up) and report
//! normalization.

use async_trait::async_trait;
use log::{info, warn};
use serde_json::Value;

use crate::currency::detect_currency_code;
use crate::error::Result;
use crate::extract::extract_json;
use crate::prompt::{build_breakdown_prompt, build_followup_prompt};
use crate::report::{normalize_report, Report};

/// A text-generation capability. Adapters own any response-shape handling;
/// the analyzer only ever sees prompt text in, response text out.
///
/// Implementations must tolerate being invoked twice per analysis: once for
/// the initial request and once for the optional corrective follow-up.
#[async_trait]
pub trait TextGenerator {
    async fn generate(&self, prompt: &str) -> Result<String>;
}

/// The outcome of one analysis. Always renderable: failures surface as a
/// degraded [`Report`] plus the error text, never as an absent report.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub report: Report,
    /// The parsed upstream mapping, when one was recovered.
    pub raw: Option<Value>,
    pub error: Option<String>,
}

pub struct CostAnalyzer<G> {
    generator: G,
}

impl<G: TextGenerator> CostAnalyzer<G> {
    pub fn new(generator: G) -> Self {
        Self { generator }
    }

    /// Produces a cost breakdown for `product` in `place`.
    ///
    /// Never fails: an upstream error yields a degraded report carrying the
    /// error message, and an unparseable response (after the one follow-up)
    /// yields an empty-but-valid skeleton.
    pub async fn analyze(&self, product: &str, place: &str) -> Analysis {
        let currency = detect_currency_code(place);
        info!(
            "analyzing product '{}' for market '{}' (currency {})",
            product, place, currency
        );

        match self.request_breakdown(product, place, currency).await {
            Ok(data) => {
                let report = normalize_report(data.as_ref(), product, place, currency);
                Analysis {
                    report,
                    raw: data,
                    error: None,
                }
            }
            Err(e) => {
                let message = e.to_string();
                warn!("analysis failed, rendering degraded report: {}", message);
                Analysis {
                    report: Report::degraded(product, place, currency, &message),
                    raw: None,
                    error: Some(message),
                }
            }
        }
    }

    /// One model round trip, with at most one corrective re-request when the
    /// response carries no recoverable JSON. `Ok(None)` means both attempts
    /// came back unparseable; the caller degrades to the empty skeleton.
    async fn request_breakdown(
        &self,
        product: &str,
        place: &str,
        currency: &str,
    ) -> Result<Option<Value>> {
        let prompt = build_breakdown_prompt(product, place, currency);
        let text = self.generator.generate(&prompt).await?;

        if let Some(data) = extract_json(&text) {
            return Ok(Some(data));
        }

        warn!("response contained no recoverable JSON, issuing corrective follow-up");
        let followup = build_followup_prompt(&text, currency);
        let text = self.generator.generate(&followup).await?;

        Ok(extract_json(&text))
    }
}
