//! # Product Cost Analyzer
//!
//! A library for turning a product name and a target market into a
//! five-category cost-breakdown report, using a generative-language model
//! as the pricing source and tolerating the messy text it returns.
//!
//! ## Core Concepts
//!
//! - **Number Parser**: free-text prices ("$1,200.50", "15,000 - 18,000")
//!   normalized into non-negative floats, never failing
//! - **JSON Extractor**: best-effort recovery of the JSON object embedded
//!   in a model response, with one repair pass for common malformations
//! - **Currency Detector**: place name to 3-letter code via an ordered
//!   substring table, defaulting to USD
//! - **Report Normalizer**: whatever the model returned, the output is
//!   always a five-category [`Report`] with resolved subtotals
//! - **Analyzer**: the per-request flow — prompt, model call, one
//!   corrective follow-up, normalize — behind a [`TextGenerator`] port
//!
//! ## Example
//!
//! ```rust,ignore
//! use product_cost_analyzer::{CostAnalyzer, GeminiClient};
//!
//! let client = GeminiClient::from_env()?;
//! let analyzer = CostAnalyzer::new(client);
//! let analysis = analyzer.analyze("Smart Kiosk", "Dubai, UAE").await;
//! println!("{} {}", analysis.report.grand_total, analysis.report.currency);
//! ```

pub mod analyzer;
pub mod currency;
pub mod error;
pub mod extract;
pub mod number;
pub mod prompt;
pub mod report;

#[cfg(feature = "gemini")]
pub mod llm;

pub use analyzer::{Analysis, CostAnalyzer, TextGenerator};
pub use currency::{detect_currency_code, CURRENCY_TABLE, DEFAULT_CURRENCY};
pub use error::{CostAnalyzerError, Result};
pub use extract::extract_json;
pub use number::{parse_number, parse_number_str};
pub use prompt::{build_breakdown_prompt, build_followup_prompt};
pub use report::{normalize_report, Category, PriceItem, Report, CATEGORY_KEYS};

#[cfg(feature = "gemini")]
pub use llm::{GeminiClient, DEFAULT_MODEL};
