//! Reqwest-based client for the Gemini `generateContent` endpoint.

use async_trait::async_trait;
use log::debug;
use reqwest::Client;

use crate::analyzer::TextGenerator;
use crate::error::{CostAnalyzerError, Result};
use crate::llm::types::{Content, GenerateContentRequest, GenerateContentResponse};

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: GEMINI_BASE_URL.to_string(),
            model: model.into(),
        }
    }

    /// Reads `GOOGLE_API_KEY` (required) and `MODEL_NAME` (optional,
    /// defaults to [`DEFAULT_MODEL`]) from the environment.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("GOOGLE_API_KEY").map_err(|_| {
            CostAnalyzerError::MissingConfiguration(
                "GOOGLE_API_KEY is not configured in the environment".to_string(),
            )
        })?;
        let model = std::env::var("MODEL_NAME").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        Ok(Self::new(api_key, model))
    }

    pub async fn generate_content(&self, prompt: &str) -> Result<String> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );

        let payload = GenerateContentRequest {
            contents: vec![Content::user(prompt)],
        };

        debug!("requesting generation from model {}", self.model);
        let res = self.client.post(&url).json(&payload).send().await?;
        let status = res.status();

        if !status.is_success() {
            let err_text = res.text().await?;
            return Err(CostAnalyzerError::ModelRequestFailed(format!(
                "Gemini API error (status {}): {}",
                status, err_text
            )));
        }

        let body: GenerateContentResponse = res.json().await?;
        body.text().ok_or(CostAnalyzerError::EmptyModelResponse)
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.generate_content(prompt).await
    }
}
