use thiserror::Error;

#[derive(Error, Debug)]
pub enum CostAnalyzerError {
    #[error("Missing configuration: {0}")]
    MissingConfiguration(String),

    #[error("Model request failed: {0}")]
    ModelRequestFailed(String),

    #[error("Model returned no usable text content")]
    EmptyModelResponse,

    #[cfg(feature = "gemini")]
    #[error("HTTP transport error: {0}")]
    TransportError(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, CostAnalyzerError>;
