use std::time::Duration;
use thiserror::Error;

/// Coarse failure taxonomy shared by every generation operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    NetworkFailure,
    ParseFailure,
    EmptyResult,
    CapabilityMissing,
    Configuration,
    Aborted,
}

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("API key not found in configuration or environment")]
    MissingApiKey,
    #[error("Network error: {0}")]
    Network(String),
    #[error("Gateway returned HTTP {status}: {message}")]
    Http { status: u16, message: String },
    #[error("Failed to parse gateway response: {0}")]
    Parse(String),
    #[error("Gateway returned no text")]
    EmptyResult,
    #[error("No image data returned")]
    NoImageReturned,
    #[error("Video generation failed or returned no URI")]
    NoVideoUri,
    #[error("Video job failed: {0}")]
    JobFailed(String),
    #[error("Video job still running after {attempts} status checks")]
    PollLimitExceeded { attempts: u32 },
    #[error("Video job did not finish within {0:?}")]
    PollTimeout(Duration),
    #[error("Video generation was cancelled")]
    Cancelled,
    #[error("{0}")]
    CapabilityMissing(String),
}

impl GenerationError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            GenerationError::Network(_) | GenerationError::Http { .. } => {
                ErrorCategory::NetworkFailure
            }
            GenerationError::Parse(_) => ErrorCategory::ParseFailure,
            GenerationError::EmptyResult
            | GenerationError::NoImageReturned
            | GenerationError::NoVideoUri
            | GenerationError::JobFailed(_) => ErrorCategory::EmptyResult,
            GenerationError::CapabilityMissing(_) => ErrorCategory::CapabilityMissing,
            GenerationError::Config(_) | GenerationError::MissingApiKey => {
                ErrorCategory::Configuration
            }
            GenerationError::PollLimitExceeded { .. }
            | GenerationError::PollTimeout(_)
            | GenerationError::Cancelled => ErrorCategory::Aborted,
        }
    }
}

impl From<reqwest::Error> for GenerationError {
    fn from(e: reqwest::Error) -> Self {
        GenerationError::Network(e.to_string())
    }
}

impl From<serde_json::Error> for GenerationError {
    fn from(e: serde_json::Error) -> Self {
        GenerationError::Parse(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, GenerationError>;
