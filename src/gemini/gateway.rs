use crate::{
    config::GeminiConfig,
    error::{GenerationError, Result},
    models::{
        GenerateContentRequest, GenerateContentResponse, GenerateVideosRequest, VideoOperation,
    },
};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// The remote generation service. Implementations perform exactly one
/// network round trip per call and never retry.
#[async_trait]
pub trait Gateway: Send + Sync {
    async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse>;

    /// Submits a video job and returns its handle.
    async fn generate_videos(
        &self,
        model: &str,
        request: &GenerateVideosRequest,
    ) -> Result<VideoOperation>;

    /// Fetches the current state of a previously submitted job.
    async fn get_video_operation(&self, operation: &VideoOperation) -> Result<VideoOperation>;
}

#[derive(Clone)]
pub struct HttpGateway {
    client: Client,
    config: Arc<GeminiConfig>,
}

impl HttpGateway {
    pub fn new(config: Arc<GeminiConfig>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| GenerationError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    async fn send<T: DeserializeOwned>(&self, request: reqwest::RequestBuilder) -> Result<T> {
        // Resolved per call so a key swapped into the environment takes effect.
        let api_key = self.config.resolve_api_key()?;

        let response = request
            .header("x-goog-api-key", api_key)
            .send()
            .await
            .map_err(|e| {
                log::error!("Gateway request failed: {}", e);
                GenerationError::Network(e.to_string())
            })?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = error_message(&body);
            log::error!("Gateway returned {}: {}", status, message);
            return Err(GenerationError::Http {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            log::debug!("Unparseable gateway body: {}", body);
            GenerationError::Parse(e.to_string())
        })
    }
}

#[async_trait]
impl Gateway for HttpGateway {
    async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        let url = self.url(&format!("models/{}:generateContent", model));
        log::debug!("POST {}", url);
        self.send(self.client.post(url).json(request)).await
    }

    async fn generate_videos(
        &self,
        model: &str,
        request: &GenerateVideosRequest,
    ) -> Result<VideoOperation> {
        let url = self.url(&format!("models/{}:predictLongRunning", model));
        log::debug!("POST {}", url);
        self.send(self.client.post(url).json(request)).await
    }

    async fn get_video_operation(&self, operation: &VideoOperation) -> Result<VideoOperation> {
        if operation.name.is_empty() {
            return Err(GenerationError::Parse("video job handle has no name".into()));
        }
        let url = self.url(&operation.name);
        log::debug!("GET {}", url);
        self.send(self.client.get(url)).await
    }
}

/// Pulls `error.message` out of a Google API error body, falling back to the
/// raw body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(String::from))
        .unwrap_or_else(|| {
            let trimmed = body.trim();
            if trimmed.is_empty() {
                "no response body".to_string()
            } else {
                trimmed.chars().take(500).collect()
            }
        })
}
