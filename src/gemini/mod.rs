pub mod gateway;
pub mod idea_client;
pub mod image_client;
pub mod polling;
pub mod trend_client;
pub mod video_client;

#[cfg(test)]
pub(crate) mod testing;

use crate::{
    clock::{Clock, TokioClock},
    config::GeminiConfig,
    error::Result,
    models::{AspectRatio, ContentIdea, ContentPlatform, GeneratedImage, GeneratedVideo},
};
use std::sync::Arc;

pub use gateway::{Gateway, HttpGateway};
pub use idea_client::IdeaClient;
pub use image_client::ImageClient;
pub use polling::PollPolicy;
pub use trend_client::TrendClient;
pub use video_client::VideoClient;

/// Entry point for every generation operation.
#[derive(Clone)]
pub struct GeminiClient {
    idea_client: IdeaClient,
    image_client: ImageClient,
    video_client: VideoClient,
    trend_client: TrendClient,
}

impl GeminiClient {
    /// HTTP-backed client using real time for polling.
    pub fn new(config: GeminiConfig) -> Result<Self> {
        config.validate()?;
        let config = Arc::new(config);
        let gateway: Arc<dyn Gateway> = Arc::new(HttpGateway::new(config.clone())?);
        Ok(Self::with_gateway(gateway, config, Arc::new(TokioClock::new())))
    }

    pub fn with_gateway(
        gateway: Arc<dyn Gateway>,
        config: Arc<GeminiConfig>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            idea_client: IdeaClient::new(gateway.clone(), config.clone()),
            image_client: ImageClient::new(gateway.clone(), config.clone()),
            video_client: VideoClient::new(gateway.clone(), config.clone(), clock),
            trend_client: TrendClient::new(gateway, config),
        }
    }

    pub fn ideas(&self) -> &IdeaClient {
        &self.idea_client
    }

    pub fn image(&self) -> &ImageClient {
        &self.image_client
    }

    pub fn video(&self) -> &VideoClient {
        &self.video_client
    }

    pub fn trends(&self) -> &TrendClient {
        &self.trend_client
    }

    pub async fn request_ideas(
        &self,
        niche: &str,
        platform: ContentPlatform,
    ) -> Result<Vec<ContentIdea>> {
        self.idea_client.generate(niche, platform).await
    }

    pub async fn request_image(
        &self,
        prompt: &str,
        aspect_ratio: AspectRatio,
    ) -> Result<GeneratedImage> {
        self.image_client.generate(prompt, aspect_ratio).await
    }

    pub async fn request_video(&self, prompt: &str) -> Result<GeneratedVideo> {
        self.video_client.generate(prompt).await
    }

    pub async fn request_trend_analysis(&self, niche: &str) -> String {
        self.trend_client.analyze(niche).await
    }
}
