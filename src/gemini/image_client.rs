use super::gateway::Gateway;
use crate::{
    config::GeminiConfig,
    error::{GenerationError, Result},
    logger,
    models::{AspectRatio, GenerateContentRequest, GeneratedImage, GenerationConfig, ImageConfig},
};
use std::sync::Arc;

#[derive(Clone)]
pub struct ImageClient {
    gateway: Arc<dyn Gateway>,
    config: Arc<GeminiConfig>,
}

impl ImageClient {
    pub fn new(gateway: Arc<dyn Gateway>, config: Arc<GeminiConfig>) -> Self {
        Self { gateway, config }
    }

    pub async fn generate(&self, prompt: &str, aspect_ratio: AspectRatio) -> Result<GeneratedImage> {
        let _timer = logger::timer("image generation");
        let model = self.config.image_model.as_str();

        let request = GenerateContentRequest::prompt(prompt).with_generation_config(
            GenerationConfig {
                image_config: Some(ImageConfig {
                    aspect_ratio: aspect_ratio.as_str().to_string(),
                }),
                ..Default::default()
            },
        );

        log::info!("Generating image with model: {} ({})", model, aspect_ratio);

        let response = self
            .gateway
            .generate_content(model, &request)
            .await
            .map_err(|e| {
                log::error!("Error generating image: {}", e);
                e
            })?;

        let inline = response
            .first_inline_data()
            .filter(|d| !d.data.is_empty())
            .ok_or_else(|| {
                log::error!("Error generating image: no inline data in response");
                GenerationError::NoImageReturned
            })?;

        Ok(GeneratedImage {
            mime_type: inline.mime_type.clone(),
            data: inline.data.clone(),
        })
    }
}
