use super::state::RequestState;
use crate::{
    error::Result,
    gemini::GeminiClient,
    host::{ensure_key_selected, KeySelector},
    models::{AspectRatio, GeneratedMedia, MediaKind},
};
use serde::{Deserialize, Serialize};

pub const HOST_NOT_DETECTED: &str = "Google AI Studio environment not detected. Video generation requires specific environment support.";
pub const KEY_SELECTION_REQUIRED: &str = "API Key selection is required for video generation.";
pub const GENERATION_FAILED: &str = "Generation failed. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaRequest {
    pub prompt: String,
    pub kind: MediaKind,
    pub aspect_ratio: AspectRatio,
}

/// The media studio screen: one prompt, image or video output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MediaStudio {
    pub prompt: String,
    pub mode: MediaKind,
    pub aspect_ratio: AspectRatio,
    pub output: RequestState<GeneratedMedia>,
}

impl MediaStudio {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_mode(&mut self, mode: MediaKind) {
        self.mode = mode;
    }

    pub fn trigger_enabled(&self) -> bool {
        !self.output.is_loading() && !self.prompt.trim().is_empty()
    }

    pub fn begin(&mut self) -> Option<MediaRequest> {
        if !self.trigger_enabled() || !self.output.begin() {
            return None;
        }
        Some(MediaRequest {
            prompt: self.prompt.clone(),
            kind: self.mode,
            aspect_ratio: self.aspect_ratio,
        })
    }

    /// Settles the outstanding request with the media URL or the failure.
    /// Returns `false` when no request was outstanding and the result was
    /// dropped.
    pub fn complete(&mut self, request: &MediaRequest, result: Result<String>) -> bool {
        let outcome = result
            .map(|url| GeneratedMedia::new(request.kind, url, request.prompt.clone()))
            .map_err(|e| {
                log::warn!("Media generation failed: {}", e);
                let message = e.to_string();
                if message.is_empty() {
                    GENERATION_FAILED.to_string()
                } else {
                    message
                }
            });
        self.output.settle(outcome)
    }

    /// Runs one full request. Video mode first checks the host key selector;
    /// `None` means the host offers no such capability.
    ///
    /// Returns `false` when the trigger was disabled.
    pub async fn generate(&mut self, client: &GeminiClient, host: Option<&dyn KeySelector>) -> bool {
        if !self.trigger_enabled() {
            return false;
        }
        self.output.reset();

        if self.mode == MediaKind::Video {
            let Some(host) = host else {
                self.output.refuse(HOST_NOT_DETECTED);
                return true;
            };
            if ensure_key_selected(host).await.is_err() {
                self.output.refuse(KEY_SELECTION_REQUIRED);
                return true;
            }
        }

        let Some(request) = self.begin() else {
            return false;
        };

        let result = match request.kind {
            MediaKind::Image => client
                .request_image(&request.prompt, request.aspect_ratio)
                .await
                .map(|image| image.data_uri()),
            MediaKind::Video => client
                .request_video(&request.prompt)
                .await
                .map(|video| video.uri),
        };
        self.complete(&request, result);
        true
    }
}
