use super::state::RequestState;
use crate::{
    error::Result,
    gemini::GeminiClient,
    models::{ContentIdea, ContentPlatform},
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const IDEAS_FAILED: &str = "Failed to generate ideas. Please check your API key.";
pub const COPIED_MARK_DURATION: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdeaRequest {
    pub niche: String,
    pub platform: ContentPlatform,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CopiedMark {
    pub index: usize,
    pub at: Duration,
}

/// The idea brainstorm screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdeaBrainstorm {
    pub niche: String,
    pub platform: ContentPlatform,
    pub ideas: RequestState<Vec<ContentIdea>>,
    pub copied: Option<CopiedMark>,
}

impl Default for IdeaBrainstorm {
    fn default() -> Self {
        Self {
            niche: "Tech Reviews".to_string(),
            platform: ContentPlatform::Instagram,
            ideas: RequestState::Idle,
            copied: None,
        }
    }
}

impl IdeaBrainstorm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trigger_enabled(&self) -> bool {
        !self.ideas.is_loading()
    }

    pub fn begin(&mut self) -> Option<IdeaRequest> {
        if !self.ideas.begin() {
            return None;
        }
        self.copied = None;
        Some(IdeaRequest {
            niche: self.niche.clone(),
            platform: self.platform,
        })
    }

    /// Returns `false` when no request was outstanding and the result was
    /// dropped.
    pub fn complete(&mut self, result: Result<Vec<ContentIdea>>) -> bool {
        self.ideas.settle(result.map_err(|e| {
            log::warn!("Idea generation failed: {}", e);
            IDEAS_FAILED.to_string()
        }))
    }

    /// Runs one full request. Returns `false` when the trigger was disabled.
    pub async fn generate(&mut self, client: &GeminiClient) -> bool {
        let Some(request) = self.begin() else {
            return false;
        };
        let result = client.request_ideas(&request.niche, request.platform).await;
        self.complete(result);
        true
    }

    /// Marks idea `index` as copied at `now` and returns its clipboard text.
    pub fn copy_idea(&mut self, index: usize, now: Duration) -> Option<String> {
        let text = self.ideas.result()?.get(index)?.clipboard_text();
        self.copied = Some(CopiedMark { index, at: now });
        Some(text)
    }

    /// The copied mark shown at `now`; it lapses after [`COPIED_MARK_DURATION`].
    pub fn copied_index(&self, now: Duration) -> Option<usize> {
        self.copied
            .filter(|mark| now.saturating_sub(mark.at) < COPIED_MARK_DURATION)
            .map(|mark| mark.index)
    }
}
